use serde::Serialize;
use tracing::{debug, trace};

use super::catalog::{FactorName, Rating, SubfactorName};
use super::weights::NormalizedWeights;

/// Highest score any factor, and therefore the overall score, can reach.
pub const MAX_POSSIBLE_SCORE: f64 = 5.0;

/// A rated subfactor with its free-text comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Subfactor {
    pub name: SubfactorName,
    /// `None` when the user has not rated it; scored as [`Rating::NEUTRAL`].
    pub rating: Option<Rating>,
    pub comment: String,
}

impl Subfactor {
    pub fn new(name: SubfactorName) -> Self {
        Self {
            name,
            rating: None,
            comment: String::new(),
        }
    }

    pub fn rated(name: SubfactorName, rating: Rating, comment: impl Into<String>) -> Self {
        Self {
            name,
            rating: Some(rating),
            comment: comment.into(),
        }
    }

    pub fn effective_rating(&self) -> Rating {
        self.rating.unwrap_or(Rating::NEUTRAL)
    }
}

/// One factor with its normalized weight and its three subfactors.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub name: FactorName,
    pub weight: f64,
    pub subfactors: Vec<Subfactor>,
}

impl Factor {
    /// Arithmetic mean of the subfactor ratings.
    pub fn average_score(&self) -> f64 {
        if self.subfactors.is_empty() {
            return f64::from(Rating::NEUTRAL.value());
        }
        // Integer sum first so the mean does not depend on listing order.
        let total: u32 = self
            .subfactors
            .iter()
            .map(|s| u32::from(s.effective_rating().value()))
            .sum();
        f64::from(total) / self.subfactors.len() as f64
    }

    pub fn weighted_score(&self) -> f64 {
        self.average_score() * self.weight
    }

    pub fn subfactor_mut(&mut self, name: SubfactorName) -> Option<&mut Subfactor> {
        self.subfactors.iter_mut().find(|s| s.name == name)
    }
}

/// The full set of inputs for one evaluation: three factors in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    factors: [Factor; 3],
}

impl Scorecard {
    /// A scorecard with every subfactor unrated and without comments.
    pub fn new(weights: NormalizedWeights) -> Self {
        let factors = FactorName::ALL.map(|name| Factor {
            name,
            weight: weights.get(name),
            subfactors: name.subfactors().into_iter().map(Subfactor::new).collect(),
        });
        Self { factors }
    }

    /// Assemble a scorecard from entries. Entries are matched by subfactor name;
    /// subfactors without an entry stay unrated.
    pub fn from_entries<I>(weights: NormalizedWeights, entries: I) -> Self
    where
        I: IntoIterator<Item = Subfactor>,
    {
        let mut card = Self::new(weights);
        for entry in entries {
            card.set_subfactor(entry);
        }
        card
    }

    pub fn factors(&self) -> &[Factor; 3] {
        &self.factors
    }

    pub fn factor(&self, name: FactorName) -> &Factor {
        &self.factors[name as usize]
    }

    pub fn set_subfactor(&mut self, entry: Subfactor) {
        let factor = &mut self.factors[entry.name.factor() as usize];
        if let Some(slot) = factor.subfactor_mut(entry.name) {
            *slot = entry;
        }
    }

    pub fn set_rating(&mut self, name: SubfactorName, rating: Rating) {
        let factor = &mut self.factors[name.factor() as usize];
        if let Some(slot) = factor.subfactor_mut(name) {
            slot.rating = Some(rating);
        }
    }

    pub fn set_comment(&mut self, name: SubfactorName, comment: impl Into<String>) {
        let factor = &mut self.factors[name.factor() as usize];
        if let Some(slot) = factor.subfactor_mut(name) {
            slot.comment = comment.into();
        }
    }

    /// Replace all factor weights. The subfactor data is untouched.
    pub fn with_weights(mut self, weights: NormalizedWeights) -> Self {
        for factor in &mut self.factors {
            factor.weight = weights.get(factor.name);
        }
        self
    }

    pub fn subfactors(&self) -> impl Iterator<Item = (&Factor, &Subfactor)> {
        self.factors
            .iter()
            .flat_map(|f| f.subfactors.iter().map(move |s| (f, s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScore {
    pub name: FactorName,
    pub weight: f64,
    pub score: f64,
}

/// Derived scores for a scorecard. Recompute with [`aggregate`]; never cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub factors: [FactorScore; 3],
    pub overall: f64,
}

impl ScoreSummary {
    pub fn factor(&self, name: FactorName) -> &FactorScore {
        &self.factors[name as usize]
    }

    pub fn max_possible(&self) -> f64 {
        MAX_POSSIBLE_SCORE
    }

    pub fn percentage(&self) -> f64 {
        self.overall / MAX_POSSIBLE_SCORE * 100.0
    }

    /// Overall score rounded to the nearest point on the rating scale.
    pub fn overall_rating(&self) -> u8 {
        Rating::nearest(self.overall).value()
    }

    pub fn overall_description(&self) -> &'static str {
        Rating::nearest(self.overall).description()
    }
}

/// Combine ratings and normalized weights into per-factor and overall scores.
pub fn aggregate(card: &Scorecard) -> ScoreSummary {
    let factors = card.factors.each_ref().map(|f| {
        let score = f.average_score();
        trace!(factor = %f.name, score, weight = f.weight, "factor score");
        FactorScore {
            name: f.name,
            weight: f.weight,
            score,
        }
    });

    let overall = card.factors.iter().map(Factor::weighted_score).sum();
    debug!(overall, "aggregated scorecard");

    ScoreSummary { factors, overall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::weights::{normalize, FactorWeights};
    use proptest::prelude::*;

    fn rating(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    fn card_with(weights: FactorWeights, ratings: [u8; 9]) -> Scorecard {
        let weights = normalize(weights).unwrap();
        let entries = SubfactorName::ALL
            .iter()
            .zip(ratings)
            .map(|(name, r)| Subfactor::rated(*name, rating(r), ""));
        Scorecard::from_entries(weights, entries)
    }

    #[test]
    fn test_equal_weights_neutral_ratings() {
        let card = card_with(FactorWeights::equal(), [3; 9]);
        let summary = aggregate(&card);
        for f in &summary.factors {
            assert_eq!(f.score, 3.0);
        }
        assert!((summary.overall - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_overall() {
        let card = card_with(
            FactorWeights::new(2.0, 1.0, 1.0),
            [5, 5, 5, 1, 1, 1, 3, 3, 3],
        );
        let summary = aggregate(&card);
        assert_eq!(summary.factor(FactorName::Team).score, 5.0);
        assert_eq!(summary.factor(FactorName::Product).score, 1.0);
        assert_eq!(summary.factor(FactorName::Market).score, 3.0);
        assert_eq!(summary.overall, 3.5);
        assert_eq!(summary.overall_rating(), 4);
        assert_eq!(summary.overall_description(), "Good");
        assert!((summary.percentage() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrated_subfactors_score_neutral() {
        let card = Scorecard::new(NormalizedWeights::default());
        let summary = aggregate(&card);
        for f in &summary.factors {
            assert_eq!(f.score, 3.0);
        }
    }

    #[test]
    fn test_partial_ratings_use_neutral_for_missing() {
        let mut card = Scorecard::new(NormalizedWeights::default());
        card.set_rating(SubfactorName::Ability, rating(5));
        card.set_rating(SubfactorName::Speed, rating(4));
        // X-factor left unrated -> 3
        let summary = aggregate(&card);
        assert_eq!(summary.factor(FactorName::Team).score, 4.0);
    }

    #[test]
    fn test_average_score_uneven() {
        let card = card_with(FactorWeights::equal(), [1, 2, 2, 3, 3, 3, 5, 5, 4]);
        let summary = aggregate(&card);
        assert!((summary.factor(FactorName::Team).score - 5.0 / 3.0).abs() < 1e-12);
        assert!((summary.factor(FactorName::Market).score - 14.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_order_is_canonical() {
        let card = card_with(FactorWeights::default(), [3; 9]);
        let names: Vec<FactorName> = aggregate(&card).factors.iter().map(|f| f.name).collect();
        assert_eq!(names, FactorName::ALL.to_vec());
    }

    #[test]
    fn test_set_comment_and_entries() {
        let mut card = Scorecard::new(NormalizedWeights::default());
        card.set_comment(SubfactorName::Growth, "30% YoY");
        let growth = card
            .factor(FactorName::Market)
            .subfactors
            .iter()
            .find(|s| s.name == SubfactorName::Growth)
            .unwrap();
        assert_eq!(growth.comment, "30% YoY");
        assert_eq!(growth.rating, None);
        assert_eq!(card.subfactors().count(), 9);
    }

    #[test]
    fn test_with_weights_keeps_ratings() {
        let card = card_with(FactorWeights::default(), [5, 5, 5, 1, 1, 1, 3, 3, 3]);
        let equal = normalize(FactorWeights::equal()).unwrap();
        let summary = aggregate(&card.with_weights(equal));
        assert!((summary.overall - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_overall_rating_ties_round_to_even() {
        let low = aggregate(&card_with(
            FactorWeights::new(2.0, 1.0, 1.0),
            [2, 2, 2, 3, 3, 3, 3, 3, 3],
        ));
        assert_eq!(low.overall, 2.5);
        assert_eq!(low.overall_rating(), 2);
        assert_eq!(low.overall_description(), "Fair");

        let high = aggregate(&card_with(
            FactorWeights::new(2.0, 1.0, 1.0),
            [5, 5, 5, 4, 4, 4, 4, 4, 4],
        ));
        assert_eq!(high.overall, 4.5);
        assert_eq!(high.overall_rating(), 4);
        assert_eq!(high.overall_description(), "Good");
    }

    #[test]
    fn test_weighted_score_feeds_overall() {
        let card = card_with(FactorWeights::new(2.0, 1.0, 1.0), [5, 5, 5, 1, 1, 1, 3, 3, 3]);
        assert_eq!(card.factor(FactorName::Team).weighted_score(), 2.5);
        let total: f64 = card.factors().iter().map(Factor::weighted_score).sum();
        assert_eq!(aggregate(&card).overall, total);
    }

    #[test]
    fn test_overall_rating_rounds() {
        let card = card_with(FactorWeights::equal(), [1, 1, 1, 1, 1, 2, 1, 1, 1]);
        let summary = aggregate(&card);
        assert_eq!(summary.overall_rating(), 1);
        assert_eq!(summary.overall_description(), "Poor");
    }

    proptest! {
        #[test]
        fn overall_stays_on_rating_scale(
            ratings in proptest::array::uniform9(1u8..=5),
            team in 0.01f64..100.0,
            product in 0.01f64..100.0,
            market in 0.01f64..100.0,
        ) {
            let card = card_with(FactorWeights::new(team, product, market), ratings);
            let summary = aggregate(&card);
            prop_assert!(summary.overall >= 1.0 - 1e-9 && summary.overall <= 5.0 + 1e-9);
            for f in &summary.factors {
                prop_assert!(f.score >= 1.0 && f.score <= 5.0);
            }
        }

        #[test]
        fn aggregate_is_idempotent(ratings in proptest::array::uniform9(1u8..=5)) {
            let card = card_with(FactorWeights::default(), ratings);
            let first = aggregate(&card);
            let second = aggregate(&card);
            prop_assert_eq!(first.overall.to_bits(), second.overall.to_bits());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn aggregate_ignores_subfactor_order(
            ratings in proptest::array::uniform9(1u8..=5),
            shift in 0usize..3,
        ) {
            let card = card_with(FactorWeights::new(3.0, 2.0, 1.0), ratings);
            let mut shuffled = card.clone();
            for factor in shuffled.factors.iter_mut() {
                factor.subfactors.rotate_left(shift);
                factor.subfactors.reverse();
            }
            let a = aggregate(&card);
            let b = aggregate(&shuffled);
            prop_assert_eq!(a.overall.to_bits(), b.overall.to_bits());
        }
    }
}
