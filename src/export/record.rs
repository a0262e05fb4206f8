//! Flattened, format-agnostic view of a scored scorecard.
//!
//! Both writers read only from [`ExportRecord`] and render every number
//! through the helpers here, so a CSV and a PDF built from the same record
//! always show the same values.

use serde::Serialize;

use crate::error::{Result, ScorecardError};
use crate::scoring::{
    aggregate, FactorName, FactorScore, Rating, ScoreSummary, Scorecard,
    SubfactorName, MAX_POSSIBLE_SCORE, WEIGHT_SUM_TOLERANCE,
};

/// Slack allowed when checking derived scores against the 1-5 scale.
const SCORE_TOLERANCE: f64 = 1e-9;

/// One subfactor line: the unit both the CSV rows and the PDF table share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub factor: FactorName,
    pub subfactor: SubfactorName,
    pub rating: u8,
    pub comment: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub rows: Vec<ExportRow>,
    pub factor_scores: Vec<FactorScore>,
    pub overall: f64,
}

impl ExportRecord {
    /// Project a scorecard and its summary. Unrated subfactors are exported
    /// with the neutral rating they were scored with.
    pub fn new(card: &Scorecard, summary: &ScoreSummary) -> Self {
        let rows = card
            .subfactors()
            .map(|(factor, sub)| ExportRow {
                factor: factor.name,
                subfactor: sub.name,
                rating: sub.effective_rating().value(),
                comment: sub.comment.clone(),
                weight: factor.weight,
            })
            .collect();

        Self {
            rows,
            factor_scores: summary.factors.to_vec(),
            overall: summary.overall,
        }
    }

    /// Aggregate the scorecard and project it in one step.
    pub fn from_scorecard(card: &Scorecard) -> Self {
        Self::new(card, &aggregate(card))
    }

    pub fn max_possible(&self) -> f64 {
        MAX_POSSIBLE_SCORE
    }

    pub fn percentage(&self) -> f64 {
        self.overall / MAX_POSSIBLE_SCORE * 100.0
    }

    pub fn overall_rating(&self) -> u8 {
        Rating::nearest(self.overall).value()
    }

    pub fn overall_description(&self) -> &'static str {
        Rating::nearest(self.overall).description()
    }

    /// Reject records whose values would mislead a reader of the export.
    ///
    /// The factor scores must list Team, Product and Market once each, in
    /// that order, with weights forming a unit partition. There must be one
    /// row per subfactor, each carrying its factor's weight.
    pub fn validate(&self) -> Result<()> {
        if self.factor_scores.len() != FactorName::ALL.len() {
            return Err(invalid(format!(
                "expected {} factor scores, got {}",
                FactorName::ALL.len(),
                self.factor_scores.len()
            )));
        }

        let mut weight_sum = 0.0;
        for (fs, expected) in self.factor_scores.iter().zip(FactorName::ALL) {
            if fs.name != expected {
                return Err(invalid(format!(
                    "factor scores out of order: expected {}, got {}",
                    expected, fs.name
                )));
            }
            check_weight(fs.weight, fs.name.label())?;
            check_score(fs.score, fs.name.label())?;
            weight_sum += fs.weight;
        }
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(format!(
                "factor weights sum to {}, not 1",
                weight_sum
            )));
        }

        if self.rows.len() != SubfactorName::ALL.len() {
            return Err(invalid(format!(
                "expected {} subfactor rows, got {}",
                SubfactorName::ALL.len(),
                self.rows.len()
            )));
        }

        for (row, expected) in self.rows.iter().zip(SubfactorName::ALL) {
            if row.subfactor != expected || row.factor != expected.factor() {
                return Err(invalid(format!(
                    "rows out of order: expected {} / {}, got {} / {}",
                    expected.factor(),
                    expected,
                    row.factor,
                    row.subfactor
                )));
            }
            if Rating::new(row.rating).is_none() {
                return Err(invalid(format!(
                    "{} / {}: rating {} is outside {}-{}",
                    row.factor,
                    row.subfactor,
                    row.rating,
                    Rating::MIN,
                    Rating::MAX
                )));
            }
            let factor_weight = self.factor_scores[row.factor as usize].weight;
            if !((row.weight - factor_weight).abs() <= WEIGHT_SUM_TOLERANCE) {
                return Err(invalid(format!(
                    "{} / {}: weight {} does not match the {} factor weight {}",
                    row.factor, row.subfactor, row.weight, row.factor, factor_weight
                )));
            }
        }

        check_score(self.overall, "overall score")
    }
}

fn invalid(msg: String) -> ScorecardError {
    ScorecardError::InvalidExportData(msg)
}

fn check_weight(weight: f64, what: &str) -> Result<()> {
    if weight.is_finite() && weight > 0.0 && weight <= 1.0 + WEIGHT_SUM_TOLERANCE {
        Ok(())
    } else {
        Err(invalid(format!("{}: weight {} is outside (0, 1]", what, weight)))
    }
}

fn check_score(score: f64, what: &str) -> Result<()> {
    let min = f64::from(Rating::MIN) - SCORE_TOLERANCE;
    let max = MAX_POSSIBLE_SCORE + SCORE_TOLERANCE;
    if score.is_finite() && (min..=max).contains(&score) {
        Ok(())
    } else {
        Err(invalid(format!("{}: {} is outside 1-5", what, score)))
    }
}

/// Scores and weights, as shown in every export.
pub fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}
