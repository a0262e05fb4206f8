use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level evaluation category.
///
/// Variants are declared in canonical order (Team, Product, Market); that
/// order is used everywhere factors are listed, summed, or rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorName {
    Team,
    Product,
    Market,
}

impl FactorName {
    pub const ALL: [FactorName; 3] = [FactorName::Team, FactorName::Product, FactorName::Market];

    pub fn label(self) -> &'static str {
        match self {
            FactorName::Team => "Team",
            FactorName::Product => "Product",
            FactorName::Market => "Market",
        }
    }

    /// The three subfactors rated under this factor, in display order.
    pub fn subfactors(self) -> [SubfactorName; 3] {
        use SubfactorName::*;
        match self {
            FactorName::Team => [Ability, Speed, XFactor],
            FactorName::Product => [Value, Defensibility, Scalability],
            FactorName::Market => [Size, Growth, Dynamics],
        }
    }
}

impl fmt::Display for FactorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the nine rated dimensions, three per factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubfactorName {
    Ability,
    Speed,
    XFactor,
    Value,
    Defensibility,
    Scalability,
    Size,
    Growth,
    Dynamics,
}

impl SubfactorName {
    pub const ALL: [SubfactorName; 9] = [
        SubfactorName::Ability,
        SubfactorName::Speed,
        SubfactorName::XFactor,
        SubfactorName::Value,
        SubfactorName::Defensibility,
        SubfactorName::Scalability,
        SubfactorName::Size,
        SubfactorName::Growth,
        SubfactorName::Dynamics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubfactorName::Ability => "Ability",
            SubfactorName::Speed => "Speed",
            SubfactorName::XFactor => "X-factor",
            SubfactorName::Value => "Value",
            SubfactorName::Defensibility => "Defensibility",
            SubfactorName::Scalability => "Scalability",
            SubfactorName::Size => "Size",
            SubfactorName::Growth => "Growth",
            SubfactorName::Dynamics => "Dynamics",
        }
    }

    /// Key used in the scorecard file (`ability`, `x-factor`, ...).
    pub fn key(self) -> &'static str {
        match self {
            SubfactorName::Ability => "ability",
            SubfactorName::Speed => "speed",
            SubfactorName::XFactor => "x-factor",
            SubfactorName::Value => "value",
            SubfactorName::Defensibility => "defensibility",
            SubfactorName::Scalability => "scalability",
            SubfactorName::Size => "size",
            SubfactorName::Growth => "growth",
            SubfactorName::Dynamics => "dynamics",
        }
    }

    /// Prompt text shown when asking for a comment on this subfactor.
    pub fn description(self) -> &'static str {
        match self {
            SubfactorName::Ability => "Team's capability to execute the business plan",
            SubfactorName::Speed => "Team's pace of execution and decision-making",
            SubfactorName::XFactor => "Unique qualities that massively set the team apart",
            SubfactorName::Value => "Product's ability to solve a significant problem",
            SubfactorName::Defensibility => "Product's competitive advantage and barriers to entry",
            SubfactorName::Scalability => "Product's potential for growth and expansion",
            SubfactorName::Size => "Total addressable market size",
            SubfactorName::Growth => "Market's growth rate and potential",
            SubfactorName::Dynamics => "Competitive landscape and market trends",
        }
    }

    pub fn factor(self) -> FactorName {
        use SubfactorName::*;
        match self {
            Ability | Speed | XFactor => FactorName::Team,
            Value | Defensibility | Scalability => FactorName::Product,
            Size | Growth | Dynamics => FactorName::Market,
        }
    }
}

impl fmt::Display for SubfactorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A subfactor rating on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Substituted whenever a subfactor has not been rated.
    pub const NEUTRAL: Rating = Rating(3);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Rating(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Nearest point on the scale to a derived score. Halves round to even
    /// (2.5 -> 2, 3.5 -> 4); anything off the scale is clamped.
    pub fn nearest(score: f64) -> Self {
        if score.is_nan() {
            return Rating::NEUTRAL;
        }
        let rounded = score
            .round_ties_even()
            .clamp(f64::from(Self::MIN), f64::from(Self::MAX));
        Rating(rounded as u8)
    }

    pub fn description(self) -> &'static str {
        describe_rating(self.0).unwrap_or("Average")
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::NEUTRAL
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Word description for a point on the rating scale, if it is on the scale.
pub fn describe_rating(value: u8) -> Option<&'static str> {
    match value {
        1 => Some("Poor"),
        2 => Some("Fair"),
        3 => Some("Average"),
        4 => Some("Good"),
        5 => Some("Excellent"),
        _ => None,
    }
}
