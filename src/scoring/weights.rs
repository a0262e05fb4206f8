use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::FactorName;
use crate::error::{Result, ScorecardError};

/// Tolerance for "weights sum to one" checks.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Raw, user-supplied factor weights. Any positive scale is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FactorWeights {
    pub team: f64,
    pub product: f64,
    pub market: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            team: 0.5,
            product: 0.3,
            market: 0.2,
        }
    }
}

impl FactorWeights {
    pub fn new(team: f64, product: f64, market: f64) -> Self {
        Self {
            team,
            product,
            market,
        }
    }

    /// Input for "set to equal weights". Goes through [`normalize`] like any other.
    pub fn equal() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn get(&self, factor: FactorName) -> f64 {
        match factor {
            FactorName::Team => self.team,
            FactorName::Product => self.product,
            FactorName::Market => self.market,
        }
    }

    pub fn sum(&self) -> f64 {
        self.team + self.product + self.market
    }
}

/// Factor weights rescaled to sum to 1.0. Only [`normalize`] creates these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedWeights {
    team: f64,
    product: f64,
    market: f64,
}

impl NormalizedWeights {
    pub fn get(&self, factor: FactorName) -> f64 {
        match factor {
            FactorName::Team => self.team,
            FactorName::Product => self.product,
            FactorName::Market => self.market,
        }
    }

    pub fn sum(&self) -> f64 {
        self.team + self.product + self.market
    }
}

impl Default for NormalizedWeights {
    fn default() -> Self {
        // Defaults are positive and finite; normalize cannot fail here.
        normalize(FactorWeights::default()).unwrap_or(NormalizedWeights {
            team: 0.5,
            product: 0.3,
            market: 0.2,
        })
    }
}

/// Rescale raw weights so they sum to 1.0.
///
/// Every weight must be finite and strictly positive. Equal inputs produce
/// exactly one third each.
pub fn normalize(weights: FactorWeights) -> Result<NormalizedWeights> {
    let mut problems = Vec::new();
    for factor in FactorName::ALL {
        let w = weights.get(factor);
        if !w.is_finite() {
            problems.push(format!("{} weight must be a finite number", factor));
        } else if w <= 0.0 {
            problems.push(format!("{} weight must be positive, got {}", factor, w));
        }
    }
    if !problems.is_empty() {
        return Err(ScorecardError::InvalidWeight(problems.join("; ")));
    }

    let total = weights.sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ScorecardError::InvalidWeight(format!(
            "total weight must be a positive finite number, got {}",
            total
        )));
    }

    let normalized = if weights.team == weights.product && weights.product == weights.market {
        let third = 1.0 / 3.0;
        NormalizedWeights {
            team: third,
            product: third,
            market: third,
        }
    } else {
        NormalizedWeights {
            team: weights.team / total,
            product: weights.product / total,
            market: weights.market / total,
        }
    };

    debug!(
        team = normalized.team,
        product = normalized.product,
        market = normalized.market,
        "normalized factor weights"
    );
    Ok(normalized)
}
