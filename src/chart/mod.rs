//! Chart-ready series for the radar chart renderer.
//!
//! Axis order is always Team, Product, Market so repeated renders line up.

use serde::Serialize;

use crate::scoring::{FactorName, ScoreSummary, MAX_POSSIBLE_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: f64,
}

/// Factor scores, one point per axis, values on the 1-5 scale.
pub fn to_chart_series(summary: &ScoreSummary) -> [ChartPoint; 3] {
    FactorName::ALL.map(|name| ChartPoint {
        label: name.label(),
        value: summary.factor(name).score,
    })
}

/// Factor weights scaled onto the same 0-5 radial axis as the scores.
pub fn weight_series(summary: &ScoreSummary) -> [ChartPoint; 3] {
    FactorName::ALL.map(|name| ChartPoint {
        label: name.label(),
        value: summary.factor(name).weight * MAX_POSSIBLE_SCORE,
    })
}
