use super::weights::FactorWeights;

/// Longest comment accepted for a single subfactor.
pub const MAX_COMMENT_CHARS: usize = 280;

/// Problems with a raw weight triple, one message per offending field.
pub fn weight_errors(weights: &FactorWeights) -> Vec<String> {
    let mut errors = Vec::new();
    for (key, value) in [
        ("team", weights.team),
        ("product", weights.product),
        ("market", weights.market),
    ] {
        if !value.is_finite() {
            errors.push(format!("weights.{}: must be a finite number", key));
        } else if value <= 0.0 {
            errors.push(format!("weights.{}: must be positive, got {}", key, value));
        }
    }
    errors
}
