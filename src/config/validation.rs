use super::ScorecardFile;
use crate::scoring::{weight_errors, Rating, MAX_COMMENT_CHARS};

/// Validate a scorecard file before it is scored.
/// Returns all validation errors at once (not just the first).
pub fn validate_scorecard_file(file: &ScorecardFile) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(weights) = &file.weights {
        if !file.equal_weights {
            errors.extend(weight_errors(weights));
        }
    }

    for (name, entry) in &file.subfactors {
        if let Some(rating) = entry.rating {
            if Rating::new(rating).is_none() {
                errors.push(format!(
                    "subfactors.{}.rating: must be between {} and {}, got {}",
                    name.key(),
                    Rating::MIN,
                    Rating::MAX,
                    rating
                ));
            }
        }
        let chars = entry.comment.chars().count();
        if chars > MAX_COMMENT_CHARS {
            errors.push(format!(
                "subfactors.{}.comment: {} characters exceeds the limit of {}",
                name.key(),
                chars,
                MAX_COMMENT_CHARS
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
