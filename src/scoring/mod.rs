pub mod catalog;
pub mod weights;
pub mod engine;
pub mod validation;

pub use catalog::{describe_rating, FactorName, Rating, SubfactorName};
pub use weights::{normalize, FactorWeights, NormalizedWeights, WEIGHT_SUM_TOLERANCE};
pub use engine::{aggregate, Factor, FactorScore, ScoreSummary, Scorecard, Subfactor, MAX_POSSIBLE_SCORE};
pub use validation::{weight_errors, MAX_COMMENT_CHARS};
