use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::{FactorWeights, SubfactorName};

/// On-disk scorecard: raw weights plus per-subfactor ratings and comments.
///
/// Example YAML:
/// ```yaml
/// weights: { team: 0.5, product: 0.3, market: 0.2 }
/// subfactors:
///   ability: { rating: 4, comment: "Second-time founders" }
///   x-factor: { rating: 5 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScorecardFile {
    /// Raw factor weights; normalized before scoring. Defaults to 0.5/0.3/0.2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<FactorWeights>,

    /// Ignore `weights` and weigh all factors equally.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub equal_weights: bool,

    /// Ratings and comments keyed by subfactor (`ability`, `x-factor`, ...).
    #[serde(default)]
    pub subfactors: BTreeMap<SubfactorName, SubfactorEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SubfactorEntry {
    /// 1-5; unrated subfactors score as 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_parse() {
        let file: ScorecardFile = serde_saphyr::from_str("{}").unwrap();
        assert!(file.weights.is_none());
        assert!(!file.equal_weights);
        assert!(file.subfactors.is_empty());
    }

    #[test]
    fn test_full_file_parse() {
        let yaml = r#"
weights:
  team: 2
  product: 1
  market: 1
subfactors:
  ability:
    rating: 5
    comment: "Second-time founders, sold last company"
  x-factor:
    rating: 4
  dynamics:
    comment: "Crowded, but incumbents are slow"
"#;
        let file: ScorecardFile = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(file.weights, Some(FactorWeights::new(2.0, 1.0, 1.0)));
        assert_eq!(file.subfactors.len(), 3);
        assert_eq!(file.subfactors[&SubfactorName::Ability].rating, Some(5));
        assert_eq!(file.subfactors[&SubfactorName::XFactor].comment, "");
        assert_eq!(file.subfactors[&SubfactorName::Dynamics].rating, None);
    }

    #[test]
    fn test_unknown_subfactor_rejected() {
        let yaml = r#"
subfactors:
  charisma:
    rating: 5
"#;
        assert!(serde_saphyr::from_str::<ScorecardFile>(yaml).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "base_score: 100\n";
        assert!(serde_saphyr::from_str::<ScorecardFile>(yaml).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut file = ScorecardFile {
            weights: Some(FactorWeights::default()),
            equal_weights: false,
            subfactors: BTreeMap::new(),
        };
        file.subfactors.insert(
            SubfactorName::Growth,
            SubfactorEntry {
                rating: Some(4),
                comment: "Doubling yearly".to_string(),
            },
        );
        let yaml = serde_saphyr::to_string(&file).unwrap();
        let parsed: ScorecardFile = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(file, parsed);
    }
}
