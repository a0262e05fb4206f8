mod schema;
mod validation;
pub mod init;

pub use schema::{ScorecardFile, SubfactorEntry};
pub use validation::validate_scorecard_file;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ScorecardError;
use crate::scoring::{normalize, FactorWeights, Rating, Scorecard, Subfactor};

/// Get the config directory path (~/.config/investment-scorecard/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("investment-scorecard")
}

/// Get the default scorecard path (~/.config/investment-scorecard/scorecard.yaml)
pub fn get_scorecard_path() -> PathBuf {
    get_config_dir().join("scorecard.yaml")
}

/// Load a scorecard file from YAML
///
/// # Arguments
///
/// * `path` - Optional path to the scorecard. If None, uses the default path.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read
/// - The YAML cannot be parsed
pub fn load_scorecard_file(path: Option<PathBuf>) -> Result<ScorecardFile> {
    let path = path.unwrap_or_else(get_scorecard_path);

    if !path.exists() {
        anyhow::bail!(
            "Scorecard not found at {}. Run `scorecard init` to create one.",
            path.display()
        );
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read scorecard at {}", path.display()))?;

    let file: ScorecardFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse scorecard: invalid YAML in {}", path.display()))?;

    info!(path = %path.display(), entries = file.subfactors.len(), "loaded scorecard");
    Ok(file)
}

/// Save a scorecard file atomically, creating parent directories as needed.
pub fn save_scorecard_file(path: &Path, file: &ScorecardFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(file)
        .map_err(|e| anyhow::anyhow!("Failed to serialize scorecard: {}", e))?;

    let mut out = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    out.write_all(yaml.as_bytes())
        .context("Failed to write scorecard")?;
    out.commit().context("Failed to save scorecard")?;

    Ok(())
}

/// Parse a `team,product,market` weight triple such as `2,1,1`.
///
/// Only the shape is checked here; positivity is the normalizer's job.
pub fn parse_weights(s: &str) -> std::result::Result<FactorWeights, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!(
            "expected three comma-separated weights (team,product,market), got {}",
            parts.len()
        ));
    }
    let mut values = [0.0; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", part))?;
    }
    Ok(FactorWeights::new(values[0], values[1], values[2]))
}

/// Which raw weights to feed the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WeightSource {
    /// Whatever the file says, or the defaults when it says nothing.
    #[default]
    File,
    /// Explicit weights, e.g. from `--weights`.
    Override(FactorWeights),
    /// All factors weighted equally.
    Equal,
}

/// Turn a scorecard file into scoring input.
///
/// Ratings must already be validated; an out-of-range rating is treated as
/// unrated here.
pub fn build_scorecard(file: &ScorecardFile, source: WeightSource) -> Result<Scorecard, ScorecardError> {
    let raw = match source {
        WeightSource::Equal => FactorWeights::equal(),
        WeightSource::Override(w) => w,
        WeightSource::File if file.equal_weights => FactorWeights::equal(),
        WeightSource::File => file.weights.unwrap_or_default(),
    };
    let weights = normalize(raw)?;

    let entries = file.subfactors.iter().map(|(name, entry)| Subfactor {
        name: *name,
        rating: entry.rating.and_then(Rating::new),
        comment: entry.comment.clone(),
    });
    let card = Scorecard::from_entries(weights, entries);
    debug!(?source, "built scorecard");
    Ok(card)
}
