//! CSV rendering of an [`ExportRecord`].
//!
//! The column order and header names are a compatibility contract for
//! anything parsing the output. Sections are separated by a blank line:
//!
//! ```text
//! Factor,Subfactor,Score,Comment,Weight
//! Team,Ability,5,Repeat founders,0.50
//! ...
//!
//! Factor,Average Score,Weight
//! Team,5.00,0.50
//! ...
//!
//! Total Score,3.50
//! Max Possible Score,5.00
//! Percentage of Max Score,70.00%
//! ```

use tracing::debug;

use super::record::{format_decimal, format_percentage, ExportRecord};
use crate::error::{Result, ScorecardError};

pub const ROW_HEADER: [&str; 5] = ["Factor", "Subfactor", "Score", "Comment", "Weight"];
pub const FACTOR_HEADER: [&str; 3] = ["Factor", "Average Score", "Weight"];

/// Render the record as UTF-8 CSV bytes with `\n` line endings.
pub fn to_csv(record: &ExportRecord) -> Result<Vec<u8>> {
    record.validate()?;

    let mut out = Vec::new();

    let rows = record.rows.iter().map(|r| {
        vec![
            r.factor.label().to_string(),
            r.subfactor.label().to_string(),
            r.rating.to_string(),
            r.comment.clone(),
            format_decimal(r.weight),
        ]
    });
    write_section(&mut out, Some(&ROW_HEADER[..]), rows)?;
    out.push(b'\n');

    let factors = record.factor_scores.iter().map(|f| {
        vec![
            f.name.label().to_string(),
            format_decimal(f.score),
            format_decimal(f.weight),
        ]
    });
    write_section(&mut out, Some(&FACTOR_HEADER[..]), factors)?;
    out.push(b'\n');

    let totals = [
        vec!["Total Score".to_string(), format_decimal(record.overall)],
        vec![
            "Max Possible Score".to_string(),
            format_decimal(record.max_possible()),
        ],
        vec![
            "Percentage of Max Score".to_string(),
            format_percentage(record.percentage()),
        ],
    ];
    write_section(&mut out, None, totals)?;

    debug!(bytes = out.len(), "rendered csv export");
    Ok(out)
}

fn write_section<I>(out: &mut Vec<u8>, header: Option<&[&str]>, rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    if let Some(header) = header {
        writer.write_record(header).map_err(encode_error)?;
    }
    for row in rows {
        writer.write_record(&row).map_err(encode_error)?;
    }
    writer.flush().map_err(|e| ScorecardError::Io {
        path: "<csv buffer>".to_string(),
        source: e,
    })
}

fn encode_error(e: csv::Error) -> ScorecardError {
    ScorecardError::InvalidExportData(format!("csv encoding failed: {}", e))
}
