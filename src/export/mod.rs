pub mod csv_writer;
pub mod pdf;
pub mod record;

pub use csv_writer::to_csv;
pub use pdf::to_pdf;
pub use record::{format_decimal, format_percentage, ExportRecord, ExportRow};

use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::{Result, ScorecardError};

/// Default file names offered for download.
pub const DEFAULT_PDF_NAME: &str = "investment_scorecard.pdf";
pub const DEFAULT_CSV_NAME: &str = "investment_scorecard.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn render(self, record: &ExportRecord) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Csv => to_csv(record),
            ExportFormat::Pdf => to_pdf(record),
        }
    }
}

/// Render `record` and write it to `path` atomically. Nothing is written
/// when the record fails validation.
pub fn write_export(path: &Path, format: ExportFormat, record: &ExportRecord) -> Result<usize> {
    let bytes = format.render(record)?;
    write_atomic(path, &bytes)?;
    info!(path = %path.display(), ?format, bytes = bytes.len(), "wrote export");
    Ok(bytes.len())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source| ScorecardError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = AtomicWriteFile::open(path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.commit().map_err(io_err)
}
