//! Output files and their default names.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use sire_engine::BatchOutcome;

use crate::error::{ReportError, Result};

/// On-disk format of the optional conversion report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// Writes the submission file: converted records only, one tab-delimited
/// line per record, `\n` separated. Returns the number of records written.
pub fn write_submission(batch: &BatchOutcome, path: &Path) -> Result<usize> {
    let lines = batch.submission_lines();
    write_file(path, &lines.join("\n"))?;
    info!(path = %path.display(), records = lines.len(), "submission file written");
    Ok(lines.len())
}

/// Writes an already-rendered report (text or JSON) to `path`.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    write_file(path, content)?;
    info!(path = %path.display(), "conversion report written");
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Default submission filename, stamped to the minute:
/// `reporte_sire_<YYYY-MM-DD_HH-MM>.txt`.
pub fn default_submission_filename(at: DateTime<Utc>) -> String {
    format!("reporte_sire_{}.txt", at.format("%Y-%m-%d_%H-%M"))
}

/// Default report filename for the chosen format.
pub fn default_report_filename(format: ReportFormat, at: DateTime<Utc>) -> String {
    format!(
        "reporte_conversion_{}.{}",
        at.format("%Y-%m-%d_%H-%M"),
        format.extension()
    )
}
