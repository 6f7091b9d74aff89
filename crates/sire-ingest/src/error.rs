//! Error types for police-report ingestion.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited content could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Excel workbooks are an export-side concern, not read here.
    #[error("{path}: Excel workbooks are not read directly; export the sheet as CSV and retry")]
    WorkbookNotSupported { path: PathBuf },

    /// Extension is none of .csv, .tsv, .tab, .txt.
    #[error("unsupported input format for {path}: expected .csv, .tsv, .tab or .txt")]
    UnsupportedFormat { path: PathBuf },

    /// The file parsed but contained no usable rows.
    #[error("no rows found in {path}")]
    EmptyTable { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
