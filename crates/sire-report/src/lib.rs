//! Output generation for SIRE conversions.
//!
//! Three artifacts come out of a conversion run:
//!
//! - the **submission file**: converted records only, 13 tab-separated
//!   fields per line, ready to upload;
//! - the **text report**: operator-facing counts and per-row detail;
//! - the **JSON report**: the full [`sire_engine::BatchOutcome`] for
//!   machine consumption.

mod error;
mod json;
mod text;
mod writer;

pub use error::{ReportError, Result};
pub use json::render_json_report;
pub use text::render_text_report;
pub use writer::{
    ReportFormat, default_report_filename, default_submission_filename, write_report,
    write_submission,
};
