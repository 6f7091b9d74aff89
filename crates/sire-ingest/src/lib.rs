//! Police-report file ingestion.
//!
//! Turns the delimited exports hotels actually produce into the rectangular
//! [`sire_model::RawTable`] the conversion engine consumes.

pub mod error;
pub mod table_reader;

pub use error::{IngestError, Result};
pub use table_reader::read_raw_table;
