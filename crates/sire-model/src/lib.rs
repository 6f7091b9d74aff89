//! Shared data model for SIRE conversion.
//!
//! The vocabulary every other crate speaks: semantic fields, the raw input
//! table, the column mapping, the thirteen-field submission record and the
//! per-row outcomes. Pure data and invariants, no I/O and no policy.

pub mod context;
pub mod field;
pub mod mapping;
pub mod outcome;
pub mod record;
pub mod table;
pub mod text;

pub use context::{DEFAULT_REPORT_CITY, MovementType, OperatorContext};
pub use field::SemanticField;
pub use mapping::{Confidence, FieldMapping, MatchOrigin, ResolvedColumn};
pub use outcome::{
    ConversionSummary, ExclusionReason, RowOutcome, RowStatus, RowWarning, WarningKind,
};
pub use record::SireRecord;
pub use table::RawTable;
