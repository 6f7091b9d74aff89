//! Conversion engine for SIRE submissions.
//!
//! Ties the classifier and the normalizers together: a [`BatchConverter`]
//! maps the columns of a raw table once, then a [`RowAssembler`] builds one
//! thirteen-field record per row, degrading unresolvable fields to
//! sentinels instead of dropping rows.

pub mod assembler;
pub mod batch;

pub use assembler::RowAssembler;
pub use batch::{BatchConverter, BatchOutcome};
