//! Field normalization for SIRE conversion.
//!
//! Turns raw spreadsheet cells into submission-ready values: dates to
//! `dd/mm/yyyy`, names cleaned and split, document types and numbers
//! validated, nationalities and places resolved to reference codes. Every
//! normalizer is a pure function of its input plus the reference tables;
//! nothing here decides whether a failure degrades or excludes a row, that
//! belongs to the engine.

pub mod date;
pub mod document;
pub mod name;
pub mod place;

pub use date::{DateNormalizer, DateOutcome, NormalizedDate};
pub use document::{
    DocumentNumberError, DocumentTypeOrigin, DocumentTypeResolution, resolve_document_type,
    validate_document_number,
};
pub use name::{SplitFullName, SplitSurnames, clean_name, split_full_name, split_surnames};
pub use place::{PlaceCode, normalize_nationality, normalize_place};
