//! Embedded SIRE reference data: country codes, Colombian city codes and
//! document type codes, with case- and accent-insensitive lookup.
//!
//! All matching is deterministic. Exact folded-alias matches always win over
//! substring matches, and substring scans walk entries in published-list
//! order. There is deliberately no fuzzy matching at this layer: a token the
//! tables cannot explain comes back as `None` so callers can surface it as a
//! warning instead of a silent guess.

pub mod city;
pub mod country;
pub mod document;
pub mod error;
mod loader;
pub mod store;

pub use city::{CityEntry, CityMatch, CityTable};
pub use country::{CountryEntry, CountryMatch, CountryTable, MatchKind};
pub use document::{DocumentTypeEntry, DocumentTypeTable};
pub use error::{ReferenceError, Result};
pub use store::{
    ReferenceStore, COLOMBIA_CODE, DEFAULT_DESTINATION_CODE, DEFAULT_DOCUMENT_TYPE_CODE,
    UNKNOWN_COUNTRY_CODE,
};
