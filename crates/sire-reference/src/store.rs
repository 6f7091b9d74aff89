//! Bundled reference tables behind one handle.

use crate::city::CityTable;
use crate::country::CountryTable;
use crate::document::DocumentTypeTable;
use crate::error::Result;

/// SIRE country code for Colombia.
pub const COLOMBIA_CODE: &str = "169";
/// "NO APLICA" sentinel emitted when a nationality cannot be resolved.
pub const UNKNOWN_COUNTRY_CODE: &str = "0";
/// Document type assumed when nothing better can be inferred (passport).
pub const DEFAULT_DOCUMENT_TYPE_CODE: &str = "3";
/// Destination emitted when no city can be resolved (Colombia catch-all).
pub const DEFAULT_DESTINATION_CODE: &str = "169";

const COUNTRIES_CSV: &str = include_str!("../data/countries.csv");
const CITIES_CSV: &str = include_str!("../data/cities.csv");
const DOCUMENT_TYPES_CSV: &str = include_str!("../data/document_types.csv");

/// The three lookup tables used across conversion.
///
/// Built once per process from the embedded CSV data and shared by
/// reference; conversions never mutate it.
#[derive(Clone, Debug)]
pub struct ReferenceStore {
    pub countries: CountryTable,
    pub cities: CityTable,
    pub document_types: DocumentTypeTable,
}

impl ReferenceStore {
    /// Parses the embedded tables shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            countries: CountryTable::from_csv(COUNTRIES_CSV)?,
            cities: CityTable::from_csv(CITIES_CSV)?,
            document_types: DocumentTypeTable::from_csv(DOCUMENT_TYPES_CSV)?,
        })
    }

    /// Assembles a store from pre-built tables. Intended for tests that want
    /// a small, fully controlled dataset.
    pub fn new(
        countries: CountryTable,
        cities: CityTable,
        document_types: DocumentTypeTable,
    ) -> Self {
        Self {
            countries,
            cities,
            document_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_parse() {
        let store = ReferenceStore::builtin().unwrap();
        assert_eq!(store.countries.len(), 249);
        assert_eq!(store.cities.len(), 78);
        assert_eq!(store.document_types.len(), 5);
    }

    #[test]
    fn builtin_constants_resolve() {
        let store = ReferenceStore::builtin().unwrap();
        assert_eq!(
            store.countries.get_by_code(COLOMBIA_CODE).unwrap().name,
            "COLOMBIA"
        );
        assert_eq!(
            store.countries.get_by_code(UNKNOWN_COUNTRY_CODE).unwrap().name,
            "NO APLICA"
        );
        assert_eq!(
            store
                .document_types
                .get_by_code(DEFAULT_DOCUMENT_TYPE_CODE)
                .unwrap()
                .name,
            "PASAPORTE"
        );
        assert_eq!(
            store.cities.get_by_code(DEFAULT_DESTINATION_CODE).unwrap().name,
            "COLOMBIA"
        );
    }
}
