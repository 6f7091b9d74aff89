//! Nationality, procedence and destination code resolution.

use sire_model::Confidence;
use sire_reference::{MatchKind, ReferenceStore};

/// A reference code with the confidence of the lookup that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCode {
    pub code: String,
    pub confidence: Confidence,
}

fn confidence_for(kind: MatchKind) -> Confidence {
    match kind {
        MatchKind::Exact => Confidence::High,
        MatchKind::Partial => Confidence::Medium,
    }
}

/// Resolves a nationality token through the country table.
pub fn normalize_nationality(raw: &str, store: &ReferenceStore) -> Option<PlaceCode> {
    let hit = store.countries.lookup(raw)?;
    Some(PlaceCode {
        code: hit.entry.code.clone(),
        confidence: confidence_for(hit.kind),
    })
}

/// Resolves a procedence or destination token. Colombian cities take
/// precedence over countries, so "Medellín" emits the city code 5001 while
/// "Francia" emits the country code.
pub fn normalize_place(raw: &str, store: &ReferenceStore) -> Option<PlaceCode> {
    if let Some(hit) = store.cities.lookup(raw) {
        return Some(PlaceCode {
            code: hit.entry.code.clone(),
            confidence: confidence_for(hit.kind),
        });
    }
    let hit = store.countries.lookup(raw)?;
    Some(PlaceCode {
        code: hit.entry.code.clone(),
        confidence: confidence_for(hit.kind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ReferenceStore {
        ReferenceStore::builtin().expect("builtin tables")
    }

    #[test]
    fn nationality_exact_match_is_high_confidence() {
        let store = store();
        let place = normalize_nationality("Colombia", &store).unwrap();
        assert_eq!(place.code, "169");
        assert_eq!(place.confidence, Confidence::High);
    }

    #[test]
    fn nationality_partial_match_is_medium_confidence() {
        let store = store();
        let place = normalize_nationality("REPUBLICA DE COLOMBIA", &store).unwrap();
        assert_eq!(place.code, "169");
        assert_eq!(place.confidence, Confidence::Medium);
    }

    #[test]
    fn nationality_never_matches_cities() {
        let store = store();
        assert!(normalize_nationality("Medellín", &store).is_none());
    }

    #[test]
    fn place_prefers_city_over_country() {
        let store = store();
        assert_eq!(normalize_place("MEDELLIN", &store).unwrap().code, "5001");
        assert_eq!(normalize_place("Bogotá", &store).unwrap().code, "11001");
        assert_eq!(normalize_place("Francia", &store).unwrap().code, "275");
    }

    #[test]
    fn unknown_places_resolve_to_nothing() {
        let store = store();
        assert!(normalize_place("Narnia", &store).is_none());
        assert!(normalize_nationality("Narnia", &store).is_none());
    }
}
