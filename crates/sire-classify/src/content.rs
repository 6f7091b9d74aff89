//! Content-shape predicates for the fallback classification pass.
//!
//! When headers give nothing away, a column can still be recognized by what
//! its cells look like: document numbers, calendar dates or country names.

use std::sync::LazyLock;

use regex::Regex;

use sire_reference::CountryTable;

/// Cells sampled from a column when probing content.
pub const SAMPLE_SIZE: usize = 10;

static DOCUMENT_NUMBER_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Typical passport shape: one or two letters then 6-9 digits.
        r"^[A-Za-z]{1,2}\d{6,9}$",
        // Digit-only national ids.
        r"^\d{8,12}$",
        // Generic alphanumeric ids.
        r"^[A-Za-z0-9]{6,12}$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("document number pattern"))
    .collect()
});

static BIRTH_DATE_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
        r"^\d{4}[/-]\d{1,2}[/-]\d{1,2}",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("birth date pattern"))
    .collect()
});

pub fn looks_like_document_number(value: &str) -> bool {
    let trimmed = value.trim();
    DOCUMENT_NUMBER_REGEXES.iter().any(|re| re.is_match(trimmed))
}

/// Prefix match on purpose: exports often append a time of day.
pub fn looks_like_date(value: &str) -> bool {
    let trimmed = value.trim();
    BIRTH_DATE_REGEXES.iter().any(|re| re.is_match(trimmed))
}

pub fn resolves_as_country(value: &str, countries: &CountryTable) -> bool {
    countries.lookup(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passport_and_cedula_shapes_match() {
        assert!(looks_like_document_number("AB123456"));
        assert!(looks_like_document_number("1032456789"));
        assert!(looks_like_document_number("X99887766"));
    }

    #[test]
    fn names_and_short_codes_do_not_match() {
        assert!(!looks_like_document_number("JUAN PEREZ"));
        assert!(!looks_like_document_number("123"));
        assert!(!looks_like_document_number(""));
    }

    #[test]
    fn dates_match_with_and_without_time() {
        assert!(looks_like_date("15/03/2024"));
        assert!(looks_like_date("2024-03-15"));
        assert!(looks_like_date("15/03/2024 14:30"));
        assert!(!looks_like_date("tomorrow"));
        assert!(!looks_like_date("AB123456"));
    }
}
