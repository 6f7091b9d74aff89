//! Document type resolution and document number validation.

use thiserror::Error;

use sire_model::Confidence;
use sire_model::text::fold_for_lookup;
use sire_reference::{DEFAULT_DOCUMENT_TYPE_CODE, DocumentTypeTable};

/// Keyword fallbacks tried when the document-type table has no match.
/// The first group containing a keyword of the folded label wins.
const KEYWORD_GROUPS: [(&str, &[&str]); 4] = [
    ("3", &["PASAP", "PASSPO", "PP"]),
    ("5", &["CEDULA", "EXTRAN"]),
    ("46", &["DIPLOM", "CARNE"]),
    ("52", &["PPT", "PROTEC", "TEMPORAL"]),
];

/// Where a document-type code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentTypeOrigin {
    /// The reference table recognized the label.
    Table,
    /// A keyword group recognized the label.
    Keyword,
    /// Nothing matched; the passport default was applied.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTypeResolution {
    pub code: String,
    pub confidence: Confidence,
    pub origin: DocumentTypeOrigin,
}

/// Resolves a document-type label ("Passport", "C.E.", "ppt") to its SIRE
/// code. Unmatched and empty labels both fall back to the passport default;
/// the origin tells the caller which case it was looking at.
pub fn resolve_document_type(raw: &str, table: &DocumentTypeTable) -> DocumentTypeResolution {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        if let Some(entry) = table.lookup(trimmed) {
            return DocumentTypeResolution {
                code: entry.code.clone(),
                confidence: Confidence::High,
                origin: DocumentTypeOrigin::Table,
            };
        }
        let folded = fold_for_lookup(trimmed);
        for (code, keywords) in KEYWORD_GROUPS {
            if keywords.iter().any(|keyword| folded.contains(keyword)) {
                return DocumentTypeResolution {
                    code: code.to_string(),
                    confidence: Confidence::Medium,
                    origin: DocumentTypeOrigin::Keyword,
                };
            }
        }
    }
    DocumentTypeResolution {
        code: DEFAULT_DOCUMENT_TYPE_CODE.to_string(),
        confidence: Confidence::Low,
        origin: DocumentTypeOrigin::Default,
    }
}

/// Strings spreadsheets use where a document number is missing.
const PLACEHOLDERS: [&str; 5] = ["NAN", "NONE", "NULL", "N/A", "-"];

/// Accepted document number length range, in characters.
const MIN_LEN: usize = 5;
const MAX_LEN: usize = 20;

/// Why a document number was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentNumberError {
    #[error("document number is empty")]
    Empty,
    #[error("document number is a placeholder")]
    Placeholder,
    #[error("document number has {0} characters, minimum is 5")]
    TooShort(usize),
    #[error("document number has {0} characters, maximum is 20")]
    TooLong(usize),
    #[error("document number is one repeated character")]
    RepeatedCharacter,
}

/// Validates and canonicalizes a document number: trimmed, uppercased, and
/// checked against length and junk-value rules.
pub fn validate_document_number(raw: &str) -> Result<String, DocumentNumberError> {
    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(DocumentNumberError::Empty);
    }
    if PLACEHOLDERS.contains(&normalized.as_str()) {
        return Err(DocumentNumberError::Placeholder);
    }
    let length = normalized.chars().count();
    if length < MIN_LEN {
        return Err(DocumentNumberError::TooShort(length));
    }
    if length > MAX_LEN {
        return Err(DocumentNumberError::TooLong(length));
    }
    // "AAAAA" or "0-0-0-0-0" is filler, not a document.
    let mut meaningful = normalized.chars().filter(|c| *c != '-');
    if let Some(first) = meaningful.next() {
        if meaningful.all(|c| c == first) {
            return Err(DocumentNumberError::RepeatedCharacter);
        }
    }
    Ok(normalized)
}
