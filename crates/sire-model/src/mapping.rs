use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::SemanticField;

/// How sure the engine is about a detected column or a normalized value.
///
/// High comes from exact matches, Medium from partial/containment evidence,
/// Low from content sampling or hard-coded defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// One step weaker, used when a value is inferred from a neighbouring
    /// field rather than read directly.
    #[must_use]
    pub fn downgraded(&self) -> Confidence {
        match self {
            Confidence::High => Confidence::Medium,
            Confidence::Medium | Confidence::Low => Confidence::Low,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which pass of the classifier claimed a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    /// Header text matched the field's synonym vocabulary.
    Header,
    /// Sampled cell content matched the field's value patterns.
    Content,
}

/// A source column claimed for one semantic field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    pub index: usize,
    pub header: String,
    pub confidence: Confidence,
    pub origin: MatchOrigin,
}

/// The classifier's verdict for one input file: every semantic field maps to
/// either a claimed source column or nothing.
///
/// Built once per table and immutable afterwards; an unresolved required
/// field is not an error here, it turns into per-row warnings downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    resolved: BTreeMap<SemanticField, ResolvedColumn>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a claimed column for `field`. Last write wins; the classifier
    /// never claims the same field twice.
    pub fn claim(&mut self, field: SemanticField, column: ResolvedColumn) {
        self.resolved.insert(field, column);
    }

    pub fn resolve(&self, field: SemanticField) -> Option<&ResolvedColumn> {
        self.resolved.get(&field)
    }

    pub fn is_resolved(&self, field: SemanticField) -> bool {
        self.resolved.contains_key(&field)
    }

    /// Required fields that ended up without a column.
    pub fn unresolved_required(&self) -> Vec<SemanticField> {
        SemanticField::CLASSIFICATION_ORDER
            .into_iter()
            .filter(|field| field.is_required() && !self.is_resolved(*field))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SemanticField, &ResolvedColumn)> {
        self.resolved.iter().map(|(field, column)| (*field, column))
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }
}
