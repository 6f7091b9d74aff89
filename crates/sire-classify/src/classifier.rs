//! Three-pass column classification.

use std::collections::BTreeSet;

use tracing::{debug, info};

use sire_model::{
    Confidence, FieldMapping, MatchOrigin, MovementType, RawTable, ResolvedColumn, SemanticField,
};
use sire_reference::ReferenceStore;

use crate::content;
use crate::score::{normalize, score_header};
use crate::synonyms::vocabulary_for;

/// Minimum score for a high-confidence header claim.
const HIGH_THRESHOLD: f32 = 0.8;
/// Minimum score for a medium-confidence header claim.
const MEDIUM_THRESHOLD: f32 = 0.4;
/// Fields worth a content probe when headers resolve nothing.
const CONTENT_FIELDS: [SemanticField; 3] = [
    SemanticField::DocumentNumber,
    SemanticField::BirthDate,
    SemanticField::Nationality,
];

/// Maps table columns onto semantic fields.
///
/// Classification is deterministic: the same table and direction always
/// produce the same mapping. Each column is claimed by at most one field and
/// fields claim in [`SemanticField::CLASSIFICATION_ORDER`].
pub struct ColumnClassifier<'a> {
    store: &'a ReferenceStore,
}

impl<'a> ColumnClassifier<'a> {
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    pub fn classify(&self, table: &RawTable, movement: MovementType) -> FieldMapping {
        let mut mapping = FieldMapping::new();
        let mut used: BTreeSet<usize> = BTreeSet::new();

        for field in SemanticField::CLASSIFICATION_ORDER {
            claim_by_header(
                table,
                movement,
                field,
                HIGH_THRESHOLD,
                Confidence::High,
                &mut mapping,
                &mut used,
            );
        }
        for field in SemanticField::CLASSIFICATION_ORDER {
            if mapping.is_resolved(field) {
                continue;
            }
            claim_by_header(
                table,
                movement,
                field,
                MEDIUM_THRESHOLD,
                Confidence::Medium,
                &mut mapping,
                &mut used,
            );
        }
        for field in CONTENT_FIELDS {
            if mapping.is_resolved(field) {
                continue;
            }
            self.claim_by_content(table, movement, field, &mut mapping, &mut used);
        }

        info!(
            resolved = mapping.resolved_count(),
            unresolved = mapping.unresolved_required().len(),
            "column classification finished"
        );
        mapping
    }

    /// Probes cell content for fields the headers did not resolve.
    fn claim_by_content(
        &self,
        table: &RawTable,
        movement: MovementType,
        field: SemanticField,
        mapping: &mut FieldMapping,
        used: &mut BTreeSet<usize>,
    ) {
        let vocabulary = vocabulary_for(field, movement);
        for (index, header) in table.headers.iter().enumerate() {
            if used.contains(&index) || is_excluded(header, vocabulary.exclusions) {
                continue;
            }
            let sample: Vec<&str> = table
                .column_values(index)
                .filter(|value| !value.is_empty())
                .take(content::SAMPLE_SIZE)
                .collect();
            if sample.is_empty() {
                continue;
            }
            let matches = sample
                .iter()
                .filter(|value| self.matches_content(field, value))
                .count();
            // Claim when at least half the sample fits the shape.
            if matches * 2 >= sample.len() {
                debug!(
                    field = %field,
                    column = %header,
                    matches,
                    sampled = sample.len(),
                    "column claimed by content"
                );
                mapping.claim(
                    field,
                    ResolvedColumn {
                        index,
                        header: header.clone(),
                        confidence: Confidence::Low,
                        origin: MatchOrigin::Content,
                    },
                );
                used.insert(index);
                return;
            }
        }
    }

    fn matches_content(&self, field: SemanticField, value: &str) -> bool {
        match field {
            SemanticField::DocumentNumber => content::looks_like_document_number(value),
            SemanticField::BirthDate => content::looks_like_date(value),
            SemanticField::Nationality => {
                content::resolves_as_country(value, &self.store.countries)
            }
            _ => false,
        }
    }
}

/// Scores every free column for `field` and claims the best one at or above
/// `threshold`. Ties keep the leftmost column.
fn claim_by_header(
    table: &RawTable,
    movement: MovementType,
    field: SemanticField,
    threshold: f32,
    confidence: Confidence,
    mapping: &mut FieldMapping,
    used: &mut BTreeSet<usize>,
) {
    let vocabulary = vocabulary_for(field, movement);
    let mut best: Option<(usize, f32, String)> = None;
    for (index, header) in table.headers.iter().enumerate() {
        if used.contains(&index) || is_excluded(header, vocabulary.exclusions) {
            continue;
        }
        let score = score_header(header, vocabulary.synonyms);
        if score.score >= threshold && best.as_ref().is_none_or(|(_, top, _)| score.score > *top) {
            best = Some((index, score.score, score.explain()));
        }
    }
    if let Some((index, score, explanation)) = best {
        debug!(
            field = %field,
            column = %table.headers[index],
            score,
            %explanation,
            "column claimed by header"
        );
        mapping.claim(
            field,
            ResolvedColumn {
                index,
                header: table.headers[index].clone(),
                confidence,
                origin: MatchOrigin::Header,
            },
        );
        used.insert(index);
    }
}

fn is_excluded(header: &str, exclusions: &[&str]) -> bool {
    if exclusions.is_empty() {
        return false;
    }
    let normalized = normalize(header);
    exclusions
        .iter()
        .any(|keyword| normalized.contains(keyword))
}
