use serde::{Deserialize, Serialize};

use crate::field::SemanticField;
use crate::record::SireRecord;

/// Category of a row-level warning. Warnings degrade a row, they never
/// remove it from the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No source column was found for a required field.
    UnresolvedColumn,
    /// The mapped cell was empty.
    MissingValue,
    /// The document number failed validation.
    InvalidDocument,
    /// The document-type text matched nothing; the default code was used.
    UnknownDocumentType,
    /// The nationality token matched no country; the sentinel was emitted.
    UnknownCountry,
    /// A procedence/destination token matched neither a city nor a country.
    UnknownPlace,
    /// No date format matched the cell.
    UnparseableDate,
    /// The date parsed day-first but month-first was also plausible.
    AmbiguousDate,
    /// The value was filled in from a neighbouring field.
    InferredValue,
    /// Same document, date and movement as an earlier row.
    DuplicateRow,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::UnresolvedColumn => "unresolved_column",
            WarningKind::MissingValue => "missing_value",
            WarningKind::InvalidDocument => "invalid_document",
            WarningKind::UnknownDocumentType => "unknown_document_type",
            WarningKind::UnknownCountry => "unknown_country",
            WarningKind::UnknownPlace => "unknown_place",
            WarningKind::UnparseableDate => "unparseable_date",
            WarningKind::AmbiguousDate => "ambiguous_date",
            WarningKind::InferredValue => "inferred_value",
            WarningKind::DuplicateRow => "duplicate_row",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One field-level issue recorded while converting a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    pub kind: WarningKind,
    pub field: Option<SemanticField>,
    pub message: String,
}

impl RowWarning {
    pub fn new(kind: WarningKind, field: SemanticField, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: Some(field),
            message: message.into(),
        }
    }

    pub fn row_level(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }
}

/// Why a row was left out of the submission file. Exclusion only happens on
/// explicit operator request, never because of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Nationality resolved to Colombia and the operator asked to drop
    /// Colombian nationals (SIRE takes no reports on them).
    ColombianNational,
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::ColombianNational => "colombian_national",
        }
    }
}

/// What happened to one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Converted {
        record: SireRecord,
        warnings: Vec<RowWarning>,
    },
    Excluded {
        reason: ExclusionReason,
    },
}

/// Per-row result, indexed by the row's position in the input table
/// (0-based, header row not counted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row: usize,
    #[serde(flatten)]
    pub status: RowStatus,
}

impl RowOutcome {
    pub fn converted(row: usize, record: SireRecord, warnings: Vec<RowWarning>) -> Self {
        Self {
            row,
            status: RowStatus::Converted { record, warnings },
        }
    }

    pub fn excluded(row: usize, reason: ExclusionReason) -> Self {
        Self {
            row,
            status: RowStatus::Excluded { reason },
        }
    }

    pub fn record(&self) -> Option<&SireRecord> {
        match &self.status {
            RowStatus::Converted { record, .. } => Some(record),
            RowStatus::Excluded { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[RowWarning] {
        match &self.status {
            RowStatus::Converted { warnings, .. } => warnings,
            RowStatus::Excluded { .. } => &[],
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings().is_empty()
    }
}

/// Batch-level counts shown to the operator after a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub total_rows: usize,
    pub converted: usize,
    /// Converted rows that carried no warnings at all.
    pub clean: usize,
    pub with_warnings: usize,
    pub excluded_colombian: usize,
    pub duplicate_rows: usize,
    pub inferred_fields: usize,
}

impl ConversionSummary {
    pub fn from_outcomes(outcomes: &[RowOutcome]) -> Self {
        let mut summary = ConversionSummary {
            total_rows: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match &outcome.status {
                RowStatus::Converted { warnings, .. } => {
                    summary.converted += 1;
                    if warnings.is_empty() {
                        summary.clean += 1;
                    } else {
                        summary.with_warnings += 1;
                    }
                    for warning in warnings {
                        match warning.kind {
                            WarningKind::DuplicateRow => summary.duplicate_rows += 1,
                            WarningKind::InferredValue => summary.inferred_fields += 1,
                            _ => {}
                        }
                    }
                }
                RowStatus::Excluded {
                    reason: ExclusionReason::ColombianNational,
                } => summary.excluded_colombian += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converted(row: usize, warnings: Vec<RowWarning>) -> RowOutcome {
        RowOutcome::converted(row, SireRecord::default(), warnings)
    }

    #[test]
    fn summary_counts_by_status_and_kind() {
        let outcomes = vec![
            converted(0, vec![]),
            converted(
                1,
                vec![RowWarning::new(
                    WarningKind::InferredValue,
                    SemanticField::Procedence,
                    "procedence inferred from nationality",
                )],
            ),
            converted(
                2,
                vec![RowWarning::row_level(
                    WarningKind::DuplicateRow,
                    "same document and date as row 2",
                )],
            ),
            RowOutcome::excluded(3, ExclusionReason::ColombianNational),
        ];

        let summary = ConversionSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.converted, 3);
        assert_eq!(summary.clean, 1);
        assert_eq!(summary.with_warnings, 2);
        assert_eq!(summary.excluded_colombian, 1);
        assert_eq!(summary.duplicate_rows, 1);
        assert_eq!(summary.inferred_fields, 1);
    }

    #[test]
    fn excluded_rows_have_no_record() {
        let outcome = RowOutcome::excluded(7, ExclusionReason::ColombianNational);
        assert!(outcome.record().is_none());
        assert!(!outcome.has_warnings());
    }
}
