//! Batch conversion: classify once, assemble every row, summarize.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use sire_classify::ColumnClassifier;
use sire_model::{
    ConversionSummary, FieldMapping, OperatorContext, RawTable, RowOutcome, SireRecord,
};
use sire_reference::ReferenceStore;

use crate::assembler::RowAssembler;

/// Everything one conversion run produced: the column mapping the
/// classifier settled on, one outcome per input row and the batch counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub mapping: FieldMapping,
    pub outcomes: Vec<RowOutcome>,
    pub summary: ConversionSummary,
}

impl BatchOutcome {
    /// Submission lines for the converted rows, in input order.
    pub fn submission_lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(RowOutcome::record)
            .map(SireRecord::to_line)
            .collect()
    }
}

/// Runs the full pipeline over one in-memory table.
///
/// The classifier runs exactly once per table; rows are then assembled in
/// input order, so the submission file preserves the source ordering.
pub struct BatchConverter<'a> {
    store: &'a ReferenceStore,
}

impl<'a> BatchConverter<'a> {
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    pub fn convert(&self, table: &RawTable, context: &OperatorContext) -> BatchOutcome {
        let span = info_span!(
            "convert",
            rows = table.row_count(),
            columns = table.width(),
            movement = %context.movement
        );
        let _guard = span.enter();

        let mapping = ColumnClassifier::new(self.store).classify(table, context.movement);
        let mut assembler = RowAssembler::new(self.store, &mapping, context);
        let outcomes: Vec<RowOutcome> = table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| assembler.assemble(index, row))
            .collect();
        let summary = ConversionSummary::from_outcomes(&outcomes);
        info!(
            total = summary.total_rows,
            converted = summary.converted,
            clean = summary.clean,
            with_warnings = summary.with_warnings,
            excluded = summary.excluded_colombian,
            "batch conversion finished"
        );
        BatchOutcome {
            mapping,
            outcomes,
            summary,
        }
    }
}
