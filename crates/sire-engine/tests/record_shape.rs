//! Structural guarantees that must hold for any input table whatsoever:
//! no row is dropped, and every emitted line is a well-formed 13-field
//! tab-delimited record.

use std::sync::LazyLock;

use proptest::prelude::*;

use sire_engine::BatchConverter;
use sire_model::{MovementType, OperatorContext, RawTable, SireRecord};
use sire_reference::ReferenceStore;

static STORE: LazyLock<ReferenceStore> =
    LazyLock::new(|| ReferenceStore::builtin().expect("builtin tables"));

/// Mix of headers the classifier knows and headers it does not.
fn header() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Tipo de Documento".to_string()),
        Just("Numero de Identificacion".to_string()),
        Just("Nombres".to_string()),
        Just("Primer Apellido".to_string()),
        Just("Nacionalidad".to_string()),
        Just("Fecha Nacimiento".to_string()),
        Just("Fecha Entrada".to_string()),
        Just("Procedencia".to_string()),
        Just("Destino".to_string()),
        "[a-zA-Z ]{0,12}",
    ]
}

fn movement() -> impl Strategy<Value = MovementType> {
    prop_oneof![Just(MovementType::Entry), Just(MovementType::Exit)]
}

proptest! {
    #[test]
    fn every_row_is_accounted_for_and_every_line_has_thirteen_fields(
        headers in proptest::collection::vec(header(), 1..10),
        rows in proptest::collection::vec(
            proptest::collection::vec(any::<String>(), 0..10),
            0..8,
        ),
        movement in movement(),
        exclude in any::<bool>(),
    ) {
        let mut table = RawTable::new(headers);
        for row in rows {
            table.push_row(row);
        }
        let context = OperatorContext::new("10675", movement)
            .with_exclude_colombian_nationals(exclude);

        let batch = BatchConverter::new(&STORE).convert(&table, &context);

        prop_assert_eq!(batch.outcomes.len(), table.row_count());
        prop_assert_eq!(
            batch.summary.converted + batch.summary.excluded_colombian,
            batch.summary.total_rows
        );

        let lines = batch.submission_lines();
        prop_assert_eq!(lines.len(), batch.summary.converted);
        for line in &lines {
            prop_assert_eq!(line.split('\t').count(), SireRecord::FIELD_COUNT);
            prop_assert!(!line.contains('\n'));
            prop_assert!(!line.contains('\r'));
        }
    }
}
