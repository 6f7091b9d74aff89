//! End-to-end conversion tests: raw table in, submission lines out.

use sire_engine::BatchConverter;
use sire_model::{
    MovementType, OperatorContext, RawTable, SemanticField, SireRecord, WarningKind,
};
use sire_reference::ReferenceStore;

fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    let mut table = RawTable::new(headers.iter().map(|h| (*h).to_string()).collect());
    for row in rows {
        table.push_row(row.iter().map(|v| (*v).to_string()).collect());
    }
    table
}

fn spanish_headers() -> Vec<&'static str> {
    vec![
        "Tipo de Documento",
        "Numero de Identificacion",
        "Nombres",
        "Primer Apellido",
        "Nacionalidad",
        "Fecha Nacimiento",
        "Fecha Entrada",
        "Procedencia",
        "Destino",
    ]
}

#[test]
fn well_labeled_table_converts_cleanly() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let table = table(
        &spanish_headers(),
        &[
            &[
                "Pasaporte",
                "AB123456",
                "John",
                "Smith",
                "Estados Unidos",
                "23/06/1990",
                "15/03/2024",
                "Estados Unidos",
                "Medellín",
            ],
            &[
                "Cédula de Extranjería",
                "CE7654321",
                "María José",
                "García López",
                "Perú",
                "17/11/1985",
                "15/03/2024",
                "Perú",
                "Bogotá",
            ],
        ],
    );
    let context = OperatorContext::new("10675", MovementType::Entry);

    let batch = BatchConverter::new(&store).convert(&table, &context);

    assert!(batch.mapping.unresolved_required().is_empty());
    assert_eq!(batch.summary.total_rows, 2);
    assert_eq!(batch.summary.converted, 2);
    assert_eq!(batch.summary.clean, 2);
    assert_eq!(batch.summary.excluded_colombian, 0);

    let lines = batch.submission_lines();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(line.split('\t').count(), SireRecord::FIELD_COUNT);
    }
    assert_eq!(
        lines[0],
        "10675\t5001\t3\tAB123456\t249\tSMITH\t\tJOHN\tE\t15/03/2024\t249\t5001\t23/06/1990"
    );
    assert_eq!(
        lines[1],
        "10675\t5001\t5\tCE7654321\t589\tGARCÍA\tLÓPEZ\tMARÍA JOSÉ\tE\t15/03/2024\t589\t11001\t17/11/1985"
    );
}

#[test]
fn converted_plus_excluded_always_equals_total() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let table = table(
        &spanish_headers(),
        &[
            &[
                "Pasaporte",
                "AB123456",
                "John",
                "Smith",
                "Estados Unidos",
                "23/06/1990",
                "15/03/2024",
                "",
                "",
            ],
            // Colombian national.
            &[
                "Cédula",
                "11223344",
                "Laura",
                "Restrepo",
                "Colombia",
                "02/04/1992",
                "15/03/2024",
                "Bogotá",
                "Medellín",
            ],
            // Garbage everywhere still converts.
            &["???", "X", "", "", "Narnia", "not a date", "also no", "", ""],
        ],
    );
    let context = OperatorContext::new("10675", MovementType::Entry)
        .with_exclude_colombian_nationals(true);

    let batch = BatchConverter::new(&store).convert(&table, &context);

    assert_eq!(batch.summary.total_rows, 3);
    assert_eq!(batch.summary.excluded_colombian, 1);
    assert_eq!(batch.summary.converted, 2);
    assert_eq!(
        batch.summary.converted + batch.summary.excluded_colombian,
        batch.summary.total_rows
    );
    assert_eq!(batch.submission_lines().len(), 2);

    let garbage = &batch.outcomes[2];
    let record = garbage.record().expect("garbage row still converts");
    assert_eq!(record.nationality, "0");
    assert_eq!(record.movement_date, "");
    assert_eq!(record.destination, "169");
    assert!(garbage.has_warnings());
}

#[test]
fn colombians_convert_when_the_flag_is_off() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let table = table(
        &spanish_headers(),
        &[&[
            "Cédula",
            "11223344",
            "Laura",
            "Restrepo",
            "Colombia",
            "02/04/1992",
            "15/03/2024",
            "Bogotá",
            "Medellín",
        ]],
    );
    let context = OperatorContext::new("10675", MovementType::Entry);

    let batch = BatchConverter::new(&store).convert(&table, &context);

    assert_eq!(batch.summary.excluded_colombian, 0);
    assert_eq!(batch.summary.converted, 1);
    assert_eq!(batch.outcomes[0].record().unwrap().nationality, "169");
}

#[test]
fn duplicate_rows_warn_but_stay_in_the_output() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let guest: &[&str] = &[
        "Pasaporte",
        "AB123456",
        "John",
        "Smith",
        "Estados Unidos",
        "23/06/1990",
        "15/03/2024",
        "Estados Unidos",
        "Medellín",
    ];
    let table = table(&spanish_headers(), &[guest, guest]);
    let context = OperatorContext::new("10675", MovementType::Entry);

    let batch = BatchConverter::new(&store).convert(&table, &context);

    assert_eq!(batch.summary.converted, 2);
    assert_eq!(batch.summary.duplicate_rows, 1);
    assert_eq!(batch.submission_lines().len(), 2);
    assert!(
        batch.outcomes[1]
            .warnings()
            .iter()
            .any(|w| w.kind == WarningKind::DuplicateRow)
    );
}

#[test]
fn exit_batches_use_the_departure_column_and_code() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let table = table(
        &[
            "Numero de Identificacion",
            "Nombres",
            "Primer Apellido",
            "Nacionalidad",
            "Fecha Nacimiento",
            "Fecha Entrada",
            "Fecha Salida",
        ],
        &[&[
            "AB123456",
            "John",
            "Smith",
            "Estados Unidos",
            "23/06/1990",
            "10/03/2024",
            "15/03/2024",
        ]],
    );
    let context = OperatorContext::new("10675", MovementType::Exit);

    let batch = BatchConverter::new(&store).convert(&table, &context);

    let movement = batch.mapping.resolve(SemanticField::MovementDate).unwrap();
    assert_eq!(movement.header, "Fecha Salida");
    let record = batch.outcomes[0].record().unwrap();
    assert_eq!(record.movement_code, "S");
    assert_eq!(record.movement_date, "15/03/2024");
}

#[test]
fn nationality_aliases_resolve_and_unknown_tokens_degrade() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let table = table(
        &["Nationality", "Passport No"],
        &[
            &["Colombia", "AB123456"],
            &["COL", "CD789012"],
            &["xyzland", "EF345678"],
        ],
    );
    let context = OperatorContext::new("10675", MovementType::Entry);

    let batch = BatchConverter::new(&store).convert(&table, &context);

    let nationality = batch.mapping.resolve(SemanticField::Nationality).unwrap();
    assert_eq!(nationality.header, "Nationality");
    assert_eq!(batch.outcomes[0].record().unwrap().nationality, "169");
    assert_eq!(batch.outcomes[1].record().unwrap().nationality, "169");
    assert_eq!(batch.outcomes[2].record().unwrap().nationality, "0");
    assert!(
        batch.outcomes[2]
            .warnings()
            .iter()
            .any(|w| w.kind == WarningKind::UnknownCountry)
    );
}

#[test]
fn conversion_is_deterministic() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let table = table(
        &["Guest Name", "Country", "Passport No", "Check In"],
        &[
            &["Juan Carlos García López", "Chile", "AB123456", "15/03/2024"],
            &["Ana Torres", "Ecuador", "CD789012", "16/03/2024"],
        ],
    );
    let context = OperatorContext::new("10675", MovementType::Entry);
    let converter = BatchConverter::new(&store);

    let first = converter.convert(&table, &context);
    let second = converter.convert(&table, &context);

    assert_eq!(first, second);
}

#[test]
fn combined_name_tables_produce_split_names() {
    let store = ReferenceStore::builtin().expect("builtin tables");
    let table = table(
        &["Guest Name", "Country", "Passport No", "Check In"],
        &[&[
            "Juan Carlos García López",
            "Chile",
            "AB123456",
            "15/03/2024",
        ]],
    );
    let context = OperatorContext::new("10675", MovementType::Entry);

    let batch = BatchConverter::new(&store).convert(&table, &context);

    let record = batch.outcomes[0].record().unwrap();
    assert_eq!(record.given_names, "JUAN CARLOS");
    assert_eq!(record.first_surname, "GARCÍA");
    assert_eq!(record.second_surname, "LÓPEZ");
    assert!(batch.summary.inferred_fields >= 1);
}
