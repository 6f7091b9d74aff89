//! Report rendering and output-file tests.

use sire_engine::BatchOutcome;
use sire_model::{
    Confidence, ConversionSummary, ExclusionReason, FieldMapping, MatchOrigin, ResolvedColumn,
    RowOutcome, RowWarning, SemanticField, SireRecord, WarningKind,
};
use sire_report::{render_json_report, render_text_report, write_submission};

fn record(document: &str) -> SireRecord {
    SireRecord {
        establishment_code: "10675".to_string(),
        report_city_code: "5001".to_string(),
        document_type: "3".to_string(),
        document_number: document.to_string(),
        nationality: "589".to_string(),
        first_surname: "GARCÍA".to_string(),
        second_surname: String::new(),
        given_names: "JUAN".to_string(),
        movement_code: "E".to_string(),
        movement_date: "15/03/2024".to_string(),
        procedence: "589".to_string(),
        destination: "169".to_string(),
        birth_date: "23/06/1990".to_string(),
    }
}

fn batch(outcomes: Vec<RowOutcome>) -> BatchOutcome {
    let mut mapping = FieldMapping::new();
    mapping.claim(
        SemanticField::Nationality,
        ResolvedColumn {
            index: 0,
            header: "Nacionalidad".to_string(),
            confidence: Confidence::High,
            origin: MatchOrigin::Header,
        },
    );
    mapping.claim(
        SemanticField::DocumentNumber,
        ResolvedColumn {
            index: 1,
            header: "No. Documento".to_string(),
            confidence: Confidence::Medium,
            origin: MatchOrigin::Header,
        },
    );
    let summary = ConversionSummary::from_outcomes(&outcomes);
    BatchOutcome {
        mapping,
        outcomes,
        summary,
    }
}

fn sample_batch() -> BatchOutcome {
    let mut degraded = record("CD789012");
    degraded.nationality = "0".to_string();
    degraded.procedence = String::new();

    batch(vec![
        RowOutcome::converted(0, record("AB123456"), vec![]),
        RowOutcome::converted(
            1,
            degraded,
            vec![
                RowWarning::new(
                    WarningKind::UnknownCountry,
                    SemanticField::Nationality,
                    "no country matches `xyzland`",
                ),
                RowWarning::row_level(
                    WarningKind::DuplicateRow,
                    "same document and movement date as an earlier row",
                ),
            ],
        ),
        RowOutcome::excluded(2, ExclusionReason::ColombianNational),
    ])
}

#[test]
fn text_report_renders_counts_and_detail() {
    let report = render_text_report(&sample_batch());

    insta::assert_snapshot!(report, @r"
    ============================================================
    REPORTE DE CONVERSIÓN SIRE
    ============================================================

    Total registros procesados:  3
    Registros convertidos:       2
      Sin advertencias:          1
      Con advertencias:          1
    Colombianos excluidos:       1
    Duplicados detectados:       1
    Campos inferidos:            0

    ADVERTENCIAS:
      - Fila 2, nationality: no country matches `xyzland`
      - Fila 2: same document and movement date as an earlier row

    EXCLUIDOS:
      - Fila 3: nacional colombiano
    ");
}

#[test]
fn detail_sections_drop_out_when_empty() {
    let report = render_text_report(&batch(vec![RowOutcome::converted(
        0,
        record("AB123456"),
        vec![],
    )]));

    assert!(report.contains("Total registros procesados:  1"));
    assert!(!report.contains("ADVERTENCIAS"));
    assert!(!report.contains("EXCLUIDOS"));
}

#[test]
fn long_warning_lists_are_elided() {
    let outcomes: Vec<RowOutcome> = (0..25)
        .map(|row| {
            RowOutcome::converted(
                row,
                record("AB123456"),
                vec![RowWarning::new(
                    WarningKind::MissingValue,
                    SemanticField::BirthDate,
                    "date cell is blank",
                )],
            )
        })
        .collect();

    let report = render_text_report(&batch(outcomes));

    let shown = report
        .lines()
        .filter(|line| line.starts_with("  - Fila"))
        .count();
    assert_eq!(shown, 20);
    assert!(report.contains("  ... y 5 más"));
}

#[test]
fn json_report_round_trips() {
    let original = sample_batch();
    let rendered = render_json_report(&original).expect("serialize");

    let parsed: BatchOutcome = serde_json::from_str(&rendered).expect("parse back");
    assert_eq!(parsed, original);
}

#[test]
fn submission_file_holds_converted_records_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reporte_sire_test.txt");
    let batch = sample_batch();

    let written = write_submission(&batch, &path).expect("write");
    assert_eq!(written, 2);

    let content = std::fs::read_to_string(&path).expect("read back");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(line.split('\t').count(), SireRecord::FIELD_COUNT);
    }
    assert!(lines[0].contains("AB123456"));
    assert!(lines[1].contains("CD789012"));
}
