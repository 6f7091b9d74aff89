use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sire_model::{Confidence, FieldMapping, MatchOrigin, RowOutcome, SemanticField};

use crate::commands::ConvertResult;

/// Per-row warnings shown before the list is elided.
const MAX_WARNING_LINES: usize = 20;

pub fn print_summary(result: &ConvertResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.submission {
        println!("Submission: {}", path.display());
    }
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    print_mapping_table(&result.batch.mapping);
    print_count_table(result);
    print_warnings(&result.batch.outcomes);
}

fn print_mapping_table(mapping: &FieldMapping) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Header"),
        header_cell("Confidence"),
        header_cell("Via"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for field in SemanticField::CLASSIFICATION_ORDER {
        match mapping.resolve(field) {
            Some(column) => {
                table.add_row(vec![
                    Cell::new(field.as_str()),
                    Cell::new(column.index + 1),
                    Cell::new(&column.header),
                    confidence_cell(column.confidence),
                    Cell::new(origin_label(column.origin)),
                ]);
            }
            None if field.is_required() => {
                let header = if splits_from_full_name(mapping, field) {
                    Cell::new("(split from full name)").fg(Color::Yellow)
                } else {
                    Cell::new("(unresolved)").fg(Color::Red)
                };
                table.add_row(vec![
                    Cell::new(field.as_str()),
                    dim_cell("-"),
                    header,
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
            // FullName only matters when it stands in for the split name
            // columns; unclaimed it is simply absent.
            None => {}
        }
    }
    println!("{table}");
}

fn print_count_table(result: &ConvertResult) {
    let summary = &result.batch.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Converted"),
        header_cell("Clean"),
        header_cell("Warnings"),
        header_cell("Excluded"),
        header_cell("Duplicates"),
        header_cell("Inferred"),
    ]);
    apply_table_style(&mut table);
    for index in 0..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total_rows),
        count_cell(summary.converted, Color::Green),
        Cell::new(summary.clean),
        count_cell(summary.with_warnings, Color::Yellow),
        count_cell(summary.excluded_colombian, Color::Yellow),
        count_cell(summary.duplicate_rows, Color::Yellow),
        count_cell(summary.inferred_fields, Color::Yellow),
    ]);
    println!("{table}");
}

fn print_warnings(outcomes: &[RowOutcome]) {
    let lines = warning_lines(outcomes);
    if lines.is_empty() {
        return;
    }
    println!();
    println!("Warnings:");
    for line in lines.iter().take(MAX_WARNING_LINES) {
        println!("{line}");
    }
    if lines.len() > MAX_WARNING_LINES {
        println!("... and {} more", lines.len() - MAX_WARNING_LINES);
    }
}

/// One line per warning, rows shown 1-based to match the source file.
fn warning_lines(outcomes: &[RowOutcome]) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in outcomes {
        for warning in outcome.warnings() {
            let row = outcome.row + 1;
            match warning.field {
                Some(field) => lines.push(format!("- row {row}, {field}: {}", warning.message)),
                None => lines.push(format!("- row {row}: {}", warning.message)),
            }
        }
    }
    lines
}

fn splits_from_full_name(mapping: &FieldMapping, field: SemanticField) -> bool {
    matches!(
        field,
        SemanticField::FirstSurname | SemanticField::GivenNames
    ) && mapping.is_resolved(SemanticField::FullName)
}

fn confidence_cell(confidence: Confidence) -> Cell {
    match confidence {
        Confidence::High => Cell::new("high").fg(Color::Green),
        Confidence::Medium => Cell::new("medium").fg(Color::Yellow),
        Confidence::Low => Cell::new("low").fg(Color::Red),
    }
}

fn origin_label(origin: MatchOrigin) -> &'static str {
    match origin {
        MatchOrigin::Header => "header",
        MatchOrigin::Content => "content",
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sire_model::{RowWarning, SireRecord, WarningKind};

    fn record() -> SireRecord {
        SireRecord {
            establishment_code: "10675".to_string(),
            report_city_code: "5001".to_string(),
            document_type: "3".to_string(),
            document_number: "AB123456".to_string(),
            nationality: "0".to_string(),
            first_surname: "SMITH".to_string(),
            second_surname: String::new(),
            given_names: "JOHN".to_string(),
            movement_code: "E".to_string(),
            movement_date: "15/03/2024".to_string(),
            procedence: String::new(),
            destination: "169".to_string(),
            birth_date: "23/06/1990".to_string(),
        }
    }

    #[test]
    fn warning_lines_show_one_based_rows_and_fields() {
        let outcome = RowOutcome::converted(
            1,
            record(),
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
        );

        let lines = warning_lines(std::slice::from_ref(&outcome));
        insta::assert_snapshot!(lines.join("\n"), @r"
        - row 2, nationality: no country matches `xyzland`
        - row 2: same document and movement date as an earlier row
        ");
    }

    #[test]
    fn clean_outcomes_produce_no_warning_lines() {
        let outcome = RowOutcome::converted(0, record(), Vec::new());
        assert!(warning_lines(std::slice::from_ref(&outcome)).is_empty());
    }
}
