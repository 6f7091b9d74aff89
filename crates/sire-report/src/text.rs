//! Plain-text conversion report.
//!
//! The report frame is Spanish, matching what hotel operators file the
//! submission with; per-warning detail keeps the engine's diagnostic text.

use sire_engine::BatchOutcome;
use sire_model::{ExclusionReason, RowStatus};

const BANNER_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 29;
/// Detail lines shown per section before eliding the rest.
const MAX_DETAIL_LINES: usize = 20;

/// Renders the operator-facing text report: a counts block followed by
/// warning and exclusion detail, each section capped at
/// [`MAX_DETAIL_LINES`] lines.
pub fn render_text_report(batch: &BatchOutcome) -> String {
    let summary = &batch.summary;
    let banner = "=".repeat(BANNER_WIDTH);

    let mut out = String::new();
    out.push_str(&banner);
    out.push('\n');
    out.push_str("REPORTE DE CONVERSIÓN SIRE\n");
    out.push_str(&banner);
    out.push_str("\n\n");

    count_line(&mut out, "Total registros procesados:", summary.total_rows);
    count_line(&mut out, "Registros convertidos:", summary.converted);
    count_line(&mut out, "  Sin advertencias:", summary.clean);
    count_line(&mut out, "  Con advertencias:", summary.with_warnings);
    count_line(&mut out, "Colombianos excluidos:", summary.excluded_colombian);
    count_line(&mut out, "Duplicados detectados:", summary.duplicate_rows);
    count_line(&mut out, "Campos inferidos:", summary.inferred_fields);

    let warnings = warning_lines(batch);
    if !warnings.is_empty() {
        out.push_str("\nADVERTENCIAS:\n");
        push_capped(&mut out, &warnings);
    }

    let exclusions = exclusion_lines(batch);
    if !exclusions.is_empty() {
        out.push_str("\nEXCLUIDOS:\n");
        push_capped(&mut out, &exclusions);
    }

    out
}

fn count_line(out: &mut String, label: &str, value: usize) {
    out.push_str(&format!("{label:<width$}{value}\n", width = LABEL_WIDTH));
}

/// One line per warning, across all rows, in row order. Rows are shown
/// 1-based the way operators count them (header line not included).
fn warning_lines(batch: &BatchOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in &batch.outcomes {
        for warning in outcome.warnings() {
            let row = outcome.row + 1;
            let line = match warning.field {
                Some(field) => format!("  - Fila {row}, {field}: {}", warning.message),
                None => format!("  - Fila {row}: {}", warning.message),
            };
            lines.push(line);
        }
    }
    lines
}

fn exclusion_lines(batch: &BatchOutcome) -> Vec<String> {
    batch
        .outcomes
        .iter()
        .filter_map(|outcome| match &outcome.status {
            RowStatus::Excluded { reason } => Some(format!(
                "  - Fila {}: {}",
                outcome.row + 1,
                exclusion_label(*reason)
            )),
            RowStatus::Converted { .. } => None,
        })
        .collect()
}

fn exclusion_label(reason: ExclusionReason) -> &'static str {
    match reason {
        ExclusionReason::ColombianNational => "nacional colombiano",
    }
}

fn push_capped(out: &mut String, lines: &[String]) {
    for line in lines.iter().take(MAX_DETAIL_LINES) {
        out.push_str(line);
        out.push('\n');
    }
    if lines.len() > MAX_DETAIL_LINES {
        let hidden = lines.len() - MAX_DETAIL_LINES;
        out.push_str(&format!("  ... y {hidden} más\n"));
    }
}
