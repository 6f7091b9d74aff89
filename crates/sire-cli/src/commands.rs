use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Table;
use tracing::{info, info_span, trace};

use sire_classify::vocabulary_for;
use sire_cli::logging::redact_value;
use sire_engine::{BatchConverter, BatchOutcome};
use sire_ingest::read_raw_table;
use sire_model::{MovementType, OperatorContext, SemanticField};
use sire_reference::{MatchKind, ReferenceStore};
use sire_report::{
    ReportFormat, default_report_filename, default_submission_filename, render_json_report,
    render_text_report, write_report, write_submission,
};

use crate::cli::{ConvertArgs, LookupArgs, MovementArg, ReportArg, TableArg};
use crate::summary::apply_table_style;

/// Everything `convert` produced, for the terminal summary.
pub struct ConvertResult {
    pub input: PathBuf,
    pub batch: BatchOutcome,
    pub submission: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("batch", input = %args.input.display());
    let _guard = span.enter();

    let store = ReferenceStore::builtin().context("load reference tables")?;

    let load_start = Instant::now();
    let table = read_raw_table(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    info!(
        rows = table.row_count(),
        columns = table.width(),
        duration_ms = load_start.elapsed().as_millis(),
        "input loaded"
    );

    let movement = match args.movement {
        MovementArg::Entry => MovementType::Entry,
        MovementArg::Exit => MovementType::Exit,
    };
    let context = OperatorContext::new(args.establishment.clone(), movement)
        .with_report_city(args.city.clone())
        .with_exclude_colombian_nationals(args.exclude_colombian_nationals);

    let batch = BatchConverter::new(&store).convert(&table, &context);
    for outcome in &batch.outcomes {
        if let Some(record) = outcome.record() {
            trace!(
                row = outcome.row,
                document = redact_value(&record.document_number),
                surname = redact_value(&record.first_surname),
                "record assembled"
            );
        }
    }

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| args.input.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut submission = None;
    let mut report = None;
    if !args.dry_run {
        let now = Utc::now();
        if batch.summary.converted > 0 {
            let path = output_dir.join(default_submission_filename(now));
            let written = write_submission(&batch, &path).context("write submission file")?;
            info!(path = %path.display(), records = written, "submission written");
            submission = Some(path);
        }
        if let Some(format) = args.report {
            let format = match format {
                ReportArg::Text => ReportFormat::Text,
                ReportArg::Json => ReportFormat::Json,
            };
            let rendered = match format {
                ReportFormat::Text => render_text_report(&batch),
                ReportFormat::Json => render_json_report(&batch).context("render json report")?,
            };
            let path = output_dir.join(default_report_filename(format, now));
            write_report(&rendered, &path).context("write conversion report")?;
            report = Some(path);
        }
    }

    Ok(ConvertResult {
        input: args.input.clone(),
        batch,
        submission,
        report,
    })
}

pub fn run_lookup(args: &LookupArgs) -> Result<()> {
    let store = ReferenceStore::builtin().context("load reference tables")?;
    let want = |choice: TableArg| args.table.is_none_or(|selected| selected == choice);

    let mut table = Table::new();
    table.set_header(vec!["Table", "Code", "Name", "Match"]);
    apply_table_style(&mut table);
    let mut hits = 0usize;

    if want(TableArg::Countries) {
        if let Some(found) = store.countries.lookup(&args.token) {
            table.add_row(vec![
                "countries",
                found.entry.code.as_str(),
                found.entry.name.as_str(),
                match_label(found.kind),
            ]);
            hits += 1;
        }
    }
    if want(TableArg::Cities) {
        if let Some(found) = store.cities.lookup(&args.token) {
            table.add_row(vec![
                "cities",
                found.entry.code.as_str(),
                found.entry.name.as_str(),
                match_label(found.kind),
            ]);
            hits += 1;
        }
    }
    if want(TableArg::DocumentTypes) {
        if let Some(entry) = store.document_types.lookup(&args.token) {
            table.add_row(vec![
                "document-types",
                entry.code.as_str(),
                entry.name.as_str(),
                "-",
            ]);
            hits += 1;
        }
    }

    if hits == 0 {
        println!("no reference entry matches `{}`", args.token);
    } else {
        println!("{table}");
    }
    Ok(())
}

pub fn run_fields() {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Required", "Header synonyms"]);
    apply_table_style(&mut table);
    for field in SemanticField::CLASSIFICATION_ORDER {
        let synonyms = match field {
            // The movement-date vocabulary depends on the batch direction,
            // so show both sets.
            SemanticField::MovementDate => format!(
                "entry: {}\nexit: {}",
                vocabulary_for(field, MovementType::Entry).synonyms.join(", "),
                vocabulary_for(field, MovementType::Exit).synonyms.join(", ")
            ),
            _ => vocabulary_for(field, MovementType::Entry).synonyms.join(", "),
        };
        let required = if field.is_required() { "yes" } else { "fallback" };
        table.add_row(vec![field.as_str(), required, synonyms.as_str()]);
    }
    println!("{table}");
}

fn match_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Exact => "exact",
        MatchKind::Partial => "partial",
    }
}
