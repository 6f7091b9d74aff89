//! CSV parsing helpers shared by the three embedded tables.

use std::collections::BTreeMap;

use crate::error::{ReferenceError, Result};

/// Reads an embedded CSV table into one map per row, keyed by header.
pub(crate) fn read_rows(table: &'static str, data: &str) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| ReferenceError::Csv { table, source })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| ReferenceError::Csv { table, source })?;
        let mut row = BTreeMap::new();
        for (idx, field) in record.iter().enumerate() {
            if let Some(header) = headers.get(idx) {
                row.insert(header.clone(), field.trim().to_string());
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

pub(crate) fn get_field(
    table: &'static str,
    row_idx: usize,
    row: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<String> {
    row.get(field)
        .filter(|value| !value.is_empty())
        .cloned()
        .ok_or(ReferenceError::MissingField {
            table,
            row: row_idx,
            field,
        })
}

pub(crate) fn get_optional(row: &BTreeMap<String, String>, field: &str) -> Option<String> {
    row.get(field).filter(|value| !value.is_empty()).cloned()
}

/// Splits a semicolon-delimited alias cell into trimmed, non-empty entries.
pub(crate) fn parse_aliases(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect()
}
