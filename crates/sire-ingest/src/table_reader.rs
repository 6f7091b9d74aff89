//! Reads a police-report export into a [`RawTable`].
//!
//! Hotels hand these files over in whatever shape their front-desk system
//! produces: comma or semicolon CSV, tab-delimited text, with or without a
//! header row, often with a UTF-8 BOM. This module absorbs those
//! differences so everything downstream sees one rectangular table.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use sire_model::RawTable;

use crate::error::{IngestError, Result};

/// Delimiters probed, in order, when sniffing a `.txt` export.
const SNIFF_ORDER: [u8; 3] = [b'\t', b';', b','];

/// Reads `path` into a [`RawTable`].
///
/// `.csv` is read as comma-delimited, `.tsv`/`.tab` as tab-delimited and
/// `.txt` with a sniffed delimiter. When the first row looks like guest data
/// rather than labels, headers are synthesized as `column_1..column_N`.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" | "tsv" | "tab" | "txt" => {}
        "xlsx" | "xls" => {
            return Err(IngestError::WorkbookNotSupported {
                path: path.to_path_buf(),
            });
        }
        _ => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    }

    let content = read_content(path)?;
    let delimiter = match extension.as_str() {
        "csv" => b',',
        "tsv" | "tab" => b'\t',
        _ => sniff_delimiter(&content),
    };
    debug!(
        path = %path.display(),
        delimiter = %char::from(delimiter),
        "reading guest table"
    );

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    let (headers, data_start) = if first_row_is_header(&raw_rows[0]) {
        let headers: Vec<String> = raw_rows[0].iter().map(|v| normalize_header(v)).collect();
        (headers, 1)
    } else {
        let width = raw_rows.iter().map(Vec::len).max().unwrap_or(0);
        let headers = (1..=width).map(|idx| format!("column_{idx}")).collect();
        (headers, 0)
    };
    debug!(
        columns = headers.len(),
        synthesized = data_start == 0,
        "header row resolved"
    );

    let mut table = RawTable::new(headers);
    for row in raw_rows.into_iter().skip(data_start) {
        table.push_row(row);
    }
    Ok(table)
}

fn read_content(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(content
        .strip_prefix('\u{feff}')
        .map_or_else(|| content.to_string(), str::to_string))
}

fn sniff_delimiter(content: &str) -> u8 {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    SNIFF_ORDER
        .into_iter()
        .find(|&delim| first_line.contains(char::from(delim)))
        .unwrap_or(b',')
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    alpha: usize,
    digit_heavy: usize,
}

impl RowStats {
    fn non_empty_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_empty as f64 / self.total as f64
        }
    }

    fn alpha_ratio(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.alpha as f64 / self.non_empty as f64
        }
    }

    fn digit_heavy_ratio(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.digit_heavy as f64 / self.non_empty as f64
        }
    }
}

fn row_stats(row: &[String]) -> RowStats {
    let mut stats = RowStats {
        total: row.len(),
        ..RowStats::default()
    };
    for cell in row {
        if cell.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if cell.chars().any(char::is_alphabetic) {
            stats.alpha += 1;
        }
        if digit_share(cell) >= 0.5 {
            stats.digit_heavy += 1;
        }
    }
    stats
}

fn digit_share(value: &str) -> f64 {
    let total = value.chars().count();
    if total == 0 {
        return 0.0;
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    digits as f64 / total as f64
}

/// Labels are mostly-alphabetic and dense; guest rows drag along document
/// numbers and dates, which read as digit-heavy cells.
fn first_row_is_header(row: &[String]) -> bool {
    let stats = row_stats(row);
    stats.non_empty_ratio() >= 0.8 && stats.alpha_ratio() >= 0.5 && stats.digit_heavy_ratio() <= 0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn label_rows_look_like_headers() {
        assert!(first_row_is_header(&cells(&[
            "Nombre", "Apellido", "Nacionalidad", "Documento"
        ])));
        assert!(first_row_is_header(&cells(&["Tipo Doc", "No. Documento"])));
    }

    #[test]
    fn guest_rows_do_not_look_like_headers() {
        assert!(!first_row_is_header(&cells(&[
            "JUAN",
            "PEREZ",
            "COLOMBIA",
            "AB123456",
            "15/03/2024"
        ])));
        assert!(!first_row_is_header(&cells(&["JUAN", "", "", "AB123456"])));
    }

    #[test]
    fn sniffs_tab_before_semicolon_before_comma() {
        assert_eq!(sniff_delimiter("a\tb;c,d\n"), b'\t');
        assert_eq!(sniff_delimiter("a;b,c\n"), b';');
        assert_eq!(sniff_delimiter("a,b\n"), b',');
        assert_eq!(sniff_delimiter("single column\n"), b',');
    }

    #[test]
    fn header_normalization_collapses_whitespace() {
        assert_eq!(normalize_header("  Primer   Apellido "), "Primer Apellido");
    }
}
