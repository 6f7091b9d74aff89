//! Date parsing and submission-format output.
//!
//! Police reports carry dates in whatever shape the hotel's spreadsheet
//! produced them. The normalizer tries a fixed cascade of formats and
//! reformats every hit to the `dd/mm/yyyy` the submission file requires.
//! Slash dates are read day-first; when month-first would also have parsed,
//! the result is flagged so the caller can warn instead of silently picking
//! a side.

use chrono::{Datelike, NaiveDate, Utc};

use sire_model::Confidence;

/// Oldest birth or movement year accepted from any input.
const MIN_YEAR: i32 = 1900;

/// Input formats tried in order; the first parse inside the year bounds
/// wins. The two leading formats are unambiguous or locale-native and parse
/// at high confidence, the rest at medium.
const INPUT_FORMATS: [(&str, Confidence); 8] = [
    ("%d/%m/%Y", Confidence::High),
    ("%Y-%m-%d", Confidence::High),
    ("%d-%m-%Y", Confidence::Medium),
    ("%m/%d/%Y", Confidence::Medium),
    ("%d.%m.%Y", Confidence::Medium),
    ("%Y/%m/%d", Confidence::Medium),
    ("%d %b %Y", Confidence::Medium),
    ("%d %B %Y", Confidence::Medium),
];

/// Date layout of every submission field.
const OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Spreadsheet null markers that mean "no date", not "bad date".
const NULL_MARKERS: [&str; 3] = ["NAN", "NONE", "NAT"];

/// A date reformatted for the submission file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    /// `dd/mm/yyyy`.
    pub formatted: String,
    pub confidence: Confidence,
    /// Day-first was applied but month-first was also plausible.
    pub ambiguous: bool,
}

/// What a raw cell turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    Parsed(NormalizedDate),
    /// Empty cell or a spreadsheet null marker.
    Empty,
    /// No known format matched inside the year bounds.
    Unrecognized,
}

/// Parses raw date cells against the format cascade.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    max_year: i32,
}

impl DateNormalizer {
    /// Accepts years up to next calendar year, so a late-December batch can
    /// still carry January check-outs.
    pub fn new() -> Self {
        Self {
            max_year: Utc::now().year() + 1,
        }
    }

    /// Fixes the upper year bound instead of deriving it from the clock.
    pub fn with_max_year(max_year: i32) -> Self {
        Self { max_year }
    }

    pub fn normalize(&self, raw: &str) -> DateOutcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed.to_uppercase().as_str()) {
            return DateOutcome::Empty;
        }
        if let Some(outcome) = self.parse(trimmed) {
            return outcome;
        }
        // Cut a time-of-day suffix and retry: "15/03/2024 14:30".
        if let Some((head, _)) = trimmed.split_once(char::is_whitespace) {
            if let Some(outcome) = self.parse(head) {
                return outcome;
            }
        }
        DateOutcome::Unrecognized
    }

    fn parse(&self, value: &str) -> Option<DateOutcome> {
        for (format, confidence) in INPUT_FORMATS {
            let Ok(parsed) = NaiveDate::parse_from_str(value, format) else {
                continue;
            };
            if parsed.year() < MIN_YEAR || parsed.year() > self.max_year {
                continue;
            }
            return Some(DateOutcome::Parsed(NormalizedDate {
                formatted: parsed.format(OUTPUT_FORMAT).to_string(),
                confidence,
                ambiguous: is_ambiguous_slash_date(value),
            }));
        }
        None
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// True for `n/n/yyyy` values whose leading numbers are both valid months
/// and distinct, so day-first and month-first decode to different dates.
fn is_ambiguous_slash_date(value: &str) -> bool {
    let mut parts = value.splitn(3, '/');
    let (Some(first), Some(second), Some(year)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let (Ok(day), Ok(month)) = (first.parse::<u32>(), second.parse::<u32>()) else {
        return false;
    };
    (1..=12).contains(&day) && (1..=12).contains(&month) && day != month
}
