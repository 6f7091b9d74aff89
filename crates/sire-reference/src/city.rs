//! Colombian city/municipality table (DIVIPOLA-style codes).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sire_model::text::fold_for_lookup;

use crate::country::MatchKind;
use crate::error::{ReferenceError, Result};
use crate::loader;

/// Partial city matches only engage on tokens at least this long, so short
/// foreign tokens never hide inside longer city names ("USA" in FUSAGASUGA).
const MIN_PARTIAL_TOKEN_LEN: usize = 5;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CityEntry {
    pub code: String,
    pub name: String,
    pub aliases: Vec<String>,
    /// False only for the catch-all COLOMBIA entry.
    pub municipality: bool,
}

impl CityEntry {
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CityMatch<'a> {
    pub entry: &'a CityEntry,
    pub kind: MatchKind,
}

#[derive(Clone, Debug, Default)]
pub struct CityTable {
    entries: Vec<CityEntry>,
    by_alias: BTreeMap<String, usize>,
    by_code: BTreeMap<String, usize>,
    folded: Vec<(usize, String)>,
}

impl CityTable {
    pub fn from_csv(data: &str) -> Result<Self> {
        const TABLE: &str = "cities";
        let mut entries = Vec::new();
        for (idx, row) in loader::read_rows(TABLE, data)?.iter().enumerate() {
            entries.push(CityEntry {
                code: loader::get_field(TABLE, idx, row, "code")?,
                name: loader::get_field(TABLE, idx, row, "name")?,
                aliases: loader::get_optional(row, "aliases")
                    .map(|raw| loader::parse_aliases(&raw))
                    .unwrap_or_default(),
                municipality: loader::get_optional(row, "municipality")
                    .is_none_or(|raw| raw.eq_ignore_ascii_case("true")),
            });
        }
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<CityEntry>) -> Result<Self> {
        let mut by_alias = BTreeMap::new();
        let mut by_code = BTreeMap::new();
        let mut folded = Vec::new();
        for (idx, entry) in entries.iter().enumerate() {
            if by_code.insert(entry.code.clone(), idx).is_some() {
                return Err(ReferenceError::DuplicateCode {
                    table: "cities",
                    row: idx,
                    code: entry.code.clone(),
                });
            }
            for name in entry.all_names() {
                let key = fold_for_lookup(name);
                if key.is_empty() {
                    continue;
                }
                by_alias.entry(key.clone()).or_insert(idx);
                folded.push((idx, key));
            }
        }
        Ok(Self {
            entries,
            by_alias,
            by_code,
            folded,
        })
    }

    /// Resolves a free-text place token to a city entry.
    ///
    /// Unlike countries, the partial pass only accepts the alias appearing
    /// inside the token (never the reverse) and skips tokens shorter than
    /// [`MIN_PARTIAL_TOKEN_LEN`].
    pub fn lookup(&self, token: &str) -> Option<CityMatch<'_>> {
        let needle = fold_for_lookup(token);
        if needle.is_empty() {
            return None;
        }
        if let Some(&idx) = self.by_alias.get(&needle) {
            return Some(CityMatch {
                entry: &self.entries[idx],
                kind: MatchKind::Exact,
            });
        }
        if needle.chars().count() >= MIN_PARTIAL_TOKEN_LEN {
            for (idx, alias) in &self.folded {
                if needle.contains(alias.as_str()) {
                    return Some(CityMatch {
                        entry: &self.entries[*idx],
                        kind: MatchKind::Partial,
                    });
                }
            }
        }
        None
    }

    pub fn get_by_code(&self, code: &str) -> Option<&CityEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[CityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
