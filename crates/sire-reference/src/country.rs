//! Country code table (SIRE nationality codes).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sire_model::text::fold_for_lookup;

use crate::error::{ReferenceError, Result};
use crate::loader;

/// Shortest alias the substring scan will look for inside a longer token.
const MIN_CONTAINED_ALIAS_LEN: usize = 4;

/// How a token matched a reference entry.
///
/// `Exact` means the folded token equals a folded alias; `Partial` means one
/// contained the other. Callers map these onto confidence levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Partial,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountryEntry {
    pub code: String,
    pub name: String,
    pub aliases: Vec<String>,
}

impl CountryEntry {
    /// Canonical name followed by every alias.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CountryMatch<'a> {
    pub entry: &'a CountryEntry,
    pub kind: MatchKind,
}

/// Lookup table over every known nationality.
///
/// Entries keep their source order so the substring scan is deterministic:
/// the first entry whose folded alias contains (or is contained in) the token
/// wins, matching the order of the published code list.
#[derive(Clone, Debug, Default)]
pub struct CountryTable {
    entries: Vec<CountryEntry>,
    by_alias: BTreeMap<String, usize>,
    by_code: BTreeMap<String, usize>,
    folded: Vec<(usize, String)>,
}

impl CountryTable {
    pub fn from_csv(data: &str) -> Result<Self> {
        const TABLE: &str = "countries";
        let mut entries = Vec::new();
        for (idx, row) in loader::read_rows(TABLE, data)?.iter().enumerate() {
            entries.push(CountryEntry {
                code: loader::get_field(TABLE, idx, row, "code")?,
                name: loader::get_field(TABLE, idx, row, "name")?,
                aliases: loader::get_optional(row, "aliases")
                    .map(|raw| loader::parse_aliases(&raw))
                    .unwrap_or_default(),
            });
        }
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<CountryEntry>) -> Result<Self> {
        let mut by_alias = BTreeMap::new();
        let mut by_code = BTreeMap::new();
        let mut folded = Vec::new();
        for (idx, entry) in entries.iter().enumerate() {
            if by_code.insert(entry.code.clone(), idx).is_some() {
                return Err(ReferenceError::DuplicateCode {
                    table: "countries",
                    row: idx,
                    code: entry.code.clone(),
                });
            }
            for name in entry.all_names() {
                let key = fold_for_lookup(name);
                if key.is_empty() {
                    continue;
                }
                // First occurrence wins on duplicate folded aliases.
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

    /// Resolves a free-text nationality token to a country entry.
    ///
    /// Exact folded-alias matches are tried across the whole table before any
    /// substring scan, so a token that is literally an alias never gets
    /// claimed by an earlier entry's partial match. In the scan, short ISO
    /// aliases ("COL", "AND") are exact-only: embedded in a longer token
    /// they say nothing about the country.
    pub fn lookup(&self, token: &str) -> Option<CountryMatch<'_>> {
        let needle = fold_for_lookup(token);
        if needle.is_empty() {
            return None;
        }
        if let Some(&idx) = self.by_alias.get(&needle) {
            return Some(CountryMatch {
                entry: &self.entries[idx],
                kind: MatchKind::Exact,
            });
        }
        for (idx, alias) in &self.folded {
            let contained = alias.chars().count() >= MIN_CONTAINED_ALIAS_LEN
                && needle.contains(alias.as_str());
            if alias.contains(&needle) || contained {
                return Some(CountryMatch {
                    entry: &self.entries[*idx],
                    kind: MatchKind::Partial,
                });
            }
        }
        None
    }

    pub fn get_by_code(&self, code: &str) -> Option<&CountryEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CountryTable {
        CountryTable::from_csv(
            "code,name,aliases\n\
             249,ESTADOS UNIDOS,\"UNITED STATES;USA;US;E.E.U.U.\"\n\
             589,PERU,\"PERÚ;PERUVIAN;PERUANO;PERUANA\"\n\
             169,COLOMBIA,\"COLOMBIAN;COLOMBIANO;COLOMBIANA;COL\"\n",
        )
        .unwrap()
    }

    #[test]
    fn exact_alias_match_is_case_and_accent_insensitive() {
        let table = sample();
        let hit = table.lookup("Perú").unwrap();
        assert_eq!(hit.entry.code, "589");
        assert_eq!(hit.kind, MatchKind::Exact);

        let hit = table.lookup("e.e.u.u.").unwrap();
        assert_eq!(hit.entry.code, "249");
        assert_eq!(hit.kind, MatchKind::Exact);
    }

    #[test]
    fn substring_scan_runs_after_exact_pass() {
        let table = sample();
        let hit = table.lookup("PERUVIAN CITIZEN").unwrap();
        assert_eq!(hit.entry.code, "589");
        assert_eq!(hit.kind, MatchKind::Partial);
    }

    #[test]
    fn unknown_token_is_none() {
        let table = sample();
        assert!(table.lookup("KLINGON").is_none());
        assert!(table.lookup("???").is_none());
    }

    #[test]
    fn short_aliases_are_exact_only() {
        let table = sample();
        let hit = table.lookup("col").unwrap();
        assert_eq!(hit.entry.code, "169");
        assert_eq!(hit.kind, MatchKind::Exact);

        // "PROTOCOL" contains "COL" but names no country.
        assert!(table.lookup("PROTOCOL").is_none());
    }

    #[test]
    fn code_lookup_returns_canonical_entry() {
        let table = sample();
        assert_eq!(table.get_by_code("169").unwrap().name, "COLOMBIA");
        assert!(table.get_by_code("999").is_none());
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let err = CountryTable::from_csv("code,name,aliases\n1,A,\n1,B,\n").unwrap_err();
        assert!(err.to_string().contains("duplicate code"));
    }
}
