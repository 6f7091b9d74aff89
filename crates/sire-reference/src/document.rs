//! SIRE document type table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sire_model::text::fold_for_lookup;

use crate::error::{ReferenceError, Result};
use crate::loader;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentTypeEntry {
    pub code: String,
    pub name: String,
    pub aliases: Vec<String>,
}

impl DocumentTypeEntry {
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Clone, Debug, Default)]
pub struct DocumentTypeTable {
    entries: Vec<DocumentTypeEntry>,
    by_alias: BTreeMap<String, usize>,
    by_code: BTreeMap<String, usize>,
    folded: Vec<(usize, String)>,
}

impl DocumentTypeTable {
    pub fn from_csv(data: &str) -> Result<Self> {
        const TABLE: &str = "document_types";
        let mut entries = Vec::new();
        for (idx, row) in loader::read_rows(TABLE, data)?.iter().enumerate() {
            entries.push(DocumentTypeEntry {
                code: loader::get_field(TABLE, idx, row, "code")?,
                name: loader::get_field(TABLE, idx, row, "name")?,
                aliases: loader::get_optional(row, "aliases")
                    .map(|raw| loader::parse_aliases(&raw))
                    .unwrap_or_default(),
            });
        }
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<DocumentTypeEntry>) -> Result<Self> {
        let mut by_alias = BTreeMap::new();
        let mut by_code = BTreeMap::new();
        let mut folded = Vec::new();
        for (idx, entry) in entries.iter().enumerate() {
            if by_code.insert(entry.code.clone(), idx).is_some() {
                return Err(ReferenceError::DuplicateCode {
                    table: "document_types",
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

    /// Resolves a document type label ("Passport", "C.E.", "ppt").
    ///
    /// The exact pass runs over every alias first: "PPT" is both its own
    /// entry and a substring cousin of the passport alias "PP", and must
    /// resolve to the protection permit, never the passport.
    pub fn lookup(&self, token: &str) -> Option<&DocumentTypeEntry> {
        let needle = fold_for_lookup(token);
        if needle.is_empty() {
            return None;
        }
        if let Some(&idx) = self.by_alias.get(&needle) {
            return Some(&self.entries[idx]);
        }
        for (idx, alias) in &self.folded {
            if alias.contains(&needle) || needle.contains(alias.as_str()) {
                return Some(&self.entries[*idx]);
            }
        }
        None
    }

    pub fn get_by_code(&self, code: &str) -> Option<&DocumentTypeEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[DocumentTypeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
