//! Translation merge
//!
//! Reconciles the current default-locale rows with the rows of an existing
//! target locale, deciding per key whether the target text is carried
//! forward, cleared for review, or filled from an identical default string
//! translated elsewhere in the same merge.

use crate::codec::comparable_path;
use crate::types::{FlatRow, RowSet};
use std::collections::HashMap;

/// Default text → translation, collected while merging one locale
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<String, String>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a translation; the first one recorded for a text wins
    pub fn record(&mut self, default_text: &str, translation: &str) {
        self.entries
            .entry(default_text.to_string())
            .or_insert_with(|| translation.to_string());
    }

    pub fn lookup(&self, default_text: &str) -> Option<&str> {
        self.entries.get(default_text).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What happened to each row of a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Existing translation copied forward
    pub carried: usize,
    /// Matched, but the stored text equals the default text
    pub cleared: usize,
    /// Filled from a translation of the same default text under another key
    pub reused: usize,
    /// No translation available
    pub missing: usize,
}

impl MergeStats {
    pub fn total(&self) -> usize {
        self.carried + self.cleared + self.reused + self.missing
    }
}

/// Merge result: three-column rows plus per-row accounting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub rows: RowSet,
    pub stats: MergeStats,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FirstPass {
    Carried,
    Cleared,
    Unmatched,
}

/// Merge `target` into `source` for the locale displayed as `target_name`.
///
/// Rows are matched by [`comparable_path`]; the first matching target row
/// wins. A matched row whose default text equals the source default text is
/// treated as not yet reviewed and its cell is cleared. Otherwise the matched
/// target text is carried forward and, when non-empty, cached under the
/// source row's default text. A second pass fills every still-empty cell
/// whose default text has a cached translation.
///
/// The output keeps the source's row order and row count; its header is the
/// source header plus `target_name`.
pub fn merge_rows(source: &RowSet, target: &RowSet, target_name: &str) -> MergeOutcome {
    let mut index: HashMap<String, &FlatRow> = HashMap::with_capacity(target.len());
    for row in &target.rows {
        index.entry(comparable_path(&row.path)).or_insert(row);
    }

    let mut cache = TranslationCache::new();
    let mut passes = Vec::with_capacity(source.len());
    let mut rows = Vec::with_capacity(source.len());

    for row in &source.rows {
        let (target_text, pass) = match index.get(&comparable_path(&row.path)) {
            Some(matched) if matched.default_text == row.default_text => {
                (String::new(), FirstPass::Cleared)
            }
            Some(matched) => {
                let carried = matched.target_text.clone().unwrap_or_default();
                if !carried.is_empty() {
                    cache.record(&row.default_text, &carried);
                }
                (carried, FirstPass::Carried)
            }
            None => (String::new(), FirstPass::Unmatched),
        };
        passes.push(pass);
        rows.push(FlatRow {
            path: row.path.clone(),
            default_text: row.default_text.clone(),
            target_text: Some(target_text),
        });
    }

    let mut stats = MergeStats::default();
    for (row, pass) in rows.iter_mut().zip(passes) {
        let filled = row.target_text.as_deref().is_some_and(|t| !t.is_empty());
        if filled {
            stats.carried += 1;
            continue;
        }
        match cache.lookup(&row.default_text) {
            Some(translation) => {
                row.target_text = Some(translation.to_string());
                stats.reused += 1;
            }
            None => {
                row.target_text = Some(String::new());
                if pass == FirstPass::Cleared {
                    stats.cleared += 1;
                } else {
                    stats.missing += 1;
                }
            }
        }
    }

    let mut header = source.header.clone();
    header.push(target_name.to_string());

    MergeOutcome {
        rows: RowSet { header, rows },
        stats,
    }
}

/// Sheet for a freshly seeded locale: the target column repeats the default
/// text one-to-one.
pub fn seed_rows(source: &RowSet, target_name: &str) -> RowSet {
    let mut header = source.header.clone();
    header.push(target_name.to_string());
    let rows = source
        .rows
        .iter()
        .map(|row| FlatRow {
            path: row.path.clone(),
            default_text: row.default_text.clone(),
            target_text: Some(row.default_text.clone()),
        })
        .collect();
    RowSet { header, rows }
}

/// Rows of an existing locale tree, shaped for [`merge_rows`]: the locale's
/// own text fills both the default and target columns, so an untranslated
/// copy of the default string compares equal and anything else carries.
pub fn locale_rows(flattened: &RowSet) -> RowSet {
    RowSet {
        header: flattened.header.clone(),
        rows: flattened
            .rows
            .iter()
            .map(|row| FlatRow {
                path: row.path.clone(),
                default_text: row.default_text.clone(),
                target_text: Some(row.default_text.clone()),
            })
            .collect(),
    }
}
