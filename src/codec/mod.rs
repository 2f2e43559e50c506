//! Key tree codec
//!
//! Converts between a nested [`KeyTree`] and ordered flat rows keyed by a
//! slash-joined path (`/default/common/button/Ok`), and from rows back to the
//! leaf modules that make up a locale directory.

pub mod case;

use crate::types::{FlatRow, KeyNode, KeyTree, LeafModule, RowSet};
use tracing::warn;

pub use case::{directory_name, module_identifier, to_camel_case, to_kebab_case, RESERVED_SEGMENT};

/// Root marker every locale tree is wrapped under before flattening
pub const ROOT_SEGMENT: &str = "default";

/// Separator between path segments
pub const PATH_SEPARATOR: char = '/';

/// Leading segments of a path that carry no directory information:
/// the empty segment before the first `/` and the root marker.
pub const DROPPED_SEGMENTS: usize = 2;

/// Sheet column holding the default-locale text
pub const DEFAULT_COLUMN: usize = 1;

/// Sheet column holding the target-locale text
pub const TARGET_COLUMN: usize = 2;

/// Flatten a tree depth-first, in insertion order, into rows under `header`.
///
/// Each leaf becomes one row whose path is `/` followed by every key from the
/// root joined with `/`. Leaf values are copied verbatim into the default-text
/// column.
pub fn flatten(tree: &KeyTree, header: Vec<String>) -> RowSet {
    let mut rows = RowSet::new(header);
    visit(tree, &mut String::new(), &mut rows);
    rows
}

fn visit(tree: &KeyTree, prefix: &mut String, rows: &mut RowSet) {
    for (key, node) in tree.iter() {
        let restore = prefix.len();
        prefix.push(PATH_SEPARATOR);
        prefix.push_str(key);
        match node {
            KeyNode::Leaf(value) => rows.push(FlatRow::new(prefix.clone(), value.clone())),
            KeyNode::Tree(subtree) => visit(subtree, prefix, rows),
        }
        prefix.truncate(restore);
    }
}

/// Path used when matching rows across locales: every segment but the last
/// is lower-cased, the leaf key is compared as-is.
pub fn comparable_path(path: &str) -> String {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let last = segments.len().saturating_sub(1);
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i == last {
                segment.to_string()
            } else {
                segment.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a key path into its target directory segments and leaf key.
///
/// The first [`DROPPED_SEGMENTS`] segments are discarded, every remaining
/// segment but the last goes through [`directory_name`]. Returns `None` when
/// nothing is left to name a leaf.
pub fn module_location(path: &str) -> Option<(Vec<String>, String)> {
    let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).skip(DROPPED_SEGMENTS).collect();
    let leaf = segments.pop()?;
    if leaf.is_empty() {
        return None;
    }
    let dir = segments.into_iter().map(directory_name).collect();
    Some((dir, leaf.to_string()))
}

/// Group rows into leaf modules, one per target directory.
///
/// The value of each entry comes from `column` when that cell is present and
/// non-empty, otherwise from the default-text column. Modules appear in the
/// order their first row appears; a repeated key within a module keeps the
/// last value.
pub fn unflatten(rows: &RowSet, column: usize) -> Vec<LeafModule> {
    let mut modules: Vec<LeafModule> = Vec::new();

    for (index, row) in rows.rows.iter().enumerate() {
        let Some((dir, leaf)) = module_location(row.path.trim()) else {
            // +2: header row and 1-based sheet numbering
            warn!(row = index + 2, path = %row.path, "Skipping row without a usable key path");
            continue;
        };

        let value = row
            .cell(column)
            .filter(|value| !value.is_empty())
            .unwrap_or(&row.default_text);

        match modules.iter_mut().find(|module| module.dir == dir) {
            Some(module) => module.set(leaf, value),
            None => {
                let mut module = LeafModule::new(dir);
                module.set(leaf, value);
                modules.push(module);
            }
        }
    }

    modules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> KeyTree {
        let mut button = KeyTree::new();
        button.insert_leaf("Ok", "OK");
        button.insert_leaf("Cancel", "Cancel");
        let mut common = KeyTree::new();
        common.insert_tree("button", button);
        common.insert_leaf("Title", "Home");
        common.wrap(ROOT_SEGMENT)
    }

    #[test]
    fn test_flatten_paths_in_insertion_order() {
        let rows = flatten(&sample_tree(), vec!["path".into(), "default".into()]);
        let paths: Vec<&str> = rows.rows.iter().map(|r| r.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "/default/button/Ok",
                "/default/button/Cancel",
                "/default/Title"
            ]
        );
        assert_eq!(rows.header, vec!["path", "default"]);
        assert!(rows.rows.iter().all(|r| r.target_text.is_none()));
    }

    #[test]
    fn test_comparable_path_keeps_leaf_case() {
        assert_eq!(comparable_path("/Default/UserInfo/Title"), "/default/userinfo/Title");
        assert_eq!(comparable_path("Title"), "Title");
    }

    #[test]
    fn test_module_location() {
        assert_eq!(
            module_location("/xx/yy/UserInfo/Index/Title"),
            Some((
                vec!["user-info".to_string(), "Index".to_string()],
                "Title".to_string()
            ))
        );
        assert_eq!(
            module_location("/xx/yy/Title"),
            Some((Vec::new(), "Title".to_string()))
        );
        assert_eq!(module_location("/xx/yy"), None);
        assert_eq!(module_location(""), None);
    }

    #[test]
    fn test_unflatten_target_column_with_fallback() {
        let mut rows = RowSet::new(vec!["path".into(), "default".into(), "fr".into()]);
        rows.push(FlatRow::new("/xx/yy/section/Title", "Hi").with_target("Bonjour"));
        rows.push(FlatRow::new("/xx/yy/section/Body", "Text").with_target(""));
        rows.push(FlatRow::new("/xx/yy/section/Footer", "Bye"));

        let modules = unflatten(&rows, TARGET_COLUMN);

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].dir, vec!["section"]);
        assert_eq!(modules[0].get("Title"), Some("Bonjour"));
        assert_eq!(modules[0].get("Body"), Some("Text"));
        assert_eq!(modules[0].get("Footer"), Some("Bye"));
    }

    #[test]
    fn test_unflatten_skips_unusable_rows() {
        let mut rows = RowSet::new(vec!["path".into()]);
        rows.push(FlatRow::new("", "blank"));
        rows.push(FlatRow::new("/xx/yy", "too short"));
        rows.push(FlatRow::new("/xx/yy/a/Key", "kept"));

        let modules = unflatten(&rows, DEFAULT_COLUMN);

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].entries, vec![("Key".to_string(), "kept".to_string())]);
    }
}
