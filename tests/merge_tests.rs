//! Translation merge tests

use pretty_assertions::assert_eq;
use royalbit_lingo::merge::{merge_rows, seed_rows, MergeStats};
use royalbit_lingo::types::{FlatRow, RowSet};

fn source(rows: &[(&str, &str)]) -> RowSet {
    let mut set = RowSet::new(vec!["path".to_string(), "default".to_string()]);
    for (path, text) in rows {
        set.push(FlatRow::new(*path, *text));
    }
    set
}

fn target(rows: &[(&str, &str, &str)]) -> RowSet {
    let mut set = RowSet::new(vec![
        "path".to_string(),
        "default".to_string(),
        "th".to_string(),
    ]);
    for (path, text, translation) in rows {
        set.push(FlatRow::new(*path, *text).with_target(*translation));
    }
    set
}

fn target_column(rows: &RowSet) -> Vec<&str> {
    rows.rows
        .iter()
        .map(|r| r.target_text.as_deref().unwrap_or("<none>"))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// FIRST PASS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_documented_scenario() {
    let src = source(&[("/a/b/Title", "Hello"), ("/a/b/Body", "World")]);
    let tgt = target(&[
        ("/a/b/Title", "Hello", "สวัสดี"),
        ("/a/b/Body", "Different", "World-th"),
    ]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(
        merged.rows.to_grid(),
        vec![
            vec!["path", "default", "th"],
            vec!["/a/b/Title", "Hello", ""],
            vec!["/a/b/Body", "World", "World-th"],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect::<Vec<_>>())
        .collect::<Vec<_>>()
    );
}

#[test]
fn test_changed_default_carries_target_text() {
    let src = source(&[("/a/b/One", "one"), ("/a/b/Two", "two")]);
    let tgt = target(&[("/a/b/One", "uno", "1"), ("/a/b/Two", "dos", "2")]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(target_column(&merged.rows), vec!["1", "2"]);
    assert_eq!(merged.stats.carried, 2);
}

#[test]
fn test_unchanged_default_always_cleared() {
    let src = source(&[("/a/b/Same", "same")]);
    let tgt = target(&[("/a/b/Same", "same", "already translated")]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(target_column(&merged.rows), vec![""]);
    assert_eq!(merged.stats.cleared, 1);
}

#[test]
fn test_new_key_left_empty() {
    let src = source(&[("/a/b/Old", "old"), ("/a/b/New", "new")]);
    let tgt = target(&[("/a/b/Old", "vieux", "alt")]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(target_column(&merged.rows), vec!["alt", ""]);
    assert_eq!(merged.stats.missing, 1);
}

#[test]
fn test_matching_is_by_path_not_position() {
    let src = source(&[("/a/b/First", "1"), ("/a/b/Second", "2")]);
    let tgt = target(&[
        ("/a/b/Extra", "x", "extra"),
        ("/a/b/Second", "deux", "second-th"),
        ("/a/b/First", "un", "first-th"),
    ]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(merged.rows.len(), src.len());
    assert_eq!(target_column(&merged.rows), vec!["first-th", "second-th"]);
}

#[test]
fn test_directory_case_differences_still_match() {
    let src = source(&[("/default/UserInfo/Name", "Name")]);
    let tgt = target(&[("/default/userInfo/Name", "ชื่อ", "ชื่อ")]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(target_column(&merged.rows), vec!["ชื่อ"]);
}

#[test]
fn test_duplicate_target_paths_first_wins() {
    let src = source(&[("/a/b/K", "k")]);
    let tgt = target(&[("/a/b/K", "x", "first"), ("/a/b/K", "y", "second")]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(target_column(&merged.rows), vec!["first"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// TRANSLATION CACHE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_identical_default_text_reuses_translation() {
    let src = source(&[
        ("/a/form/Save", "Save"),
        ("/a/dialog/Confirm", "Save"),
        ("/a/dialog/Cancel", "Cancel"),
    ]);
    let tgt = target(&[("/a/form/Save", "บันทึก", "บันทึก")]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(target_column(&merged.rows), vec!["บันทึก", "บันทึก", ""]);
    assert_eq!(
        merged.stats,
        MergeStats {
            carried: 1,
            cleared: 0,
            reused: 1,
            missing: 1,
        }
    );
}

#[test]
fn test_cleared_row_filled_from_cache() {
    let src = source(&[("/a/x/Save", "Save"), ("/a/y/Save", "Save")]);
    let tgt = target(&[("/a/x/Save", "Sauver", "Sauver"), ("/a/y/Save", "Save", "Save")]);

    let merged = merge_rows(&src, &tgt, "fr");

    assert_eq!(target_column(&merged.rows), vec!["Sauver", "Sauver"]);
}

#[test]
fn test_empty_carried_translation_not_cached() {
    let src = source(&[("/a/x/K", "text"), ("/a/y/K", "text")]);
    let tgt = target(&[("/a/x/K", "old", "")]);

    let merged = merge_rows(&src, &tgt, "th");

    assert_eq!(target_column(&merged.rows), vec!["", ""]);
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_merge_is_idempotent() {
    let src = source(&[
        ("/a/b/One", "one"),
        ("/a/b/Two", "two"),
        ("/a/c/Dup", "one"),
        ("/a/c/Same", "same"),
    ]);
    let tgt = target(&[
        ("/a/b/One", "uno", "1"),
        ("/a/c/Same", "same", "x"),
    ]);

    let first = merge_rows(&src, &tgt, "th");
    let second = merge_rows(&src, &tgt, "th");

    assert_eq!(first, second);
}

#[test]
fn test_header_gets_locale_name() {
    let merged = merge_rows(&source(&[]), &target(&[]), "ภาษาไทย");
    assert_eq!(merged.rows.header, vec!["path", "default", "ภาษาไทย"]);
    assert!(merged.rows.is_empty());
}

#[test]
fn test_seeded_sheet_mirrors_default() {
    let src = source(&[("/a/b/One", "one"), ("/a/b/Two", "two")]);

    let seeded = seed_rows(&src, "th");

    assert_eq!(seeded.len(), src.len());
    for (seeded_row, source_row) in seeded.rows.iter().zip(&src.rows) {
        assert_eq!(seeded_row.default_text, source_row.default_text);
        assert_eq!(seeded_row.target_text.as_deref(), Some(source_row.default_text.as_str()));
    }
}
