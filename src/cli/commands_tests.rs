use super::*;
use crate::pipeline::LocaleStatus;
use std::fs;
use tempfile::TempDir;

/// Project with a default zh_CN tree and one target locale, no workbook yet
fn create_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let button = root.join("i18n/zh_CN/common/button");
    fs::create_dir_all(&button).unwrap();
    fs::write(
        button.join("index.ts"),
        "export default {\n  \"Ok\": \"确定\",\n  \"Cancel\": \"取消\"\n}\n",
    )
    .unwrap();

    fs::write(
        root.join("lingo.yaml"),
        r#"
locales:
  - id: zh_CN
    name: Chinese
    path: i18n/zh_CN
    default: true
  - id: th_TH
    name: Thai
    path: i18n/th_TH
    mark: th
workbook:
  import_path: tmp/translate.xlsx
  export_dir: dist/excel
modules:
  line_ending: lf
"#,
    )
    .unwrap();

    temp
}

// =========================================================================
// format_status Tests
// =========================================================================

#[test]
fn test_format_merge_stats() {
    let stats = MergeStats {
        carried: 3,
        cleared: 2,
        reused: 1,
        missing: 4,
    };
    assert_eq!(
        format_merge_stats(&stats),
        "10 rows: 3 carried, 1 reused, 2 to review, 4 new"
    );
}

#[test]
fn test_format_status_variants() {
    assert_eq!(
        format_status(&LocaleStatus::Seeded { rows: 5 }),
        "seeded from default (5 rows)"
    );
    assert_eq!(
        format_status(&LocaleStatus::Written {
            modules: 2,
            indexes: 1
        }),
        "2 modules, 1 index modules"
    );
    assert!(format_status(&LocaleStatus::Unmatched).contains("skipped"));
    assert!(
        format_status(&LocaleStatus::Failed(LingoError::Write("disk full".to_string())))
            .contains("disk full")
    );
}

// =========================================================================
// Command Tests
// =========================================================================

#[test]
fn test_check_valid_project() {
    let project = create_project();
    assert!(check(project.path().join("lingo.yaml")).is_ok());
}

#[test]
fn test_check_missing_default_tree() {
    let project = create_project();
    fs::remove_dir_all(project.path().join("i18n/zh_CN")).unwrap();

    let result = check(project.path().join("lingo.yaml"));
    assert!(matches!(result, Err(LingoError::Load(_))));
}

#[test]
fn test_check_missing_config() {
    let project = create_project();
    let result = check(project.path().join("nope.yaml"));
    assert!(matches!(result, Err(LingoError::Config(_))));
}

#[test]
fn test_flatten_by_id_and_name() {
    let project = create_project();
    let config = project.path().join("lingo.yaml");

    assert!(flatten(config.clone(), "zh_CN".to_string()).is_ok());
    assert!(flatten(config.clone(), "Chinese".to_string()).is_ok());
    assert!(matches!(
        flatten(config, "fr_FR".to_string()),
        Err(LingoError::Config(_))
    ));
}

#[test]
fn test_export_seeds_and_writes_workbook() {
    let project = create_project();
    let out_dir = project.path().join("custom-out");

    export(project.path().join("lingo.yaml"), Some(out_dir.clone()), true).unwrap();

    assert!(project.path().join("i18n/th_TH/common/button/index.ts").exists());
    let files: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn test_import_missing_workbook_fails() {
    let project = create_project();
    let result = import(
        project.path().join("lingo.yaml"),
        Some(project.path().join("missing.xlsx")),
        2,
        false,
    );
    assert!(matches!(result, Err(LingoError::Load(_))));
}

#[test]
fn test_sync_requires_import_workbook() {
    let project = create_project();
    let result = sync(project.path().join("lingo.yaml"), false);
    assert!(result.is_err());
    // import runs first; nothing is exported when it aborts
    assert!(!project.path().join("dist/excel").exists());
}
