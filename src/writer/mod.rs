//! Locale module tree writer
//!
//! Emits leaf modules from unflattened rows, regenerates the index modules of
//! pure directory levels, and provides the seed (copy) / reset (remove)
//! primitives the pipelines run against a locale root.

use crate::codec::{module_identifier, RESERVED_SEGMENT};
use crate::config::ModuleConfig;
use crate::error::{LingoError, LingoResult};
use crate::types::LeafModule;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

fn write_error(path: &Path, e: impl std::fmt::Display) -> LingoError {
    LingoError::Write(format!("{}: {}", path.display(), e))
}

/// Source text of a leaf module: `export default` + a JSON object
pub fn render_leaf_module(entries: &[(String, String)], line_ending: &str) -> LingoResult<String> {
    let object: Map<String, Value> = entries
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let body = serde_json::to_string_pretty(&Value::Object(object))?;
    Ok(format!("export default {}\n", body).replace('\n', line_ending))
}

/// Source text of a directory index module re-exporting `dir_names`
pub fn render_index_module(dir_names: &[String], line_ending: &str) -> String {
    let mut imports: Vec<&String> = dir_names.iter().collect();
    imports.sort_by_key(|name| name.to_lowercase());

    let mut out = String::new();
    for name in &imports {
        let ident = module_identifier(name);
        let target = if name.as_str() == RESERVED_SEGMENT {
            format!("{}/index", RESERVED_SEGMENT)
        } else {
            name.to_string()
        };
        out.push_str(&format!("import {} from './{}'\n", ident, target));
    }

    let mut idents: Vec<String> = dir_names.iter().map(|n| module_identifier(n)).collect();
    idents.sort();

    out.push_str("\nexport default {\n");
    for ident in idents {
        out.push_str(&format!("  {},\n", ident));
    }
    out.push_str("}\n");

    out.replace('\n', line_ending)
}

/// Write one leaf module per entry of `modules` under `root`.
/// Returns the number of files written.
pub fn write_leaf_modules(
    root: &Path,
    modules: &[LeafModule],
    config: &ModuleConfig,
) -> LingoResult<usize> {
    let line_ending = config.line_ending.as_str();
    for module in modules {
        let dir = root.join(module.relative_dir());
        fs::create_dir_all(&dir).map_err(|e| write_error(&dir, e))?;

        let file = dir.join(&config.index_file);
        let source = render_leaf_module(&module.entries, line_ending)?;
        fs::write(&file, source).map_err(|e| write_error(&file, e))?;
    }
    Ok(modules.len())
}

/// Walk the tree bottom-up and give every directory whose children are all
/// directories an index module re-exporting them. Directories holding a leaf
/// module (or any other file) are left alone.
/// Returns the number of index modules written.
pub fn write_directory_indexes(root: &Path, config: &ModuleConfig) -> LingoResult<usize> {
    if !root.is_dir() {
        return Ok(0);
    }

    let mut subdirs = Vec::new();
    let mut has_files = false;
    for entry in fs::read_dir(root).map_err(|e| write_error(root, e))? {
        let entry = entry.map_err(|e| write_error(root, e))?;
        let file_type = entry.file_type().map_err(|e| write_error(&entry.path(), e))?;
        if file_type.is_dir() {
            subdirs.push(entry.file_name().to_string_lossy().into_owned());
        } else {
            has_files = true;
        }
    }

    let mut written = 0;
    for name in &subdirs {
        written += write_directory_indexes(&root.join(name), config)?;
    }

    if !has_files && !subdirs.is_empty() {
        let file = root.join(&config.index_file);
        let source = render_index_module(&subdirs, config.line_ending.as_str());
        fs::write(&file, source).map_err(|e| write_error(&file, e))?;
        written += 1;
    }

    Ok(written)
}

/// Delete a locale root and everything below it; a missing root is fine
pub fn remove_tree(root: &Path) -> LingoResult<()> {
    match fs::remove_dir_all(root) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(write_error(root, e)),
    }
}

/// Recursively copy `source` to `target`. Returns the number of files copied.
pub fn copy_tree(source: &Path, target: &Path) -> LingoResult<usize> {
    fs::create_dir_all(target).map_err(|e| write_error(target, e))?;

    let mut copied = 0;
    for entry in fs::read_dir(source).map_err(|e| write_error(source, e))? {
        let entry = entry.map_err(|e| write_error(source, e))?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if entry.file_type().map_err(|e| write_error(&from, e))?.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| write_error(&to, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}
