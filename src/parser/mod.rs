//! Locale module tree reader
//!
//! Reads a directory of generated modules back into a [`KeyTree`]. Two kinds
//! of module are recognized:
//! - leaf modules, `export default { "Key": "value", ... }` (JSON as written by
//!   this tool, or a plain object literal such as `{ Key: 'value', }`)
//! - index modules, one `import ident from './dir'` per child directory
//!   followed by `export default { ident, ... }`

mod literal;

use crate::codec::{module_identifier, ROOT_SEGMENT};
use crate::config::ModuleConfig;
use crate::error::{LingoError, LingoResult};
use crate::types::{KeyNode, KeyTree};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parsed content of one module file
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleSource {
    /// Strings exported directly
    Leaf(KeyTree),
    /// Child directories re-exported, in export order
    Index(Vec<IndexImport>),
}

/// One child binding of an index module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexImport {
    pub ident: String,
    pub dir: String,
}

/// Read a locale directory and wrap it under the root marker segment, ready
/// for [`crate::codec::flatten`].
pub fn read_locale_tree(dir: &Path, modules: &ModuleConfig) -> LingoResult<KeyTree> {
    if !dir.is_dir() {
        return Err(LingoError::Load(format!(
            "Locale directory not found: {}",
            dir.display()
        )));
    }
    Ok(read_tree(dir, &modules.index_file)?.wrap(ROOT_SEGMENT))
}

/// Read one directory of the module tree (unwrapped)
pub fn read_tree(dir: &Path, index_file: &str) -> LingoResult<KeyTree> {
    let mut subdirs = list_subdirectories(dir)?;
    subdirs.sort_by_key(|name| name.to_lowercase());

    let mut tree = KeyTree::new();
    let mut visited = HashSet::new();

    let index_path = dir.join(index_file);
    if index_path.is_file() {
        let content = fs::read_to_string(&index_path)?;
        let source = parse_module_source(&content).map_err(|e| {
            LingoError::Load(format!("{}: {}", index_path.display(), e))
        })?;

        match source {
            ModuleSource::Leaf(leaves) => {
                for (key, node) in leaves.iter() {
                    tree.insert(key, node.clone());
                }
            }
            ModuleSource::Index(imports) => {
                for import in imports {
                    let child = dir.join(&import.dir);
                    if !child.is_dir() {
                        continue;
                    }
                    tree.insert_tree(import.ident, read_tree(&child, index_file)?);
                    visited.insert(import.dir);
                }
            }
        }
    }

    for name in subdirs {
        if visited.contains(&name) {
            continue;
        }
        let subtree = read_tree(&dir.join(&name), index_file)?;
        let key = module_identifier(&name);
        if tree.get(&key).is_some_and(|node| node.as_leaf().is_some()) {
            warn!(
                dir = %dir.display(),
                key = %key,
                "Subdirectory '{}' replaces a leaf string with the same key", name
            );
        }
        tree.insert_tree(key, subtree);
    }

    Ok(tree)
}

fn list_subdirectories(dir: &Path) -> LingoResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Classify and parse the text of a module file
pub fn parse_module_source(content: &str) -> LingoResult<ModuleSource> {
    if let Some(tree) = parse_leaf_module(content) {
        return Ok(ModuleSource::Leaf(tree));
    }

    let imports = parse_index_module(content)?;
    if imports.is_empty() {
        return Err(LingoError::Load(
            "Neither a leaf module nor an index module".to_string(),
        ));
    }
    Ok(ModuleSource::Index(imports))
}

/// `export default { ... }` → tree; `None` when the body is neither a JSON
/// object nor a literal-only object expression
fn parse_leaf_module(content: &str) -> Option<KeyTree> {
    let body = content.trim().strip_prefix("export default")?.trim();
    let json = body.strip_suffix(';').unwrap_or(body).trim();
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Some(object_to_tree(map)),
        Ok(_) => None,
        Err(_) => literal::parse_object_literal(body),
    }
}

fn object_to_tree(map: serde_json::Map<String, Value>) -> KeyTree {
    let mut tree = KeyTree::new();
    for (key, value) in map {
        let node = match value {
            Value::Object(inner) => KeyNode::Tree(object_to_tree(inner)),
            Value::String(s) => KeyNode::Leaf(s),
            Value::Null => KeyNode::Leaf(String::new()),
            other => KeyNode::Leaf(other.to_string()),
        };
        tree.insert(key, node);
    }
    tree
}

fn parse_index_module(content: &str) -> LingoResult<Vec<IndexImport>> {
    let import_pattern =
        Regex::new(r#"(?m)^\s*import\s+([A-Za-z_$][\w$]*)\s+from\s+['"]\./([^'"]+)['"]\s*;?\s*$"#)
            .map_err(|e| LingoError::Load(format!("Regex error: {}", e)))?;
    let export_pattern = Regex::new(r"(?s)export\s+default\s*\{(.*?)\}")
        .map_err(|e| LingoError::Load(format!("Regex error: {}", e)))?;

    let imports: Vec<IndexImport> = import_pattern
        .captures_iter(content)
        .map(|caps| {
            let target = caps[2].trim_end_matches('/');
            let dir = target.strip_suffix("/index").unwrap_or(target);
            IndexImport {
                ident: caps[1].to_string(),
                dir: dir.to_string(),
            }
        })
        .collect();

    let Some(exports) = export_pattern.captures(content) else {
        return Ok(imports);
    };

    let mut ordered = Vec::with_capacity(imports.len());
    for ident in exports[1].split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(import) = imports.iter().find(|i| i.ident == ident) {
            ordered.push(import.clone());
        }
    }
    for import in &imports {
        if !ordered.iter().any(|o| o.ident == import.ident) {
            ordered.push(import.clone());
        }
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_leaf_module_keeps_key_order() {
        let source = "export default {\n  \"Zeta\": \"z\",\n  \"Alpha\": \"a\"\n}\n";
        let ModuleSource::Leaf(tree) = parse_module_source(source).unwrap() else {
            panic!("Expected leaf module");
        };
        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_parse_leaf_module_scalars_and_semicolon() {
        let source = "export default {\"Count\": 3, \"On\": true, \"Nested\": {\"A\": \"x\"}};";
        let ModuleSource::Leaf(tree) = parse_module_source(source).unwrap() else {
            panic!("Expected leaf module");
        };
        assert_eq!(tree.get("Count").and_then(KeyNode::as_leaf), Some("3"));
        assert_eq!(tree.get("On").and_then(KeyNode::as_leaf), Some("true"));
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_parse_formatted_object_literal() {
        let source = "export default {\n  Name: 'Name',\n  Save: 'Save',\n}\n";
        let ModuleSource::Leaf(tree) = parse_module_source(source).unwrap() else {
            panic!("Expected leaf module");
        };
        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, vec!["Name", "Save"]);
        assert_eq!(tree.get("Name").and_then(KeyNode::as_leaf), Some("Name"));
    }

    #[test]
    fn test_parse_single_line_object_literal() {
        let source = "export default { Title: 'Bonjour', Body: 'Texte' }\n";
        let ModuleSource::Leaf(tree) = parse_module_source(source).unwrap() else {
            panic!("Expected leaf module");
        };
        assert_eq!(tree.get("Title").and_then(KeyNode::as_leaf), Some("Bonjour"));
        assert_eq!(tree.get("Body").and_then(KeyNode::as_leaf), Some("Texte"));
    }

    #[test]
    fn test_parse_index_module_export_order() {
        let source = "import Index from './Index/index'\nimport userInfo from './user-info'\nimport about from \"./about\";\n\nexport default {\n  Index,\n  about,\n  userInfo,\n}\n";
        let ModuleSource::Index(imports) = parse_module_source(source).unwrap() else {
            panic!("Expected index module");
        };
        let pairs: Vec<(&str, &str)> = imports
            .iter()
            .map(|i| (i.ident.as_str(), i.dir.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Index", "Index"), ("about", "about"), ("userInfo", "user-info")]
        );
    }

    #[test]
    fn test_parse_unrecognized_module() {
        assert!(parse_module_source("const x = 1").is_err());
    }

    #[test]
    fn test_read_locale_tree_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = read_locale_tree(&temp.path().join("nope"), &ModuleConfig::default())
            .unwrap_err();
        assert!(matches!(err, LingoError::Load(_)));
    }

    #[test]
    fn test_read_tree_without_index_modules() {
        let temp = TempDir::new().unwrap();
        let section = temp.path().join("user-info");
        fs::create_dir_all(&section).unwrap();
        fs::write(section.join("index.ts"), "export default {\"Title\": \"Hi\"}\n").unwrap();

        let tree = read_locale_tree(temp.path(), &ModuleConfig::default()).unwrap();
        let root = tree.get(ROOT_SEGMENT).and_then(KeyNode::as_tree).unwrap();
        let user_info = root.get("userInfo").and_then(KeyNode::as_tree).unwrap();
        assert_eq!(user_info.get("Title").and_then(KeyNode::as_leaf), Some("Hi"));
    }

    #[test]
    fn test_read_tree_object_literal_modules() {
        let temp = TempDir::new().unwrap();
        let section = temp.path().join("common");
        fs::create_dir_all(&section).unwrap();
        fs::write(section.join("index.ts"), "export default {\n  Ok: 'OK',\n}\n").unwrap();
        fs::write(
            temp.path().join("index.ts"),
            "import common from './common'\n\nexport default {\n  common,\n}\n",
        )
        .unwrap();

        let tree = read_tree(temp.path(), "index.ts").unwrap();
        let common = tree.get("common").and_then(KeyNode::as_tree).unwrap();
        assert_eq!(common.get("Ok").and_then(KeyNode::as_leaf), Some("OK"));
    }

    #[test]
    fn test_read_tree_subdirectory_replaces_same_named_leaf() {
        let temp = TempDir::new().unwrap();
        let child = temp.path().join("button");
        fs::create_dir_all(&child).unwrap();
        fs::write(child.join("index.ts"), "export default { Ok: 'OK' }\n").unwrap();
        fs::write(
            temp.path().join("index.ts"),
            "export default { button: 'Button', Title: 'Home' }\n",
        )
        .unwrap();

        let tree = read_tree(temp.path(), "index.ts").unwrap();
        let keys: Vec<&str> = tree.keys().collect();
        assert_eq!(keys, vec!["button", "Title"]);
        assert!(tree.get("button").and_then(KeyNode::as_tree).is_some());
    }
}
