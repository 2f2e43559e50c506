//! Locale and workbook configuration
//!
//! Loaded once at startup from a YAML file, validated against the embedded
//! JSON Schema, and passed by reference into every pipeline stage.

use crate::error::{LingoError, LingoResult};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lingo.yaml";

fn default_path_header() -> String {
    "Key path".to_string()
}

fn default_index_file() -> String {
    "index.ts".to_string()
}

/// One configured locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale identifier, e.g. `th_TH`
    pub id: String,
    /// Display name; sheets are matched against it on import
    #[serde(rename = "name")]
    pub display_name: String,
    /// Root directory of the locale's module tree
    pub path: PathBuf,
    /// Machine translation language code, e.g. `th`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    /// Source-of-truth locale for exports
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

/// Workbook locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookConfig {
    /// Filled-in workbook read by `import`
    pub import_path: PathBuf,
    /// Directory receiving `translate-<timestamp>.xlsx` on `export`
    pub export_dir: PathBuf,
    /// Header label of the key path column
    #[serde(default = "default_path_header")]
    pub path_header: String,
}

/// Line endings of generated modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// CRLF on Windows, LF elsewhere
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
            LineEnding::Auto => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

/// Generated module settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default = "default_index_file")]
    pub index_file: String,
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
            line_ending: LineEnding::Auto,
        }
    }
}

/// Complete, validated configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub locales: Vec<LocaleConfig>,
    pub workbook: WorkbookConfig,
    #[serde(default)]
    pub modules: ModuleConfig,
}

impl SyncConfig {
    /// Load a configuration file.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn load(path: &Path) -> LingoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LingoError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_yaml_str(&content, base_dir)
    }

    /// Parse and validate configuration text
    pub fn from_yaml_str(content: &str, base_dir: &Path) -> LingoResult<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
        validate_against_schema(&yaml)?;

        let mut config: SyncConfig = serde_yaml::from_value(yaml)?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        for locale in &mut self.locales {
            locale.path = resolve(base_dir, &locale.path);
        }
        self.workbook.import_path = resolve(base_dir, &self.workbook.import_path);
        self.workbook.export_dir = resolve(base_dir, &self.workbook.export_dir);
    }

    /// Check the invariants the schema cannot express
    pub fn validate(&self) -> LingoResult<()> {
        let defaults: Vec<&str> = self
            .locales
            .iter()
            .filter(|l| l.is_default)
            .map(|l| l.id.as_str())
            .collect();
        match defaults.len() {
            0 => {
                return Err(LingoError::Config(
                    "No locale is marked `default: true`".to_string(),
                ))
            }
            1 => {}
            _ => {
                return Err(LingoError::Config(format!(
                    "Only one locale may be the default, found: {}",
                    defaults.join(", ")
                )))
            }
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for locale in &self.locales {
            if !ids.insert(locale.id.as_str()) {
                return Err(LingoError::Config(format!(
                    "Duplicate locale id '{}'",
                    locale.id
                )));
            }
            if !names.insert(locale.display_name.as_str()) {
                return Err(LingoError::Config(format!(
                    "Duplicate locale name '{}'",
                    locale.display_name
                )));
            }
        }

        Ok(())
    }

    /// The source-of-truth locale
    pub fn default_locale(&self) -> LingoResult<&LocaleConfig> {
        self.locales
            .iter()
            .find(|l| l.is_default)
            .ok_or_else(|| LingoError::Config("No default locale configured".to_string()))
    }

    /// Every locale except the default, in configuration order
    pub fn target_locales(&self) -> impl Iterator<Item = &LocaleConfig> {
        self.locales.iter().filter(|l| !l.is_default)
    }

    /// Locale whose display name equals a sheet name
    pub fn locale_by_name(&self, name: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|l| l.display_name == name)
    }

    pub fn locale_by_id(&self, id: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|l| l.id == id)
    }

    /// Replace the import workbook path for this run
    pub fn with_import_path(mut self, path: PathBuf) -> Self {
        self.workbook.import_path = path;
        self
    }

    /// Replace the export directory for this run
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.workbook.export_dir = dir;
        self
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Validate configuration YAML against the embedded JSON Schema
fn validate_against_schema(yaml: &serde_yaml::Value) -> LingoResult<()> {
    let schema_str = include_str!("../../schema/lingo-config.schema.json");
    let schema_value: serde_json::Value = serde_json::from_str(schema_str)
        .map_err(|e| LingoError::Config(format!("Failed to parse schema: {}", e)))?;

    let compiled_schema = JSONSchema::compile(&schema_value)
        .map_err(|e| LingoError::Config(format!("Failed to compile schema: {}", e)))?;

    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| LingoError::Config(format!("Failed to convert YAML to JSON: {}", e)))?;

    if let Err(errors) = compiled_schema.validate(&json_value) {
        let error_messages: Vec<String> = errors.map(|e| format!("  - {}", e)).collect();
        return Err(LingoError::Config(format!(
            "Schema validation failed:\n{}",
            error_messages.join("\n")
        )));
    }

    Ok(())
}
