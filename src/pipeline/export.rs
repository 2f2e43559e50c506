//! Module tree → translation workbook

use super::{unsuccessful, LocaleOutcome, LocaleStatus};
use crate::codec::flatten;
use crate::config::{LocaleConfig, SyncConfig};
use crate::error::{LingoError, LingoResult};
use crate::excel::ExcelExporter;
use crate::merge::{locale_rows, merge_rows, seed_rows};
use crate::parser::read_locale_tree;
use crate::types::{RowSet, Sheet};
use crate::writer::copy_tree;
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// `translate-YYYYMMDD-HH-mm-ss.xlsx`
pub fn workbook_file_name(time: &DateTime<Local>) -> String {
    format!("translate-{}.xlsx", time.format("%Y%m%d-%H-%M-%S"))
}

#[derive(Debug)]
pub struct ExportReport {
    pub workbook_path: PathBuf,
    /// Data rows of the default locale
    pub default_rows: usize,
    pub outcomes: Vec<LocaleOutcome>,
}

impl ExportReport {
    pub fn failures(&self) -> impl Iterator<Item = &LocaleOutcome> {
        unsuccessful(&self.outcomes)
    }

    pub fn sheet_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }
}

pub struct ExportPipeline<'a> {
    config: &'a SyncConfig,
}

impl<'a> ExportPipeline<'a> {
    pub fn new(config: &'a SyncConfig) -> Self {
        Self { config }
    }

    /// Export every non-default locale into a workbook stamped with the
    /// current local time
    pub fn run(&self) -> LingoResult<ExportReport> {
        self.run_at(&Local::now())
    }

    /// Export with an explicit timestamp for the workbook file name
    pub fn run_at(&self, time: &DateTime<Local>) -> LingoResult<ExportReport> {
        let default_locale = self.config.default_locale()?;
        info!(locale = %default_locale.display_name, "Exporting default locale");
        let default_rows = self.load_default(default_locale)?;
        debug!(rows = default_rows.len(), "Default locale flattened");

        let mut exporter = ExcelExporter::new();
        let mut outcomes = Vec::new();

        for locale in self.config.target_locales() {
            info!(locale = %locale.display_name, "Exporting locale");
            let status = match self.export_locale(locale, default_locale, &default_rows) {
                Ok((rows, status)) => {
                    let sheet = Sheet::new(locale.display_name.clone(), rows.to_grid());
                    match exporter.append_sheet(&sheet) {
                        Ok(()) => status,
                        Err(e) => LocaleStatus::Failed(e),
                    }
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => LocaleStatus::Failed(e),
            };
            if let LocaleStatus::Failed(e) = &status {
                error!(locale = %locale.display_name, kind = e.kind(), "Export failed: {}", e);
            }
            outcomes.push(LocaleOutcome::new(locale.display_name.clone(), status));
        }

        let export_dir = &self.config.workbook.export_dir;
        fs::create_dir_all(export_dir).map_err(|e| {
            LingoError::Write(format!("{}: {}", export_dir.display(), e))
        })?;
        let workbook_path = export_dir.join(workbook_file_name(time));
        exporter.save(&workbook_path)?;
        info!(path = %workbook_path.display(), sheets = exporter.sheet_names().len(), "Workbook written");

        Ok(ExportReport {
            workbook_path,
            default_rows: default_rows.len(),
            outcomes,
        })
    }

    /// Flatten the default locale under the `[path, default name]` header
    pub fn load_default(&self, default_locale: &LocaleConfig) -> LingoResult<RowSet> {
        let tree = read_locale_tree(&default_locale.path, &self.config.modules).map_err(|e| {
            LingoError::Load(format!(
                "Default locale '{}' unreadable: {}",
                default_locale.display_name, e
            ))
        })?;
        let header = vec![
            self.config.workbook.path_header.clone(),
            default_locale.display_name.clone(),
        ];
        Ok(flatten(&tree, header))
    }

    /// Build one locale's sheet rows: seed a missing locale from the default
    /// tree, otherwise merge its current strings against the default rows.
    pub fn export_locale(
        &self,
        locale: &LocaleConfig,
        default_locale: &LocaleConfig,
        default_rows: &RowSet,
    ) -> LingoResult<(RowSet, LocaleStatus)> {
        if !locale.path.exists() {
            let copied = copy_tree(&default_locale.path, &locale.path)?;
            info!(locale = %locale.display_name, files = copied, "Seeded from default locale");
            let rows = seed_rows(default_rows, &locale.display_name);
            let count = rows.len();
            return Ok((rows, LocaleStatus::Seeded { rows: count }));
        }

        let tree = read_locale_tree(&locale.path, &self.config.modules)?;
        let existing = locale_rows(&flatten(&tree, default_rows.header.clone()));
        let merged = merge_rows(default_rows, &existing, &locale.display_name);
        debug!(
            locale = %locale.display_name,
            carried = merged.stats.carried,
            cleared = merged.stats.cleared,
            reused = merged.stats.reused,
            missing = merged.stats.missing,
            "Merged"
        );
        Ok((merged.rows, LocaleStatus::Merged(merged.stats)))
    }
}
