//! Translation workbook → module tree

use super::{unsuccessful, LocaleOutcome, LocaleStatus};
use crate::codec::{unflatten, TARGET_COLUMN};
use crate::config::{LocaleConfig, SyncConfig};
use crate::error::{LingoError, LingoResult};
use crate::excel::ExcelImporter;
use crate::types::{RowSet, Sheet};
use crate::writer::{remove_tree, write_directory_indexes, write_leaf_modules};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct ImportReport {
    pub workbook_path: PathBuf,
    pub outcomes: Vec<LocaleOutcome>,
}

impl ImportReport {
    pub fn failures(&self) -> impl Iterator<Item = &LocaleOutcome> {
        unsuccessful(&self.outcomes)
    }
}

pub struct ImportPipeline<'a> {
    config: &'a SyncConfig,
    column: usize,
}

impl<'a> ImportPipeline<'a> {
    /// Import pipeline reading translations from the target column
    pub fn new(config: &'a SyncConfig) -> Self {
        Self {
            config,
            column: TARGET_COLUMN,
        }
    }

    /// Read values from another sheet column (blank cells still fall back
    /// to the default text)
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    /// Regenerate the module tree of every locale that has a sheet in the
    /// configured import workbook
    pub fn run(&self) -> LingoResult<ImportReport> {
        let workbook_path = self.config.workbook.import_path.clone();
        info!(path = %workbook_path.display(), "Reading workbook");
        let sheets = ExcelImporter::new(&workbook_path).import_each()?;

        let outcomes = sheets
            .into_iter()
            .map(|(name, sheet)| match sheet {
                Ok(sheet) => self.import_sheet(&sheet),
                Err(e) => {
                    error!(sheet = %name, kind = e.kind(), "Sheet unreadable: {}", e);
                    LocaleOutcome::new(name, LocaleStatus::Failed(e))
                }
            })
            .collect();

        Ok(ImportReport {
            workbook_path,
            outcomes,
        })
    }

    /// Import one sheet; never fails the run
    pub fn import_sheet(&self, sheet: &Sheet) -> LocaleOutcome {
        let Some(locale) = self.config.locale_by_name(&sheet.name) else {
            warn!("{}", LingoError::UnmatchedSheet(sheet.name.clone()));
            return LocaleOutcome::new(sheet.name.clone(), LocaleStatus::Unmatched);
        };

        info!(locale = %locale.display_name, path = %locale.path.display(), "Importing sheet");
        let rows = RowSet::from_grid(&sheet.cells);
        let status = match self.write_locale(locale, &rows) {
            Ok((modules, indexes)) => {
                info!(locale = %locale.display_name, modules, indexes, "Locale written");
                LocaleStatus::Written { modules, indexes }
            }
            Err(e) => {
                error!(locale = %locale.display_name, kind = e.kind(), "Import failed: {}", e);
                LocaleStatus::Failed(e)
            }
        };
        LocaleOutcome::new(locale.display_name.clone(), status)
    }

    /// Replace a locale's module tree with the contents of `rows`.
    /// Returns (leaf modules, index modules) written.
    pub fn write_locale(&self, locale: &LocaleConfig, rows: &RowSet) -> LingoResult<(usize, usize)> {
        let modules = unflatten(rows, self.column);
        if modules.is_empty() {
            return Err(LingoError::Load(format!(
                "Sheet '{}' has no key rows; keeping existing tree",
                locale.display_name
            )));
        }

        remove_tree(&locale.path)?;
        let written = write_leaf_modules(&locale.path, &modules, &self.config.modules)?;
        let indexes = write_directory_indexes(&locale.path, &self.config.modules)?;
        Ok((written, indexes))
    }
}
