//! Export and import pipelines
//!
//! Both run locale by locale, strictly in sequence. A failure inside one
//! locale is captured in that locale's [`LocaleOutcome`] and the run carries
//! on; only configuration errors, an unreadable default locale, an
//! unreadable input workbook, or a failed workbook save abort the run.

mod export;
mod import;

pub use export::{workbook_file_name, ExportPipeline, ExportReport};
pub use import::{ImportPipeline, ImportReport};

use crate::error::LingoError;
use crate::merge::MergeStats;

/// Result of processing one locale (export) or one sheet (import)
#[derive(Debug)]
pub enum LocaleStatus {
    /// Export: the locale directory did not exist and was copied from the default
    Seeded { rows: usize },
    /// Export: existing translations merged against the default rows
    Merged(MergeStats),
    /// Import: module tree regenerated
    Written { modules: usize, indexes: usize },
    /// Import: no configured locale has this sheet's name
    Unmatched,
    /// Skipped after an error
    Failed(LingoError),
}

#[derive(Debug)]
pub struct LocaleOutcome {
    /// Locale display name (sheet name)
    pub locale: String,
    pub status: LocaleStatus,
}

impl LocaleOutcome {
    pub fn new(locale: impl Into<String>, status: LocaleStatus) -> Self {
        Self {
            locale: locale.into(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self.status,
            LocaleStatus::Seeded { .. } | LocaleStatus::Merged(_) | LocaleStatus::Written { .. }
        )
    }

    pub fn error(&self) -> Option<&LingoError> {
        match &self.status {
            LocaleStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcomes that did not succeed
pub(crate) fn unsuccessful(outcomes: &[LocaleOutcome]) -> impl Iterator<Item = &LocaleOutcome> {
    outcomes.iter().filter(|o| !o.is_success())
}
