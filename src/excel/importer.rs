//! Excel importer implementation - .xlsx → locale sheets

use crate::error::{LingoError, LingoResult};
use crate::types::Sheet;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// Reads every worksheet of a workbook as a grid of strings
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load all sheets, in workbook order. Fails if any sheet is unreadable.
    pub fn import(&self) -> LingoResult<Vec<Sheet>> {
        self.import_each()?
            .into_iter()
            .map(|(_, sheet)| sheet)
            .collect()
    }

    /// Load every sheet separately, in workbook order. Only opening the
    /// workbook is an error here; a sheet that cannot be read is returned as
    /// its own `Err` next to its name.
    pub fn import_each(&self) -> LingoResult<Vec<(String, LingoResult<Sheet>)>> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            LingoError::Load(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for sheet_name in sheet_names {
            let sheet = workbook
                .worksheet_range(&sheet_name)
                .map(|range| Sheet::new(sheet_name.clone(), range_to_grid(&range)))
                .map_err(|e| {
                    LingoError::Load(format!("Failed to read sheet '{}': {}", sheet_name, e))
                });
            sheets.push((sheet_name, sheet));
        }

        Ok(sheets)
    }
}

/// Convert a calamine range into a grid anchored at A1.
///
/// calamine ranges start at the first used cell, so leading empty rows and
/// columns are padded back in. Trailing empty cells of each row are dropped.
pub(crate) fn range_to_grid(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut grid: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells: Vec<String> = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_to_string));
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        grid.push(cells);
    }
    grid
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
