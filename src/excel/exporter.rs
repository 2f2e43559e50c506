//! Excel exporter implementation - locale sheets → .xlsx

use crate::error::{LingoError, LingoResult};
use crate::types::Sheet;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Widest a column is allowed to grow, in characters
const MAX_COLUMN_WIDTH: usize = 80;

/// Accumulates one worksheet per locale and saves them as a single workbook
pub struct ExcelExporter {
    workbook: Workbook,
    sheet_names: Vec<String>,
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelExporter {
    /// Create an exporter with an empty workbook
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            sheet_names: Vec::new(),
        }
    }

    /// Names of the sheets appended so far, in order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn is_empty(&self) -> bool {
        self.sheet_names.is_empty()
    }

    /// Add a sheet. The workbook is left untouched when the sheet cannot be
    /// built (invalid or duplicate name, cell write failure).
    pub fn append_sheet(&mut self, sheet: &Sheet) -> LingoResult<()> {
        if self.sheet_names.iter().any(|name| name == &sheet.name) {
            return Err(LingoError::Excel(format!(
                "Duplicate worksheet name '{}'",
                sheet.name
            )));
        }

        let worksheet = Self::build_worksheet(sheet)?;
        self.workbook.push_worksheet(worksheet);
        self.sheet_names.push(sheet.name.clone());
        Ok(())
    }

    fn build_worksheet(sheet: &Sheet) -> LingoResult<Worksheet> {
        let mut worksheet = Worksheet::new();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| LingoError::Excel(format!("Failed to set worksheet name: {}", e)))?;

        let header_format = Format::new().set_bold();
        let mut widths: Vec<usize> = Vec::new();

        for (row_idx, row) in sheet.cells.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                let (row_num, col_num) = (row_idx as u32, col_idx as u16);
                if row_idx == 0 {
                    worksheet
                        .write_string_with_format(row_num, col_num, value, &header_format)
                        .map_err(|e| LingoError::Excel(format!("Failed to write header: {}", e)))?;
                } else if !value.is_empty() {
                    worksheet
                        .write_string(row_num, col_num, value)
                        .map_err(|e| LingoError::Excel(format!("Failed to write cell: {}", e)))?;
                }

                if widths.len() <= col_idx {
                    widths.resize(col_idx + 1, 0);
                }
                widths[col_idx] = widths[col_idx].max(value.chars().count());
            }
        }

        for (col_idx, width) in widths.iter().enumerate() {
            let width = (*width + 2).min(MAX_COLUMN_WIDTH);
            worksheet
                .set_column_width(col_idx as u16, width as f64)
                .map_err(|e| LingoError::Excel(format!("Failed to set column width: {}", e)))?;
        }

        if !sheet.cells.is_empty() {
            worksheet
                .set_freeze_panes(1, 0)
                .map_err(|e| LingoError::Excel(format!("Failed to freeze header: {}", e)))?;
        }

        Ok(worksheet)
    }

    /// Save the workbook to an .xlsx file
    pub fn save(&mut self, output_path: &Path) -> LingoResult<()> {
        self.workbook
            .save(output_path)
            .map_err(|e| LingoError::Excel(format!("Failed to save Excel file: {}", e)))
    }
}
