//! Workbook adapters
//!
//! - Export: locale sheets → one .xlsx workbook
//! - Import: .xlsx workbook → locale sheets

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
