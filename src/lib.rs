//! Lingo - locale module trees ↔ translation workbooks
//!
//! This library flattens per-locale string modules into spreadsheet rows for
//! translators, merges previously supplied translations forward, and
//! regenerates the module trees from a filled-in workbook.
//!
//! # Features
//!
//! - Key-path flattening in source order, with directory-name normalization
//! - Translation merge: carry-forward, review-on-unchanged, reuse of
//!   identical default strings
//! - One .xlsx workbook with a sheet per target locale
//! - Destructive, from-scratch regeneration of leaf and index modules
//!
//! # Example
//!
//! ```no_run
//! use royalbit_lingo::config::SyncConfig;
//! use royalbit_lingo::pipeline::ExportPipeline;
//! use std::path::Path;
//!
//! let config = SyncConfig::load(Path::new("lingo.yaml"))?;
//! let report = ExportPipeline::new(&config).run()?;
//!
//! println!("Workbook: {}", report.workbook_path.display());
//! println!("Sheets: {}", report.sheet_count());
//! # Ok::<(), royalbit_lingo::error::LingoError>(())
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod excel;
pub mod merge;
pub mod parser;
pub mod pipeline;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::{LocaleConfig, SyncConfig};
pub use error::{LingoError, LingoResult};
pub use types::{FlatRow, KeyNode, KeyTree, RowSet, Sheet};
