//! Spreadsheet writer abstraction.
//!
//! The composer never talks to a file format directly. It drives a
//! [`SheetWriter`], which owns the grid: cell values, styles, merges,
//! column widths, row heights and notes. Writers that can persist
//! themselves also implement [`SaveTarget`].
//!
//! # Architecture
//!
//! - **Addresses**: [`GridAddress`] and [`CellRange`], 1-based
//! - **Values**: [`CellValue`] and the [`ValueKind`] hint that produced it
//! - **Traits**: [`SheetWriter`] for composition, [`SaveTarget`] for output
//!
//! The bundled implementation is [`crate::ooxml::xlsx::XlsxWorkbook`].

// Submodule declarations
pub mod address;
pub mod traits;
pub mod types;

// Re-exports
pub use address::{CellRange, GridAddress, MAX_COLUMNS, MAX_ROWS};
pub use traits::{SaveTarget, SheetWriter};
pub use types::{CellValue, StyleMap, ValueKind};
