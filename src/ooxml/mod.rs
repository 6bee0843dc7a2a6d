//! Office Open XML (OOXML) output.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): package assembly (ZIP, parts, relationships,
//!    content types)
//! 2. **Format Layer** (`xlsx`): the spreadsheet writer built on top of it
//!
//! # Example
//!
//! ```rust,no_run
//! use htmlsheet::ooxml::xlsx::XlsxWorkbook;
//! use htmlsheet::sheet::{SaveTarget, SheetWriter};
//!
//! let mut workbook = XlsxWorkbook::new();
//! workbook.create_sheet(Some("Report"))?;
//! workbook.save("report.xlsx")?;
//! # Ok::<(), htmlsheet::ooxml::xlsx::XlsxError>(())
//! ```

pub mod opc;
pub mod xlsx;

pub use opc::PackageWriter;
pub use xlsx::{XlsxError, XlsxWorkbook};
