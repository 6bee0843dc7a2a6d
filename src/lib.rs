//! htmlsheet - Convert HTML tables into styled spreadsheets
//!
//! This library extracts the tables of an HTML page into a small document
//! model and lays that model out on a spreadsheet grid, honouring
//! `colspan`/`rowspan` merges and per-element style hints carried in
//! special attributes.
//!
//! # Features
//!
//! - **Selective extraction**: keep only tables, rows and cells carrying a
//!   given class
//! - **Grid composition**: merged cells push later cells aside the way a
//!   browser renders them
//! - **Style hints**: `_excel-styles`, `_excel-dimensions`,
//!   `_excel-comment`, `_excel-explicit` and `_excel-name` attributes
//! - **Native XLSX output**: a self-contained OOXML writer, no spreadsheet
//!   application required
//! - **Pluggable writers**: compose onto anything implementing
//!   [`SheetWriter`]
//!
//! # Example - Converting a page
//!
//! ```no_run
//! use htmlsheet::Converter;
//!
//! # fn main() -> Result<(), htmlsheet::Error> {
//! Converter::from_source("invoice.html")
//!     .table_class(Some("items"))
//!     .process()?
//!     .save("invoice.xlsx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Styling from the markup
//!
//! ```
//! use htmlsheet::Converter;
//! use htmlsheet::sheet::{CellValue, GridAddress};
//!
//! # fn main() -> Result<(), htmlsheet::Error> {
//! let html = r#"
//!     <table _excel-name="Totals">
//!         <tr><th colspan="2" _excel-styles='{"font": {"bold": true}}'>Quarter</th></tr>
//!         <tr><td>Q1</td><td _excel-explicit="string">0012</td></tr>
//!     </table>
//! "#;
//!
//! let converter = Converter::from_html(html).process()?;
//! let sheet = converter.writer()?.sheet_by_name("Totals").unwrap();
//! assert_eq!(sheet.merged_ranges().len(), 1);
//! assert_eq!(sheet.value(GridAddress::new(2, 2)), Some(&CellValue::String("0012".into())));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Two steps with a custom writer
//!
//! ```
//! use htmlsheet::compose::Composer;
//! use htmlsheet::html::HtmlParser;
//! use htmlsheet::ooxml::xlsx::XlsxWorkbook;
//!
//! # fn main() -> Result<(), htmlsheet::Error> {
//! let document = HtmlParser::from_html("<table><tr><td>1</td></tr></table>").parse()?;
//! let mut workbook = XlsxWorkbook::new();
//! Composer::default().compose(&document, &mut workbook)?;
//! assert_eq!(workbook.sheet_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod compose;
pub mod config;
pub mod converter;
pub mod document;
pub mod html;
pub mod ooxml;
pub mod sheet;

pub use common::{Error, Result};
pub use compose::Composer;
pub use config::ConverterConfig;
pub use converter::Converter;
pub use document::{Cell, Document, Element, Row, Table};
pub use html::HtmlParser;
pub use ooxml::xlsx::XlsxWorkbook;
pub use sheet::{SaveTarget, SheetWriter};
