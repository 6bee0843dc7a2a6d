//! Workbook writer components for XLSX.

pub mod sheet;
pub mod strings;
pub mod styles;
pub mod workbook;

pub use sheet::{CellComment, Worksheet};
pub use strings::SharedStrings;
pub use styles::StylesBuilder;
pub use workbook::{DEFAULT_NOTE_AUTHOR, XlsxWorkbook};
