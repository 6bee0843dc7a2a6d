//! Excel (.xlsx) workbook writer.
//!
//! [`XlsxWorkbook`] implements [`SheetWriter`](crate::sheet::SheetWriter)
//! and [`SaveTarget`](crate::sheet::SaveTarget), so the composer can lay a
//! document onto it and the result can be saved as an OOXML package.
//!
//! Style dictionaries are converted into [`CellFormat`] values when they
//! are applied; fonts, fills, borders and number formats are deduplicated
//! into `xl/styles.xml` only when the package is assembled.

pub mod constants;
pub mod error;
pub mod format;
pub mod properties;
pub mod writer;

pub use constants::lookup_symbol;
pub use error::{Result, XlsxError};
pub use format::{
    CellAlignment, CellBorder, CellBorderLineStyle, CellBorderSide, CellFill, CellFillPatternType,
    CellFont, CellFormat, HorizontalAlignment, VerticalAlignment,
};
pub use properties::DocumentProperties;
pub use writer::{CellComment, Worksheet, XlsxWorkbook};
