//! Attribute names the composer reacts to.

/// Sheet name of a table.
pub const SHEET_NAME: &str = "_excel-name";

/// JSON style override of a table, row or cell.
pub const STYLES: &str = "_excel-styles";

/// JSON width/height override of a cell.
pub const DIMENSIONS: &str = "_excel-dimensions";

/// Note text attached to a cell.
pub const COMMENT: &str = "_excel-comment";

/// Value type hint of a cell or row.
pub const EXPLICIT_TYPE: &str = "_excel-explicit";

pub const COLSPAN: &str = "colspan";

pub const ROWSPAN: &str = "rowspan";
