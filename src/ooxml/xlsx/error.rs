//! Error type of the XLSX writer.

use crate::ooxml::opc::OpcError;
use crate::sheet::{CellRange, GridAddress};
use thiserror::Error;

/// Failures raised while building or serialising a workbook.
#[derive(Error, Debug)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Address outside the worksheet grid
    #[error("Invalid cell address: column {}, row {}", .0.column, .0.row)]
    InvalidAddress(GridAddress),

    /// Merge that intersects a range already merged on the sheet
    #[error("Merge {range} overlaps existing merge {existing}")]
    OverlappingMerge { range: CellRange, existing: CellRange },

    /// Style key the writer does not understand
    #[error("Unsupported style key: {0}")]
    UnsupportedStyle(String),

    /// Style key with a value of the wrong shape
    #[error("Invalid value for style '{key}': {value}")]
    InvalidStyleValue { key: String, value: String },

    /// Sheet operation before any sheet was created
    #[error("No worksheet has been created")]
    NoSheet,

    /// Package assembly failure
    #[error("Package error: {0}")]
    Package(OpcError),

    /// XML formatting failure
    #[error("XML write error: {0}")]
    Xml(#[from] std::fmt::Error),
}

impl XlsxError {
    pub(crate) fn invalid_value(key: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::InvalidStyleValue {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

impl From<OpcError> for XlsxError {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::IoError(e) => XlsxError::Io(e),
            other => XlsxError::Package(other),
        }
    }
}

/// Result type for XLSX writer operations.
pub type Result<T> = std::result::Result<T, XlsxError>;
