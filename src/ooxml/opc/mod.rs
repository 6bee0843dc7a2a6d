//! Open Packaging Conventions (OPC) writer.
//!
//! An XLSX file is a ZIP archive of XML parts tied together by
//! relationship parts and a `[Content_Types].xml` manifest. This module
//! knows nothing about spreadsheets; it only assembles parts into a
//! package.

pub mod constants;
pub mod error;
pub mod package;
pub mod rel;

// Re-export commonly used types
pub use error::{OpcError, Result};
pub use package::PackageWriter;
pub use rel::Relationships;
