//! Common types and utilities shared across the extractor, the composer and
//! the XLSX writer.

// Submodule declarations
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
