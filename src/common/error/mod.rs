//! Unified error types for htmlsheet.
//!
//! Every fallible public operation returns [`Result`]. Writer-specific
//! failures travel through [`Error::Writer`] untouched so callers can
//! downcast to the concrete writer error when they need the details.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
