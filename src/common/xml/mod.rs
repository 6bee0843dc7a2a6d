//! XML helpers used by the package writer.

pub mod escape;

pub use escape::{escape_xml, strip_invalid_xml_chars};
