//! Tabular document model produced by the HTML extractor.
//!
//! The model is a strict ownership tree, `Document → Table → Row → Cell`,
//! kept in source order. Every entity carries the attributes of the HTML
//! node it was built from, so the composer can read layout and styling hints
//! without going back to the markup.
//!
//! Entities are built by [`crate::html::HtmlParser`] and are read-only to
//! everyone else.

mod attributes;
mod elements;

pub use attributes::Attributes;
pub use elements::{Cell, Document, Element, Row, Table};
