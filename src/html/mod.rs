//! Selective HTML extraction.
//!
//! Turns HTML markup into a [`Document`](crate::document::Document) holding
//! only the tables, rows and cells that match optional class filters.
//! Selection is hierarchical: rows are looked up inside selected tables,
//! cells inside selected rows.
//!
//! # Example
//!
//! ```
//! use htmlsheet::html::HtmlParser;
//!
//! let html = r#"<table class="report"><tr><th>Name</th><td class="x">Ada</td></tr></table>"#;
//! let doc = HtmlParser::from_html(html).table_class("report").parse()?;
//!
//! let row = &doc.tables()[0].rows()[0];
//! assert_eq!(row.cell_count(), 2);
//! assert!(row.cells()[0].is_header());
//! # Ok::<(), htmlsheet::Error>(())
//! ```

mod filter;
mod parser;
mod source;

pub use filter::ClassFilter;
pub use parser::HtmlParser;
pub use source::{HtmlSource, MAX_PATH_LEN};
