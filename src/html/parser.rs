//! Class-filtered HTML table extractor.

use super::filter::ClassFilter;
use super::source::HtmlSource;
use crate::common::{Error, Result};
use crate::document::{Attributes, Cell, Document, Row, Table};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

static TR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td, th").expect("BUG: hardcoded selector 'td, th' is statically valid")
});

/// Builds a [`Document`] from the tables, rows and cells of an HTML page.
///
/// Filters are independent; each one left unset selects every node of its
/// tag inside the already selected ancestor.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    source: Option<HtmlSource>,
    table_filter: ClassFilter,
    row_filter: ClassFilter,
    cell_filter: ClassFilter,
}

impl HtmlParser {
    /// Create a parser without any input.
    ///
    /// [`parse`](Self::parse) fails with [`Error::Configuration`] until a
    /// source is set with [`source`](Self::source).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser for a markup string or a file path.
    pub fn from_source(source: impl Into<HtmlSource>) -> Self {
        Self::new().source(source)
    }

    /// Create a parser for literal markup, never treated as a path.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self::new().source(HtmlSource::Markup(html.into()))
    }

    pub fn source(mut self, source: impl Into<HtmlSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Only parse tables carrying this class.
    pub fn table_class<'a>(mut self, class: impl Into<Option<&'a str>>) -> Self {
        self.table_filter = ClassFilter::new(class.into());
        self
    }

    /// Only parse rows carrying this class.
    pub fn row_class<'a>(mut self, class: impl Into<Option<&'a str>>) -> Self {
        self.row_filter = ClassFilter::new(class.into());
        self
    }

    /// Only parse cells carrying this class.
    pub fn cell_class<'a>(mut self, class: impl Into<Option<&'a str>>) -> Self {
        self.cell_filter = ClassFilter::new(class.into());
        self
    }

    /// Parse the source into a document model.
    ///
    /// The whole parse fails on the first error; no partial document is
    /// returned.
    pub fn parse(&self) -> Result<Document> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| Error::Configuration("no HTML string or file was provided".into()))?;
        let markup = source.read()?;
        Ok(self.parse_markup(&markup))
    }

    /// Parse markup that is already in memory.
    pub fn parse_markup(&self, markup: &str) -> Document {
        let html = Html::parse_document(markup);
        for err in &html.errors {
            debug!(error = %err, "html parser recovered from malformed markup");
        }
        self.extract(&html)
    }

    fn extract(&self, html: &Html) -> Document {
        let mut document = Document::new();

        for html_table in html.select(&TABLE_SELECTOR) {
            if !self.table_filter.matches(html_table.value().attr("class")) {
                continue;
            }

            let mut table = Table::new(collect_attributes(html_table));
            for html_row in html_table.select(&TR_SELECTOR) {
                if !self.row_filter.matches(html_row.value().attr("class")) {
                    continue;
                }

                let mut row = Row::new(collect_attributes(html_row));
                for html_cell in html_row.select(&CELL_SELECTOR) {
                    if !self.cell_filter.matches(html_cell.value().attr("class")) {
                        continue;
                    }
                    row.add_cell(build_cell(html_cell));
                }
                table.add_row(row);
            }

            debug!(
                table = document.table_count(),
                rows = table.row_count(),
                "extracted table"
            );
            document.add_table(table);
        }

        document
    }
}

fn build_cell(node: ElementRef<'_>) -> Cell {
    let mut cell = Cell::new(collect_attributes(node));
    cell.set_value(node.text().collect());
    cell.set_is_header(node.value().name() == "th");
    cell
}

fn collect_attributes(node: ElementRef<'_>) -> Attributes {
    node.value().attrs().collect()
}
