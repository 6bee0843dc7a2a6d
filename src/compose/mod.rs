//! Grid composition: laying a [`Document`] out on a spreadsheet.
//!
//! Each table becomes one sheet. Rows map to grid rows in order; cells map
//! to grid columns, skipping addresses already covered by a merged range so
//! that `colspan` and `rowspan` line up the way a browser would render
//! them.
//!
//! ```
//! use htmlsheet::compose::Composer;
//! use htmlsheet::html::HtmlParser;
//! use htmlsheet::ooxml::xlsx::XlsxWorkbook;
//! use htmlsheet::sheet::GridAddress;
//!
//! let doc = HtmlParser::from_html(
//!     r#"<table><tr><td colspan="2">Total</td><td>3</td></tr></table>"#,
//! )
//! .parse()?;
//!
//! let mut workbook = XlsxWorkbook::new();
//! Composer::default().compose(&doc, &mut workbook)?;
//! assert!(workbook.sheet(0).is_some_and(|s| s.value(GridAddress::new(3, 1)).is_some()));
//! # Ok::<(), htmlsheet::Error>(())
//! ```

pub mod attrs;
pub mod decode;
pub mod style;
pub mod value;

pub use decode::StyleDecoder;
pub use style::{DimensionPrecedence, Dimensions, StyleResolver};

use crate::common::{Error, Result};
use crate::config::ConverterConfig;
use crate::document::{Cell, Document, Element, Row, Table};
use crate::sheet::{CellRange, GridAddress, SheetWriter};
use tracing::{debug, trace};

/// Walks a document and issues writes to a [`SheetWriter`].
#[derive(Debug, Clone, Default)]
pub struct Composer {
    resolver: StyleResolver,
    precedence: DimensionPrecedence,
}

impl Composer {
    pub fn new(resolver: StyleResolver, precedence: DimensionPrecedence) -> Self {
        Self {
            resolver,
            precedence,
        }
    }

    /// Build a composer from the style defaults of a configuration.
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(
            StyleResolver::new(
                config.default_styles.clone(),
                config.default_header_styles.clone(),
                config.default_dimensions.clone(),
            ),
            config.dimension_precedence,
        )
    }

    /// Write every table of `document` to its own sheet.
    ///
    /// Stops at the first writer failure, leaving whatever was written so
    /// far in the writer.
    pub fn compose<W: SheetWriter>(&self, document: &Document, writer: &mut W) -> Result<()> {
        for (index, table) in document.tables().iter().enumerate() {
            self.compose_table(table, writer)?;
            debug!(
                table = index,
                sheet = writer.current_sheet().unwrap_or_default(),
                rows = table.row_count(),
                "composed table"
            );
        }
        Ok(())
    }

    fn compose_table<W: SheetWriter>(&self, table: &Table, writer: &mut W) -> Result<()> {
        writer
            .create_sheet(table.attribute(attrs::SHEET_NAME))
            .map_err(Error::writer)?;

        for (row_index, row) in (1u32..).zip(table.rows()) {
            self.compose_row(row, row_index, writer)?;
        }
        Ok(())
    }

    fn compose_row<W: SheetWriter>(&self, row: &Row, row_index: u32, writer: &mut W) -> Result<()> {
        let row_style = self
            .resolver
            .effective_style(row, &StyleDecoder::new(&*writer));
        if !row_style.is_empty() {
            writer
                .apply_row_style(row_index, &row_style)
                .map_err(Error::writer)?;
        }

        let mut col_index = 1;
        for cell in row.cells() {
            while writer.is_merged(GridAddress::new(col_index, row_index)) {
                trace!(column = col_index, row = row_index, "skipping merged address");
                col_index += 1;
            }

            self.compose_cell(cell, row, GridAddress::new(col_index, row_index), writer)?;
            col_index += 1;
        }
        Ok(())
    }

    fn compose_cell<W: SheetWriter>(
        &self,
        cell: &Cell,
        row: &Row,
        at: GridAddress,
        writer: &mut W,
    ) -> Result<()> {
        let (style, dimensions, value) = {
            let decoder = StyleDecoder::new(&*writer);
            (
                self.resolver.effective_style(cell, &decoder),
                self.resolver.effective_dimensions(cell, &decoder),
                value::cell_value(cell, row, &decoder),
            )
        };

        let cell_style = (!style.is_empty()).then_some(&style);
        writer.write_cell(at, value, cell_style).map_err(Error::writer)?;

        let from_style = Dimensions::from_style(&style);
        let from_dimensions = Dimensions::from_map(&dimensions);
        let ordered = match self.precedence {
            DimensionPrecedence::DimensionsLast => [from_style, from_dimensions],
            DimensionPrecedence::StylesLast => [from_dimensions, from_style],
        };
        for sizes in ordered {
            if let Some(width) = sizes.width {
                writer.set_column_width(at.column, width).map_err(Error::writer)?;
            }
            if let Some(height) = sizes.height {
                writer.set_row_height(at.row, height).map_err(Error::writer)?;
            }
        }

        if let Some(note) = cell.attribute(attrs::COMMENT).filter(|n| !n.trim().is_empty()) {
            writer.add_note(at, note).map_err(Error::writer)?;
        }

        let colspan = span(cell, attrs::COLSPAN);
        let rowspan = span(cell, attrs::ROWSPAN);
        if colspan > 1 || rowspan > 1 {
            let end = GridAddress::new(
                at.column.saturating_add(colspan - 1),
                at.row.saturating_add(rowspan - 1),
            );
            writer
                .merge_range(CellRange::new(at, end))
                .map_err(Error::writer)?;
        }
        Ok(())
    }
}

/// A span attribute as a positive count; absent, zero or garbage is 1.
fn span(cell: &Cell, name: &str) -> u32 {
    cell.attribute(name)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}
