//! Traits implemented by spreadsheet backends.

use super::address::{CellRange, GridAddress};
use super::types::{CellValue, StyleMap};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// A grid the composer can write onto.
///
/// Every operation targets the sheet most recently created with
/// [`create_sheet`](Self::create_sheet). Style and dimension maps are
/// passed through verbatim; their vocabulary is defined by the
/// implementation.
pub trait SheetWriter {
    /// Backend-specific error, surfaced as [`crate::Error::Writer`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append a new sheet and make it current.
    ///
    /// `None` lets the writer choose a default name.
    fn create_sheet(&mut self, name: Option<&str>) -> Result<(), Self::Error>;

    /// Name of the current sheet, if any sheet exists.
    fn current_sheet(&self) -> Option<&str>;

    /// Write a value at `at`, optionally styled.
    fn write_cell(
        &mut self,
        at: GridAddress,
        value: CellValue,
        style: Option<&StyleMap>,
    ) -> Result<(), Self::Error>;

    /// Apply a style to every cell of `range`.
    fn apply_style(&mut self, range: CellRange, style: &StyleMap) -> Result<(), Self::Error>;

    /// Apply a style to a whole grid row.
    fn apply_row_style(&mut self, row: u32, style: &StyleMap) -> Result<(), Self::Error>;

    /// Declare a merged range on the current sheet.
    fn merge_range(&mut self, range: CellRange) -> Result<(), Self::Error>;

    /// Merged ranges declared on the current sheet so far.
    fn merged_ranges(&self) -> &[CellRange];

    fn set_column_width(&mut self, column: u32, width: f64) -> Result<(), Self::Error>;

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<(), Self::Error>;

    /// Attach a note (legacy comment) to a cell.
    fn add_note(&mut self, at: GridAddress, text: &str) -> Result<(), Self::Error>;

    /// Map a `Namespace::NAME` symbol to a concrete style value.
    ///
    /// Writers without a symbol table keep the default, which leaves every
    /// symbol unresolved.
    fn resolve_constant(&self, _symbol: &str) -> Option<Value> {
        None
    }

    /// Whether `at` is covered by a merged range of the current sheet.
    fn is_merged(&self, at: GridAddress) -> bool {
        self.merged_ranges().iter().any(|range| range.contains(at))
    }
}

/// A writer that can serialise its workbook.
///
/// Implementors only build the bytes; writing to a stream or a file is
/// derived from [`to_bytes`](Self::to_bytes).
pub trait SaveTarget {
    type Error: From<std::io::Error>;

    /// Serialise the workbook into memory.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Serialise the workbook into any writer.
    fn write_to<W: Write>(&self, mut writer: W) -> Result<(), Self::Error> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialise the workbook to a file, replacing any existing one.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
