//! Typed cell values from text and `_excel-explicit` hints.

use super::attrs;
use super::decode::StyleDecoder;
use crate::document::{Cell, Element, Row};
use crate::sheet::{CellValue, SheetWriter, ValueKind};
use serde_json::Value;
use tracing::warn;

/// Value kind requested for `cell`, falling back to its row's hint.
///
/// Symbolic hints go through the writer's constant table first. Hints that
/// name no kind are reported and treated as [`ValueKind::Auto`].
pub fn value_kind<W>(cell: &Cell, row: &Row, decoder: &StyleDecoder<'_, W>) -> ValueKind
where
    W: SheetWriter + ?Sized,
{
    let Some(hint) = cell
        .attribute(attrs::EXPLICIT_TYPE)
        .or_else(|| row.attribute(attrs::EXPLICIT_TYPE))
    else {
        return ValueKind::Auto;
    };

    let resolved = match decoder.resolve_symbol(hint.trim()) {
        Some(Value::String(name)) => name,
        _ => hint.to_string(),
    };

    resolved.parse().unwrap_or_else(|err| {
        warn!(%err, "falling back to automatic value type");
        ValueKind::Auto
    })
}

/// The value written for `cell`: trimmed text converted per its hint.
pub fn cell_value<W>(cell: &Cell, row: &Row, decoder: &StyleDecoder<'_, W>) -> CellValue
where
    W: SheetWriter + ?Sized,
{
    CellValue::from_text(cell.value().trim(), value_kind(cell, row, decoder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::tests::RecordingWriter;
    use crate::document::Attributes;
    use serde_json::json;

    fn cell(text: &str, attributes: &[(&str, &str)]) -> Cell {
        let mut cell = Cell::new(attributes.iter().copied().collect::<Attributes>());
        cell.set_value(text.to_string());
        cell
    }

    fn row(attributes: &[(&str, &str)]) -> Row {
        Row::new(attributes.iter().copied().collect())
    }

    #[test]
    fn test_auto_is_default() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        assert_eq!(cell_value(&cell(" 12.5 ", &[]), &row(&[]), &decoder), CellValue::Number(12.5));
        assert_eq!(cell_value(&cell(" abc ", &[]), &row(&[]), &decoder), CellValue::String("abc".into()));
    }

    #[test]
    fn test_cell_hint_overrides_row_hint() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let row = row(&[(attrs::EXPLICIT_TYPE, "string")]);

        assert_eq!(cell_value(&cell("007", &[]), &row, &decoder), CellValue::String("007".into()));
        let numeric = cell("007", &[(attrs::EXPLICIT_TYPE, "n")]);
        assert_eq!(cell_value(&numeric, &row, &decoder), CellValue::Number(7.0));
    }

    #[test]
    fn test_symbolic_hint_resolved_through_writer() {
        let writer = RecordingWriter::with_constants(&[("DataType::TYPE_STRING", json!("string"))]);
        let decoder = StyleDecoder::new(&writer);
        let text = cell("42", &[(attrs::EXPLICIT_TYPE, "DataType::TYPE_STRING")]);
        assert_eq!(cell_value(&text, &row(&[]), &decoder), CellValue::String("42".into()));
    }

    #[test]
    fn test_unknown_hint_is_auto() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let odd = cell("3", &[(attrs::EXPLICIT_TYPE, "date")]);
        assert_eq!(value_kind(&odd, &row(&[]), &decoder), ValueKind::Auto);
        assert_eq!(cell_value(&odd, &row(&[]), &decoder), CellValue::Number(3.0));
    }

    #[test]
    fn test_formula_hint() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let formula = cell(" =SUM(A1:B1) ", &[(attrs::EXPLICIT_TYPE, "formula")]);
        assert_eq!(cell_value(&formula, &row(&[]), &decoder), CellValue::Formula("SUM(A1:B1)".into()));
    }
}
