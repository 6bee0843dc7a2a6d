//! Effective style and dimension resolution.

use super::attrs;
use super::decode::StyleDecoder;
use crate::document::Element;
use crate::sheet::{SheetWriter, StyleMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which source wins when both a style and a dimension attribute size the
/// same column or row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionPrecedence {
    /// `_excel-dimensions` is applied after the style's `width`/`height`
    #[default]
    DimensionsLast,
    /// The style's `width`/`height` is applied after `_excel-dimensions`
    StylesLast,
}

/// A column width and a row height, each optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Dimensions {
    /// Read the flat keys `width` and `height` of a style map.
    pub fn from_style(style: &StyleMap) -> Self {
        Self {
            width: style.get("width").and_then(as_size),
            height: style.get("height").and_then(as_size),
        }
    }

    /// Read a dimension map in flat or nested form.
    ///
    /// The nested form `{"column": {"width": ..}, "row": {"height": ..}}`
    /// takes priority over flat keys; `rowHeight` is accepted in place of
    /// `height` inside `row`.
    pub fn from_map(map: &StyleMap) -> Self {
        let flat = Self::from_style(map);
        let column = map.get("column").and_then(Value::as_object);
        let row = map.get("row").and_then(Value::as_object);

        Self {
            width: column
                .and_then(|c| c.get("width"))
                .and_then(as_size)
                .or(flat.width),
            height: row
                .and_then(|r| r.get("height").or_else(|| r.get("rowHeight")))
                .and_then(as_size)
                .or(flat.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/// Sizes are JSON numbers or numeric strings; negative and non-finite
/// values are ignored.
fn as_size(value: &Value) -> Option<f64> {
    let size = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (size.is_finite() && size >= 0.0).then_some(size)
}

/// Merges defaults and per-element overrides into effective maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleResolver {
    default_styles: StyleMap,
    default_header_styles: StyleMap,
    default_dimensions: StyleMap,
}

impl StyleResolver {
    pub fn new(
        default_styles: StyleMap,
        default_header_styles: StyleMap,
        default_dimensions: StyleMap,
    ) -> Self {
        Self {
            default_styles,
            default_header_styles,
            default_dimensions,
        }
    }

    /// Effective style of a table, row or cell.
    ///
    /// Defaults, then header defaults for header cells, then the element's
    /// own `_excel-styles`. The merge is shallow: a later top-level key
    /// replaces an earlier one wholesale.
    pub fn effective_style<E, W>(&self, element: &E, decoder: &StyleDecoder<'_, W>) -> StyleMap
    where
        E: Element + ?Sized,
        W: SheetWriter + ?Sized,
    {
        let mut style = self.default_styles.clone();
        if element.is_header_cell() {
            merge_into(&mut style, &self.default_header_styles);
        }
        merge_into(&mut style, &decoder.decode_attribute(element.attribute(attrs::STYLES)));
        style
    }

    /// Effective dimension map of an element.
    pub fn effective_dimensions<E, W>(&self, element: &E, decoder: &StyleDecoder<'_, W>) -> StyleMap
    where
        E: Element + ?Sized,
        W: SheetWriter + ?Sized,
    {
        let mut dimensions = self.default_dimensions.clone();
        merge_into(
            &mut dimensions,
            &decoder.decode_attribute(element.attribute(attrs::DIMENSIONS)),
        );
        dimensions
    }
}

/// Shallow merge, later keys win.
pub fn merge_into(target: &mut StyleMap, source: &StyleMap) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::tests::RecordingWriter;
    use crate::document::{Attributes, Cell};
    use serde_json::json;

    fn map(value: Value) -> StyleMap {
        match value {
            Value::Object(m) => m,
            _ => unreachable!("test maps are objects"),
        }
    }

    fn cell(attributes: &[(&str, &str)], header: bool) -> Cell {
        let mut cell = Cell::new(attributes.iter().copied().collect::<Attributes>());
        cell.set_is_header(header);
        cell
    }

    fn resolver() -> StyleResolver {
        StyleResolver::new(
            map(json!({"font": {"name": "Arial", "size": 10}, "fill": "FFFFFF"})),
            map(json!({"font": {"bold": true}})),
            map(json!({"width": 12})),
        )
    }

    #[test]
    fn test_header_defaults_replace_whole_objects() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let style = resolver().effective_style(&cell(&[], true), &decoder);

        assert_eq!(style["font"], json!({"bold": true}));
        assert_eq!(style["fill"], json!("FFFFFF"));
    }

    #[test]
    fn test_element_override_wins() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let element = cell(&[(attrs::STYLES, r#"{"font": {"italic": true}, "width": 30}"#)], true);
        let style = resolver().effective_style(&element, &decoder);

        assert_eq!(style["font"], json!({"italic": true}));
        assert_eq!(style["width"], json!(30));
        assert_eq!(style["fill"], json!("FFFFFF"));
    }

    #[test]
    fn test_malformed_override_keeps_defaults() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let element = cell(&[(attrs::STYLES, "{not json")], false);
        let style = resolver().effective_style(&element, &decoder);

        assert_eq!(Value::Object(style), json!({"font": {"name": "Arial", "size": 10}, "fill": "FFFFFF"}));
    }

    #[test]
    fn test_effective_dimensions_merge() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let element = cell(&[(attrs::DIMENSIONS, r#"{"height": "18.5"}"#)], false);
        let dims = Dimensions::from_map(&resolver().effective_dimensions(&element, &decoder));

        assert_eq!(dims, Dimensions { width: Some(12.0), height: Some(18.5) });
    }

    #[test]
    fn test_nested_dimension_form() {
        let dims = Dimensions::from_map(&map(json!({
            "column": {"width": 25},
            "row": {"rowHeight": "40"},
            "width": 5
        })));
        assert_eq!(dims, Dimensions { width: Some(25.0), height: Some(40.0) });
    }

    #[test]
    fn test_invalid_sizes_ignored() {
        let dims = Dimensions::from_map(&map(json!({"width": "wide", "height": -3})));
        assert!(dims.is_empty());
    }
}
