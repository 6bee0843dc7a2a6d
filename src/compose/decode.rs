//! Decoding of JSON-valued style and dimension attributes.

use crate::sheet::{SheetWriter, StyleMap};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Why an attribute produced no style entries.
///
/// Never surfaces to callers: the decoder logs it and yields an empty map.
#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Turns attribute values into style maps.
///
/// Symbolic constants (`Namespace::NAME`) found anywhere in the decoded
/// value are replaced through the writer's
/// [`resolve_constant`](SheetWriter::resolve_constant).
pub struct StyleDecoder<'w, W: ?Sized> {
    writer: &'w W,
}

impl<'w, W: SheetWriter + ?Sized> StyleDecoder<'w, W> {
    pub fn new(writer: &'w W) -> Self {
        Self { writer }
    }

    /// Decode a raw attribute value, `None` meaning the attribute is absent.
    pub fn decode_attribute(&self, raw: Option<&str>) -> StyleMap {
        match raw {
            Some(text) => self.decode(&Value::String(text.to_string())),
            None => StyleMap::new(),
        }
    }

    /// Decode a JSON value into a style map.
    ///
    /// Objects are taken as they are and strings are parsed as JSON. Any
    /// other value, a syntax error, or a string holding a non-object yields
    /// an empty map.
    pub fn decode(&self, value: &Value) -> StyleMap {
        match self.try_decode(value) {
            Ok(map) => map,
            Err(err) => {
                debug!(error = %err, "ignoring undecodable style attribute");
                StyleMap::new()
            },
        }
    }

    pub(crate) fn try_decode(&self, value: &Value) -> Result<StyleMap, DecodeError> {
        let mut decoded = match value {
            Value::Object(map) => Value::Object(map.clone()),
            Value::String(text) => serde_json::from_str(text)?,
            other => return Err(DecodeError::NotAnObject(json_kind(other))),
        };

        self.resolve_leaves(&mut decoded);
        match decoded {
            Value::Object(map) => Ok(map),
            other => Err(DecodeError::NotAnObject(json_kind(&other))),
        }
    }

    /// Resolve a single symbol, if the writer knows it.
    pub fn resolve_symbol(&self, text: &str) -> Option<Value> {
        if is_symbol(text) {
            self.writer.resolve_constant(text)
        } else {
            None
        }
    }

    fn resolve_leaves(&self, value: &mut Value) {
        match value {
            Value::Object(map) => map.values_mut().for_each(|v| self.resolve_leaves(v)),
            Value::Array(items) => items.iter_mut().for_each(|v| self.resolve_leaves(v)),
            Value::String(text) => {
                if let Some(resolved) = self.resolve_symbol(text) {
                    *value = resolved;
                }
            },
            _ => {},
        }
    }
}

/// Whether `text` looks like `Namespace::CONST_NAME`.
///
/// The namespace is one or more identifiers joined by `::`; the final
/// segment is an upper-case identifier.
pub fn is_symbol(text: &str) -> bool {
    let Some((namespace, name)) = text.rsplit_once("::") else {
        return false;
    };

    let is_ident = |s: &str| {
        let mut chars = s.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    let is_upper_ident = |s: &str| {
        is_ident(s) && s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    };

    namespace.split("::").all(is_ident) && is_upper_ident(name)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::tests::RecordingWriter;
    use serde_json::json;

    fn decoder_with_symbols() -> RecordingWriter {
        RecordingWriter::with_constants(&[
            ("Alignment::HORIZONTAL_CENTER", json!("center")),
            ("Border::BORDER_THIN", json!("thin")),
        ])
    }

    #[test]
    fn test_object_passes_through() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let map = decoder.decode(&json!({"font": {"bold": true}}));
        assert_eq!(Value::Object(map), json!({"font": {"bold": true}}));
    }

    #[test]
    fn test_string_is_parsed_as_json() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let map = decoder.decode_attribute(Some(r#"{"width": 20, "fill": "FF0000"}"#));
        assert_eq!(map.get("width"), Some(&json!(20)));
        assert_eq!(map.get("fill"), Some(&json!("FF0000")));
    }

    #[test]
    fn test_malformed_input_yields_empty_map() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        assert!(decoder.decode_attribute(Some("{font: bold")).is_empty());
        assert!(decoder.decode_attribute(Some("[1, 2]")).is_empty());
        assert!(decoder.decode_attribute(Some("\"text\"")).is_empty());
        assert!(decoder.decode_attribute(Some("")).is_empty());
        assert!(decoder.decode_attribute(None).is_empty());
        assert!(decoder.decode(&json!(42)).is_empty());

        assert!(matches!(decoder.try_decode(&json!("{")), Err(DecodeError::Syntax(_))));
        assert!(matches!(decoder.try_decode(&json!(null)), Err(DecodeError::NotAnObject("null"))));
    }

    #[test]
    fn test_symbols_resolved_at_any_depth() {
        let writer = decoder_with_symbols();
        let decoder = StyleDecoder::new(&writer);
        let map = decoder.decode_attribute(Some(
            r#"{"alignment": {"horizontal": "Alignment::HORIZONTAL_CENTER"},
                "borders": {"sides": ["Border::BORDER_THIN", "Border::BORDER_UNKNOWN"]}}"#,
        ));

        assert_eq!(map["alignment"]["horizontal"], json!("center"));
        assert_eq!(map["borders"]["sides"], json!(["thin", "Border::BORDER_UNKNOWN"]));
    }

    #[test]
    fn test_default_resolver_leaves_symbols() {
        let writer = RecordingWriter::default();
        let decoder = StyleDecoder::new(&writer);
        let map = decoder.decode(&json!({"h": "Alignment::HORIZONTAL_CENTER"}));
        assert_eq!(map["h"], json!("Alignment::HORIZONTAL_CENTER"));
    }

    #[test]
    fn test_symbol_shape() {
        assert!(is_symbol("Alignment::HORIZONTAL_CENTER"));
        assert!(is_symbol("Style_Fill::FILL_SOLID"));
        assert!(is_symbol("a::b::COLOR_RED2"));
        assert!(!is_symbol("Alignment::horizontal"));
        assert!(!is_symbol("::CENTER"));
        assert!(!is_symbol("center"));
        assert!(!is_symbol("A1::B2 "));
    }
}
