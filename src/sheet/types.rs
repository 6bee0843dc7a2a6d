//! Value and style types passed across the writer boundary.

use std::fmt;
use std::str::FromStr;

/// A decoded style or dimension dictionary.
///
/// Keys follow the vocabulary of the writer that consumes them; the
/// composer only merges and forwards these maps.
pub type StyleMap = serde_json::Map<String, serde_json::Value>;

/// Types of data that can be stored in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit floating point number
    Number(f64),
    /// String value
    String(String),
    /// Formula text, without a leading `=`
    Formula(String),
}

impl CellValue {
    /// Convert trimmed cell text according to a type hint.
    ///
    /// [`ValueKind::Auto`] stores finite numbers as numbers and everything
    /// else as text. Digits with a leading zero (`00123`) stay text. Hints that do not fit the text fall back to a string,
    /// so no cell content is ever lost.
    pub fn from_text(text: &str, kind: ValueKind) -> Self {
        match kind {
            ValueKind::Auto => match parse_number(text).filter(|_| !has_leading_zero(text)) {
                Some(n) => CellValue::Number(n),
                None => CellValue::String(text.to_string()),
            },
            ValueKind::String => CellValue::String(text.to_string()),
            ValueKind::Number => match parse_number(text) {
                Some(n) => CellValue::Number(n),
                None => CellValue::String(text.to_string()),
            },
            ValueKind::Bool => match parse_bool(text) {
                Some(b) => CellValue::Bool(b),
                None => CellValue::String(text.to_string()),
            },
            ValueKind::Formula => {
                let formula = text.strip_prefix('=').unwrap_or(text);
                if formula.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Formula(formula.to_string())
                }
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => f.write_str(ryu::Buffer::new().format(*n).trim_end_matches(".0")),
            CellValue::String(s) => f.write_str(s),
            CellValue::Formula(s) => write!(f, "={}", s),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether the text opens with `0` followed by another digit.
fn has_leading_zero(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text).as_bytes();
    matches!(digits, [b'0', d, ..] if d.is_ascii_digit())
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Explicit value type requested through a cell or row hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Let the writer infer the type from the text
    #[default]
    Auto,
    String,
    Number,
    Bool,
    Formula,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Auto => "auto",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::Formula => "formula",
        }
    }
}

/// Error returned when a type hint names no known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value type hint: {0}")]
pub struct UnknownValueKind(pub String);

impl FromStr for ValueKind {
    type Err = UnknownValueKind;

    /// Accepts short and long names case-insensitively, as well as
    /// `DataType::TYPE_*` symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .rsplit_once("::")
            .map(|(_, tail)| tail.strip_prefix("TYPE_").unwrap_or(tail))
            .unwrap_or(trimmed);

        match name.to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(ValueKind::Auto),
            "s" | "str" | "string" | "inlinestr" => Ok(ValueKind::String),
            "n" | "number" | "numeric" => Ok(ValueKind::Number),
            "b" | "bool" | "boolean" => Ok(ValueKind::Bool),
            "f" | "formula" => Ok(ValueKind::Formula),
            _ => Err(UnknownValueKind(trimmed.to_string())),
        }
    }
}
