//! Cell formatting types and their construction from style maps.
//!
//! A style map is the decoded `_excel-styles` object. Its top-level keys
//! are `font`, `fill`, `border`/`borders`, `align`/`alignment` and
//! `format`/`numberFormat`; `width` and `height` are sizing hints handled
//! by the composer and ignored here.

use super::error::{Result, XlsxError};
use crate::sheet::StyleMap;
use serde_json::{Map, Value};

/// Cell format information.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFormat {
    pub font: Option<CellFont>,
    pub fill: Option<CellFill>,
    pub border: Option<CellBorder>,
    pub alignment: Option<CellAlignment>,
    pub number_format: Option<String>,
}

impl CellFormat {
    /// Build a format from a style map.
    ///
    /// Returns `Ok(None)` when the map carries no formatting at all, so
    /// callers can leave the cell on the default style.
    pub fn from_style(style: &StyleMap) -> Result<Option<Self>> {
        let mut format = CellFormat::default();

        for (key, value) in style {
            match key.as_str() {
                "font" => format.font = Some(CellFont::from_value(value)?),
                "fill" => format.fill = Some(CellFill::from_value(value)?),
                "border" | "borders" => format.border = Some(CellBorder::from_value(key, value)?),
                "align" | "alignment" => format.alignment = Some(CellAlignment::from_value(key, value)?),
                "format" | "numberFormat" => format.number_format = Some(number_format_code(key, value)?),
                "width" | "height" => {},
                other => return Err(XlsxError::UnsupportedStyle(other.to_string())),
            }
        }

        Ok((format != CellFormat::default()).then_some(format))
    }

    /// Whether no component deviates from the workbook default.
    pub fn is_default(&self) -> bool {
        *self == CellFormat::default()
    }
}

/// Font properties for a cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFont {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub color: Option<String>,
}

impl CellFont {
    fn from_value(value: &Value) -> Result<Self> {
        let map = object("font", value)?;
        let mut font = CellFont::default();

        for (key, v) in map {
            let path = format!("font.{}", key);
            match key.as_str() {
                "name" => font.name = Some(string(&path, v)?.to_string()),
                "size" => font.size = Some(positive_number(&path, v)?),
                "bold" => font.bold = flag(&path, v)?,
                "italic" => font.italic = flag(&path, v)?,
                "strike" | "strikethrough" => font.strike = flag(&path, v)?,
                // "single", "double" and friends all render as an underline
                "underline" => {
                    font.underline = match v {
                        Value::String(s) => !matches!(s.as_str(), "" | "none" | "false"),
                        other => flag(&path, other)?,
                    }
                },
                "color" => font.color = Some(parse_color(&path, v)?),
                _ => return Err(XlsxError::UnsupportedStyle(path)),
            }
        }
        Ok(font)
    }
}

/// Fill properties for a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFill {
    pub pattern_type: CellFillPatternType,
    pub fg_color: Option<String>,
    pub bg_color: Option<String>,
}

impl CellFill {
    /// A bare colour is a solid fill; an object may name the pattern.
    fn from_value(value: &Value) -> Result<Self> {
        if let Value::String(_) = value {
            return Ok(CellFill {
                pattern_type: CellFillPatternType::Solid,
                fg_color: Some(parse_color("fill", value)?),
                bg_color: None,
            });
        }

        let map = object("fill", value)?;
        let mut pattern = None;
        let mut fg_color = None;
        let mut bg_color = None;

        for (key, v) in map {
            let path = format!("fill.{}", key);
            match key.as_str() {
                "pattern" | "type" | "fillType" => {
                    let name = string(&path, v)?;
                    pattern = Some(
                        CellFillPatternType::parse(name)
                            .ok_or_else(|| XlsxError::invalid_value(&path, v))?,
                    );
                },
                "color" | "fgColor" | "startColor" | "startcolor" => {
                    fg_color = Some(parse_color(&path, v)?)
                },
                "bgColor" | "endColor" | "endcolor" => bg_color = Some(parse_color(&path, v)?),
                _ => return Err(XlsxError::UnsupportedStyle(path)),
            }
        }

        let pattern_type = pattern.unwrap_or(if fg_color.is_some() || bg_color.is_some() {
            CellFillPatternType::Solid
        } else {
            CellFillPatternType::None
        });

        Ok(CellFill {
            pattern_type,
            fg_color,
            bg_color,
        })
    }
}

/// Cell fill pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellFillPatternType {
    None,
    Solid,
    Gray125,
    DarkGray,
    MediumGray,
    LightGray,
    Gray0625,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
}

impl CellFillPatternType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::Gray125 => "gray125",
            Self::DarkGray => "darkGray",
            Self::MediumGray => "mediumGray",
            Self::LightGray => "lightGray",
            Self::Gray0625 => "gray0625",
            Self::DarkHorizontal => "darkHorizontal",
            Self::DarkVertical => "darkVertical",
            Self::DarkDown => "darkDown",
            Self::DarkUp => "darkUp",
            Self::DarkGrid => "darkGrid",
            Self::DarkTrellis => "darkTrellis",
        }
    }

    /// Case-insensitive lookup by the SpreadsheetML name.
    pub fn parse(name: &str) -> Option<Self> {
        const ALL: [CellFillPatternType; 13] = [
            CellFillPatternType::None,
            CellFillPatternType::Solid,
            CellFillPatternType::Gray125,
            CellFillPatternType::DarkGray,
            CellFillPatternType::MediumGray,
            CellFillPatternType::LightGray,
            CellFillPatternType::Gray0625,
            CellFillPatternType::DarkHorizontal,
            CellFillPatternType::DarkVertical,
            CellFillPatternType::DarkDown,
            CellFillPatternType::DarkUp,
            CellFillPatternType::DarkGrid,
            CellFillPatternType::DarkTrellis,
        ];
        ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(name))
    }
}

/// Border properties for a cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellBorder {
    pub left: Option<CellBorderSide>,
    pub right: Option<CellBorderSide>,
    pub top: Option<CellBorderSide>,
    pub bottom: Option<CellBorderSide>,
}

impl CellBorder {
    /// A bare style string applies to all four sides.
    fn from_value(key: &str, value: &Value) -> Result<Self> {
        if let Value::String(_) = value {
            let side = CellBorderSide::from_value(key, value)?;
            return Ok(CellBorder::all(side));
        }

        let map = object(key, value)?;
        let mut border = CellBorder::default();

        // Outer keys first so that explicit sides override them
        for outer in ["all", "allBorders", "allborders", "outline"] {
            if let Some(v) = map.get(outer) {
                border = CellBorder::all(CellBorderSide::from_value(&format!("{}.{}", key, outer), v)?);
            }
        }

        for (side_key, v) in map {
            let path = format!("{}.{}", key, side_key);
            match side_key.as_str() {
                "all" | "allBorders" | "allborders" | "outline" => {},
                "left" => border.left = Some(CellBorderSide::from_value(&path, v)?),
                "right" => border.right = Some(CellBorderSide::from_value(&path, v)?),
                "top" => border.top = Some(CellBorderSide::from_value(&path, v)?),
                "bottom" => border.bottom = Some(CellBorderSide::from_value(&path, v)?),
                _ => return Err(XlsxError::UnsupportedStyle(path)),
            }
        }
        Ok(border)
    }

    fn all(side: CellBorderSide) -> Self {
        CellBorder {
            left: Some(side.clone()),
            right: Some(side.clone()),
            top: Some(side.clone()),
            bottom: Some(side),
        }
    }
}

/// Border side properties.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBorderSide {
    pub style: CellBorderLineStyle,
    pub color: Option<String>,
}

impl CellBorderSide {
    fn from_value(path: &str, value: &Value) -> Result<Self> {
        let parse_style = |path: &str, v: &Value| -> Result<CellBorderLineStyle> {
            CellBorderLineStyle::parse(string(path, v)?).ok_or_else(|| XlsxError::invalid_value(path, v))
        };

        match value {
            Value::String(_) => Ok(CellBorderSide {
                style: parse_style(path, value)?,
                color: None,
            }),
            Value::Object(map) => {
                let mut side = CellBorderSide {
                    style: CellBorderLineStyle::Thin,
                    color: None,
                };
                for (key, v) in map {
                    let sub = format!("{}.{}", path, key);
                    match key.as_str() {
                        "style" | "borderStyle" => side.style = parse_style(&sub, v)?,
                        "color" => side.color = Some(parse_color(&sub, v)?),
                        _ => return Err(XlsxError::UnsupportedStyle(sub)),
                    }
                }
                Ok(side)
            },
            other => Err(XlsxError::invalid_value(path, other)),
        }
    }
}

/// Border line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellBorderLineStyle {
    None,
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl CellBorderLineStyle {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Thin => "thin",
            Self::Medium => "medium",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Thick => "thick",
            Self::Double => "double",
            Self::Hair => "hair",
            Self::MediumDashed => "mediumDashed",
            Self::DashDot => "dashDot",
            Self::MediumDashDot => "mediumDashDot",
            Self::DashDotDot => "dashDotDot",
            Self::MediumDashDotDot => "mediumDashDotDot",
            Self::SlantDashDot => "slantDashDot",
        }
    }

    /// Case-insensitive lookup by the SpreadsheetML name.
    pub fn parse(name: &str) -> Option<Self> {
        const ALL: [CellBorderLineStyle; 14] = [
            CellBorderLineStyle::None,
            CellBorderLineStyle::Thin,
            CellBorderLineStyle::Medium,
            CellBorderLineStyle::Dashed,
            CellBorderLineStyle::Dotted,
            CellBorderLineStyle::Thick,
            CellBorderLineStyle::Double,
            CellBorderLineStyle::Hair,
            CellBorderLineStyle::MediumDashed,
            CellBorderLineStyle::DashDot,
            CellBorderLineStyle::MediumDashDot,
            CellBorderLineStyle::DashDotDot,
            CellBorderLineStyle::MediumDashDotDot,
            CellBorderLineStyle::SlantDashDot,
        ];
        ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(name))
    }
}

/// Alignment properties for a cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellAlignment {
    pub horizontal: Option<HorizontalAlignment>,
    pub vertical: Option<VerticalAlignment>,
    pub wrap_text: bool,
}

impl CellAlignment {
    fn from_value(key: &str, value: &Value) -> Result<Self> {
        let map = object(key, value)?;
        let mut alignment = CellAlignment::default();

        for (sub, v) in map {
            let path = format!("{}.{}", key, sub);
            match sub.as_str() {
                "horizontal" => {
                    alignment.horizontal = Some(
                        HorizontalAlignment::parse(string(&path, v)?)
                            .ok_or_else(|| XlsxError::invalid_value(&path, v))?,
                    )
                },
                "vertical" => {
                    alignment.vertical = Some(
                        VerticalAlignment::parse(string(&path, v)?)
                            .ok_or_else(|| XlsxError::invalid_value(&path, v))?,
                    )
                },
                "wrap" | "wrapText" => alignment.wrap_text = flag(&path, v)?,
                _ => return Err(XlsxError::UnsupportedStyle(path)),
            }
        }
        Ok(alignment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
}

impl HorizontalAlignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Fill => "fill",
            Self::Justify => "justify",
            Self::CenterContinuous => "centerContinuous",
            Self::Distributed => "distributed",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        const ALL: [HorizontalAlignment; 8] = [
            HorizontalAlignment::General,
            HorizontalAlignment::Left,
            HorizontalAlignment::Center,
            HorizontalAlignment::Right,
            HorizontalAlignment::Fill,
            HorizontalAlignment::Justify,
            HorizontalAlignment::CenterContinuous,
            HorizontalAlignment::Distributed,
        ];
        ALL.into_iter().find(|a| a.as_str().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

impl VerticalAlignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Justify => "justify",
            Self::Distributed => "distributed",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        const ALL: [VerticalAlignment; 5] = [
            VerticalAlignment::Top,
            VerticalAlignment::Center,
            VerticalAlignment::Bottom,
            VerticalAlignment::Justify,
            VerticalAlignment::Distributed,
        ];
        ALL.into_iter().find(|a| a.as_str().eq_ignore_ascii_case(name))
    }
}

fn number_format_code(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(code) if !code.is_empty() => Ok(code.clone()),
        Value::Object(map) => match map.get("code").or_else(|| map.get("formatCode")) {
            Some(Value::String(code)) if !code.is_empty() => Ok(code.clone()),
            _ => Err(XlsxError::invalid_value(key, value)),
        },
        other => Err(XlsxError::invalid_value(key, other)),
    }
}

/// Normalise a colour to upper-case `AARRGGBB`.
///
/// Accepts `RRGGBB`, `#RRGGBB`, `AARRGGBB` or an object carrying one of
/// those under `rgb` or `argb`.
pub fn parse_color(key: &str, value: &Value) -> Result<String> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => match map.get("argb").or_else(|| map.get("rgb")) {
            Some(Value::String(s)) => s.as_str(),
            _ => return Err(XlsxError::invalid_value(key, value)),
        },
        _ => return Err(XlsxError::invalid_value(key, value)),
    };

    let hex = raw.trim().trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(XlsxError::invalid_value(key, value));
    }
    match hex.len() {
        6 => Ok(format!("FF{}", hex.to_ascii_uppercase())),
        8 => Ok(hex.to_ascii_uppercase()),
        _ => Err(XlsxError::invalid_value(key, value)),
    }
}

fn object<'v>(key: &str, value: &'v Value) -> Result<&'v Map<String, Value>> {
    value.as_object().ok_or_else(|| XlsxError::invalid_value(key, value))
}

fn string<'v>(key: &str, value: &'v Value) -> Result<&'v str> {
    value.as_str().ok_or_else(|| XlsxError::invalid_value(key, value))
}

fn flag(key: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_f64() == Some(1.0) => Ok(true),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(false),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(XlsxError::invalid_value(key, other)),
    }
}

fn positive_number(key: &str, value: &Value) -> Result<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    n.filter(|n: &f64| n.is_finite() && *n > 0.0)
        .ok_or_else(|| XlsxError::invalid_value(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn style(value: Value) -> StyleMap {
        match value {
            Value::Object(m) => m,
            _ => unreachable!("test styles are objects"),
        }
    }

    #[test]
    fn test_sizing_only_style_has_no_format() {
        assert_eq!(CellFormat::from_style(&style(json!({"width": 20, "height": 10}))).unwrap(), None);
        assert_eq!(CellFormat::from_style(&StyleMap::new()).unwrap(), None);
    }

    #[test]
    fn test_full_vocabulary() {
        let format = CellFormat::from_style(&style(json!({
            "font": {"name": "Arial", "size": "12", "bold": true, "underline": "single", "color": "#ff0000"},
            "fill": "DDEEFF",
            "borders": {"all": "thin", "bottom": {"style": "double", "color": {"rgb": "000000"}}},
            "alignment": {"horizontal": "center", "vertical": "top", "wrapText": true},
            "numberFormat": {"code": "0.00%"}
        })))
        .unwrap()
        .unwrap();

        let font = format.font.unwrap();
        assert_eq!(font.name.as_deref(), Some("Arial"));
        assert_eq!(font.size, Some(12.0));
        assert!(font.bold && font.underline && !font.italic);
        assert_eq!(font.color.as_deref(), Some("FFFF0000"));

        let fill = format.fill.unwrap();
        assert_eq!(fill.pattern_type, CellFillPatternType::Solid);
        assert_eq!(fill.fg_color.as_deref(), Some("FFDDEEFF"));

        let border = format.border.unwrap();
        assert_eq!(border.left.unwrap().style, CellBorderLineStyle::Thin);
        let bottom = border.bottom.unwrap();
        assert_eq!(bottom.style, CellBorderLineStyle::Double);
        assert_eq!(bottom.color.as_deref(), Some("FF000000"));

        let alignment = format.alignment.unwrap();
        assert_eq!(alignment.horizontal, Some(HorizontalAlignment::Center));
        assert_eq!(alignment.vertical, Some(VerticalAlignment::Top));
        assert!(alignment.wrap_text);

        assert_eq!(format.number_format.as_deref(), Some("0.00%"));
    }

    #[test]
    fn test_fill_object_with_pattern() {
        let format = CellFormat::from_style(&style(json!({
            "fill": {"type": "darkGrid", "startColor": {"argb": "80FFFFFF"}}
        })))
        .unwrap()
        .unwrap();
        let fill = format.fill.unwrap();
        assert_eq!(fill.pattern_type, CellFillPatternType::DarkGrid);
        assert_eq!(fill.fg_color.as_deref(), Some("80FFFFFF"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = CellFormat::from_style(&style(json!({"shadow": true}))).unwrap_err();
        assert!(matches!(err, XlsxError::UnsupportedStyle(ref k) if k == "shadow"));

        let err = CellFormat::from_style(&style(json!({"font": {"weight": 700}}))).unwrap_err();
        assert!(matches!(err, XlsxError::UnsupportedStyle(ref k) if k == "font.weight"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for bad in [
            json!({"fill": "not-a-colour"}),
            json!({"fill": "FFF"}),
            json!({"font": {"size": -2}}),
            json!({"font": "bold"}),
            json!({"border": "zigzag"}),
            json!({"alignment": {"horizontal": "middle"}}),
            json!({"format": 12}),
        ] {
            let err = CellFormat::from_style(&style(bad.clone())).unwrap_err();
            assert!(matches!(err, XlsxError::InvalidStyleValue { .. }), "{bad} gave {err:?}");
        }
    }

    #[test]
    fn test_parse_names_case_insensitively() {
        assert_eq!(CellBorderLineStyle::parse("MEDIUMDASHED"), Some(CellBorderLineStyle::MediumDashed));
        assert_eq!(CellFillPatternType::parse("Gray125"), Some(CellFillPatternType::Gray125));
        assert_eq!(HorizontalAlignment::parse("centercontinuous"), Some(HorizontalAlignment::CenterContinuous));
    }
}
