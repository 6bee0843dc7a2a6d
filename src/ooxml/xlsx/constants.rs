//! Compile-time lookup tables of the XLSX writer.

use phf::phf_map;

/// Symbolic style constants, keyed by `Class::NAME`.
///
/// Values are in the vocabulary understood by
/// [`CellFormat::from_style`](super::format::CellFormat::from_style) and by
/// the `_excel-explicit` value hint.
static SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    // Horizontal alignment
    "Alignment::HORIZONTAL_GENERAL" => "general",
    "Alignment::HORIZONTAL_LEFT" => "left",
    "Alignment::HORIZONTAL_RIGHT" => "right",
    "Alignment::HORIZONTAL_CENTER" => "center",
    "Alignment::HORIZONTAL_CENTER_CONTINUOUS" => "centerContinuous",
    "Alignment::HORIZONTAL_JUSTIFY" => "justify",
    "Alignment::HORIZONTAL_FILL" => "fill",
    "Alignment::HORIZONTAL_DISTRIBUTED" => "distributed",

    // Vertical alignment
    "Alignment::VERTICAL_BOTTOM" => "bottom",
    "Alignment::VERTICAL_TOP" => "top",
    "Alignment::VERTICAL_CENTER" => "center",
    "Alignment::VERTICAL_JUSTIFY" => "justify",
    "Alignment::VERTICAL_DISTRIBUTED" => "distributed",

    // Border line styles
    "Border::BORDER_NONE" => "none",
    "Border::BORDER_DASHDOT" => "dashDot",
    "Border::BORDER_DASHDOTDOT" => "dashDotDot",
    "Border::BORDER_DASHED" => "dashed",
    "Border::BORDER_DOTTED" => "dotted",
    "Border::BORDER_DOUBLE" => "double",
    "Border::BORDER_HAIR" => "hair",
    "Border::BORDER_MEDIUM" => "medium",
    "Border::BORDER_MEDIUMDASHDOT" => "mediumDashDot",
    "Border::BORDER_MEDIUMDASHDOTDOT" => "mediumDashDotDot",
    "Border::BORDER_MEDIUMDASHED" => "mediumDashed",
    "Border::BORDER_SLANTDASHDOT" => "slantDashDot",
    "Border::BORDER_THICK" => "thick",
    "Border::BORDER_THIN" => "thin",

    // Fill patterns
    "Fill::FILL_NONE" => "none",
    "Fill::FILL_SOLID" => "solid",
    "Fill::FILL_PATTERN_DARKDOWN" => "darkDown",
    "Fill::FILL_PATTERN_DARKGRAY" => "darkGray",
    "Fill::FILL_PATTERN_DARKGRID" => "darkGrid",
    "Fill::FILL_PATTERN_DARKHORIZONTAL" => "darkHorizontal",
    "Fill::FILL_PATTERN_DARKTRELLIS" => "darkTrellis",
    "Fill::FILL_PATTERN_DARKUP" => "darkUp",
    "Fill::FILL_PATTERN_DARKVERTICAL" => "darkVertical",
    "Fill::FILL_PATTERN_GRAY0625" => "gray0625",
    "Fill::FILL_PATTERN_GRAY125" => "gray125",
    "Fill::FILL_PATTERN_LIGHTGRAY" => "lightGray",
    "Fill::FILL_PATTERN_MEDIUMGRAY" => "mediumGray",

    // Font underline
    "Font::UNDERLINE_NONE" => "none",
    "Font::UNDERLINE_SINGLE" => "single",
    "Font::UNDERLINE_DOUBLE" => "double",
    "Font::UNDERLINE_SINGLEACCOUNTING" => "singleAccounting",
    "Font::UNDERLINE_DOUBLEACCOUNTING" => "doubleAccounting",

    // Colours (ARGB)
    "Color::COLOR_BLACK" => "FF000000",
    "Color::COLOR_WHITE" => "FFFFFFFF",
    "Color::COLOR_RED" => "FFFF0000",
    "Color::COLOR_DARKRED" => "FF800000",
    "Color::COLOR_BLUE" => "FF0000FF",
    "Color::COLOR_DARKBLUE" => "FF000080",
    "Color::COLOR_GREEN" => "FF00FF00",
    "Color::COLOR_DARKGREEN" => "FF008000",
    "Color::COLOR_YELLOW" => "FFFFFF00",
    "Color::COLOR_DARKYELLOW" => "FF808000",

    // Number formats
    "NumberFormat::FORMAT_GENERAL" => "General",
    "NumberFormat::FORMAT_TEXT" => "@",
    "NumberFormat::FORMAT_NUMBER" => "0",
    "NumberFormat::FORMAT_NUMBER_00" => "0.00",
    "NumberFormat::FORMAT_NUMBER_COMMA_SEPARATED1" => "#,##0.00",
    "NumberFormat::FORMAT_NUMBER_COMMA_SEPARATED2" => "#,##0.00_-",
    "NumberFormat::FORMAT_PERCENTAGE" => "0%",
    "NumberFormat::FORMAT_PERCENTAGE_00" => "0.00%",
    "NumberFormat::FORMAT_DATE_YYYYMMDD" => "yyyy-mm-dd",
    "NumberFormat::FORMAT_DATE_YYYYMMDD2" => "yyyy-mm-dd",
    "NumberFormat::FORMAT_DATE_DDMMYYYY" => "dd/mm/yyyy",
    "NumberFormat::FORMAT_DATE_DMYSLASH" => "d/m/yy",
    "NumberFormat::FORMAT_DATE_TIME4" => "h:mm:ss",
    "NumberFormat::FORMAT_CURRENCY_USD_SIMPLE" => "\"$\"#,##0.00_-",
    "NumberFormat::FORMAT_CURRENCY_EUR_SIMPLE" => "#,##0.00_-\"€\"",

    // Value types
    "DataType::TYPE_STRING" => "string",
    "DataType::TYPE_STRING2" => "string",
    "DataType::TYPE_INLINE" => "string",
    "DataType::TYPE_NUMERIC" => "number",
    "DataType::TYPE_BOOL" => "bool",
    "DataType::TYPE_FORMULA" => "formula",
};

/// Built-in number format ids that need no `<numFmt>` entry.
pub(crate) static BUILTIN_NUMBER_FORMATS: phf::Map<&'static str, usize> = phf_map! {
    "General" => 0,
    "0" => 1,
    "0.00" => 2,
    "#,##0" => 3,
    "#,##0.00" => 4,
    "0%" => 9,
    "0.00%" => 10,
    "0.00E+00" => 11,
    "# ?/?" => 12,
    "# ??/??" => 13,
    "mm-dd-yy" => 14,
    "d-mmm-yy" => 15,
    "d-mmm" => 16,
    "mmm-yy" => 17,
    "h:mm AM/PM" => 18,
    "h:mm:ss AM/PM" => 19,
    "h:mm" => 20,
    "h:mm:ss" => 21,
    "m/d/yy h:mm" => 22,
    "mm:ss" => 45,
    "[h]:mm:ss" => 46,
    "mmss.0" => 47,
    "##0.0E+0" => 48,
    "@" => 49,
};

/// Resolve a `Namespace::NAME` symbol.
///
/// Only the last namespace segment is significant, and within it only the
/// part after the last underscore, so `Style_Fill::FILL_SOLID` and
/// `Fill::FILL_SOLID` resolve alike.
pub fn lookup_symbol(symbol: &str) -> Option<&'static str> {
    let (namespace, name) = symbol.rsplit_once("::")?;
    let class = namespace.rsplit("::").next()?.rsplit('_').next()?;
    SYMBOLS.get(format!("{}::{}", class, name).as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_symbol() {
        assert_eq!(lookup_symbol("Alignment::HORIZONTAL_CENTER"), Some("center"));
        assert_eq!(lookup_symbol("Border::BORDER_THIN"), Some("thin"));
        assert_eq!(lookup_symbol("Fill::FILL_SOLID"), Some("solid"));
        assert_eq!(lookup_symbol("DataType::TYPE_NUMERIC"), Some("number"));
        assert_eq!(lookup_symbol("Color::COLOR_RED"), Some("FFFF0000"));
    }

    #[test]
    fn test_namespace_qualifiers_ignored() {
        assert_eq!(lookup_symbol("Style_Fill::FILL_SOLID"), Some("solid"));
        assert_eq!(lookup_symbol("Spreadsheet::Style::Border::BORDER_DOUBLE"), Some("double"));
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(lookup_symbol("Fill::FILL_SPARKLES"), None);
        assert_eq!(lookup_symbol("center"), None);
    }

    #[test]
    fn test_builtin_formats() {
        assert_eq!(BUILTIN_NUMBER_FORMATS.get("0.00%"), Some(&10));
        assert_eq!(BUILTIN_NUMBER_FORMATS.get("@"), Some(&49));
        assert!(BUILTIN_NUMBER_FORMATS.get("yyyy-mm-dd").is_none());
    }
}
