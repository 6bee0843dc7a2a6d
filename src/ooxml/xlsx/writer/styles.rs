//! Styles.xml generator for XLSX files.
//!
//! Fonts, fills, borders, number formats and cell formats (XF records) are
//! deduplicated by hash and assigned indices in insertion order. Index 0
//! of every table is the workbook default.

use super::super::constants::BUILTIN_NUMBER_FORMATS;
use super::super::error::Result;
use super::super::format::{
    CellAlignment, CellBorder, CellBorderSide, CellFill, CellFillPatternType, CellFont, CellFormat,
};
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Write as FmtWrite;
use std::hash::{Hash, Hasher};

/// Custom number formats start at this id.
const FIRST_CUSTOM_NUM_FMT: usize = 164;

/// One `<xf>` record of `cellXfs`.
#[derive(Debug, Clone, PartialEq)]
struct XfRecord {
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    num_fmt_id: usize,
    alignment: Option<CellAlignment>,
}

/// Builder for generating styles.xml content.
#[derive(Debug)]
pub struct StylesBuilder {
    fonts: Vec<CellFont>,
    font_map: HashMap<u64, usize>,
    fills: Vec<CellFill>,
    fill_map: HashMap<u64, usize>,
    borders: Vec<CellBorder>,
    border_map: HashMap<u64, usize>,
    /// Custom number formats in id order
    number_formats: Vec<String>,
    number_format_map: HashMap<String, usize>,
    cell_formats: Vec<XfRecord>,
    cell_format_map: HashMap<u64, usize>,
}

impl StylesBuilder {
    /// Create a builder holding the records Excel requires.
    pub fn new() -> Self {
        let mut builder = Self {
            fonts: Vec::new(),
            font_map: HashMap::new(),
            fills: Vec::new(),
            fill_map: HashMap::new(),
            borders: Vec::new(),
            border_map: HashMap::new(),
            number_formats: Vec::new(),
            number_format_map: HashMap::new(),
            cell_formats: Vec::new(),
            cell_format_map: HashMap::new(),
        };

        builder.add_font(&CellFont::default());

        // The first two fills are reserved: none and gray125
        for pattern_type in [CellFillPatternType::None, CellFillPatternType::Gray125] {
            builder.add_fill(&CellFill {
                pattern_type,
                fg_color: None,
                bg_color: None,
            });
        }

        builder.add_border(&CellBorder::default());

        builder.cell_formats.push(XfRecord {
            font_id: 0,
            fill_id: 0,
            border_id: 0,
            num_fmt_id: 0,
            alignment: None,
        });
        builder
            .cell_format_map
            .insert(Self::hash_cell_format(&CellFormat::default()), 0);

        builder
    }

    /// Add a cell format and return its style index.
    ///
    /// If the format has already been added, returns the existing index.
    pub fn add_cell_format(&mut self, format: &CellFormat) -> usize {
        let format_hash = Self::hash_cell_format(format);
        if let Some(&index) = self.cell_format_map.get(&format_hash) {
            return index;
        }

        let record = XfRecord {
            font_id: format.font.as_ref().map_or(0, |f| self.add_font(f)),
            fill_id: format.fill.as_ref().map_or(0, |f| self.add_fill(f)),
            border_id: format.border.as_ref().map_or(0, |b| self.add_border(b)),
            num_fmt_id: format
                .number_format
                .as_deref()
                .map_or(0, |n| self.add_number_format(n)),
            alignment: format.alignment.clone(),
        };

        let index = self.cell_formats.len();
        self.cell_formats.push(record);
        self.cell_format_map.insert(format_hash, index);
        index
    }

    pub fn cell_format_count(&self) -> usize {
        self.cell_formats.len()
    }

    fn add_font(&mut self, font: &CellFont) -> usize {
        let hash = Self::hash_font(font);
        if let Some(&index) = self.font_map.get(&hash) {
            return index;
        }

        let index = self.fonts.len();
        self.fonts.push(font.clone());
        self.font_map.insert(hash, index);
        index
    }

    fn add_fill(&mut self, fill: &CellFill) -> usize {
        let hash = Self::hash_fill(fill);
        if let Some(&index) = self.fill_map.get(&hash) {
            return index;
        }

        let index = self.fills.len();
        self.fills.push(fill.clone());
        self.fill_map.insert(hash, index);
        index
    }

    fn add_border(&mut self, border: &CellBorder) -> usize {
        let hash = Self::hash_border(border);
        if let Some(&index) = self.border_map.get(&hash) {
            return index;
        }

        let index = self.borders.len();
        self.borders.push(border.clone());
        self.border_map.insert(hash, index);
        index
    }

    /// Built-in codes map to their fixed id; anything else gets a custom id.
    fn add_number_format(&mut self, code: &str) -> usize {
        if let Some(&id) = BUILTIN_NUMBER_FORMATS.get(code) {
            return id;
        }
        if let Some(&id) = self.number_format_map.get(code) {
            return id;
        }

        let id = FIRST_CUSTOM_NUM_FMT + self.number_formats.len();
        self.number_formats.push(code.to_string());
        self.number_format_map.insert(code.to_string(), id);
        id
    }

    /// Generate the complete styles.xml content.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(xml, r#"<styleSheet xmlns="{}">"#, namespace::SML_MAIN)?;

        if !self.number_formats.is_empty() {
            write!(xml, r#"<numFmts count="{}">"#, self.number_formats.len())?;
            for (i, code) in self.number_formats.iter().enumerate() {
                write!(
                    xml,
                    r#"<numFmt numFmtId="{}" formatCode="{}"/>"#,
                    FIRST_CUSTOM_NUM_FMT + i,
                    escape_xml(code)
                )?;
            }
            xml.push_str("</numFmts>");
        }

        write!(xml, r#"<fonts count="{}">"#, self.fonts.len())?;
        for font in &self.fonts {
            write_font(&mut xml, font)?;
        }
        xml.push_str("</fonts>");

        write!(xml, r#"<fills count="{}">"#, self.fills.len())?;
        for fill in &self.fills {
            write_fill(&mut xml, fill)?;
        }
        xml.push_str("</fills>");

        write!(xml, r#"<borders count="{}">"#, self.borders.len())?;
        for border in &self.borders {
            write_border(&mut xml, border)?;
        }
        xml.push_str("</borders>");

        xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);

        write!(xml, r#"<cellXfs count="{}">"#, self.cell_formats.len())?;
        for xf in &self.cell_formats {
            write_xf(&mut xml, xf)?;
        }
        xml.push_str("</cellXfs>");

        xml.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
        xml.push_str("</styleSheet>");

        Ok(xml)
    }

    fn hash_font(font: &CellFont) -> u64 {
        let mut hasher = DefaultHasher::new();
        font.bold.hash(&mut hasher);
        font.italic.hash(&mut hasher);
        font.underline.hash(&mut hasher);
        font.strike.hash(&mut hasher);
        font.name.hash(&mut hasher);
        font.size.map(f64::to_bits).hash(&mut hasher);
        font.color.hash(&mut hasher);
        hasher.finish()
    }

    fn hash_fill(fill: &CellFill) -> u64 {
        let mut hasher = DefaultHasher::new();
        fill.pattern_type.hash(&mut hasher);
        fill.fg_color.hash(&mut hasher);
        fill.bg_color.hash(&mut hasher);
        hasher.finish()
    }

    fn hash_border(border: &CellBorder) -> u64 {
        let mut hasher = DefaultHasher::new();
        for side in [&border.left, &border.right, &border.top, &border.bottom] {
            match side {
                Some(s) => {
                    s.style.hash(&mut hasher);
                    s.color.hash(&mut hasher);
                },
                None => 0u8.hash(&mut hasher),
            }
        }
        hasher.finish()
    }

    fn hash_cell_format(format: &CellFormat) -> u64 {
        let mut hasher = DefaultHasher::new();
        format.font.as_ref().map(Self::hash_font).hash(&mut hasher);
        format.fill.as_ref().map(Self::hash_fill).hash(&mut hasher);
        format.border.as_ref().map(Self::hash_border).hash(&mut hasher);
        format.number_format.hash(&mut hasher);
        if let Some(alignment) = &format.alignment {
            alignment.horizontal.hash(&mut hasher);
            alignment.vertical.hash(&mut hasher);
            alignment.wrap_text.hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl Default for StylesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_font(xml: &mut String, font: &CellFont) -> Result<()> {
    xml.push_str("<font>");
    if font.bold {
        xml.push_str("<b/>");
    }
    if font.italic {
        xml.push_str("<i/>");
    }
    if font.strike {
        xml.push_str("<strike/>");
    }
    if font.underline {
        xml.push_str("<u/>");
    }

    let mut buf = ryu::Buffer::new();
    write!(xml, r#"<sz val="{}"/>"#, trim_float(buf.format(font.size.unwrap_or(11.0))))?;

    if let Some(color) = &font.color {
        write!(xml, r#"<color rgb="{}"/>"#, escape_xml(color))?;
    }
    write!(
        xml,
        r#"<name val="{}"/>"#,
        escape_xml(font.name.as_deref().unwrap_or("Calibri"))
    )?;
    xml.push_str("</font>");
    Ok(())
}

fn write_fill(xml: &mut String, fill: &CellFill) -> Result<()> {
    write!(xml, r#"<fill><patternFill patternType="{}">"#, fill.pattern_type.as_str())?;
    if let Some(fg_color) = &fill.fg_color {
        write!(xml, r#"<fgColor rgb="{}"/>"#, escape_xml(fg_color))?;
    }
    if let Some(bg_color) = &fill.bg_color {
        write!(xml, r#"<bgColor rgb="{}"/>"#, escape_xml(bg_color))?;
    }
    xml.push_str("</patternFill></fill>");
    Ok(())
}

fn write_border(xml: &mut String, border: &CellBorder) -> Result<()> {
    xml.push_str("<border>");
    write_border_side(xml, "left", border.left.as_ref())?;
    write_border_side(xml, "right", border.right.as_ref())?;
    write_border_side(xml, "top", border.top.as_ref())?;
    write_border_side(xml, "bottom", border.bottom.as_ref())?;
    xml.push_str("<diagonal/></border>");
    Ok(())
}

fn write_border_side(xml: &mut String, side: &str, border_side: Option<&CellBorderSide>) -> Result<()> {
    match border_side {
        Some(bs) => {
            write!(xml, r#"<{} style="{}">"#, side, bs.style.as_str())?;
            if let Some(color) = &bs.color {
                write!(xml, r#"<color rgb="{}"/>"#, escape_xml(color))?;
            }
            write!(xml, "</{}>", side)?;
        },
        None => write!(xml, "<{}/>", side)?,
    }
    Ok(())
}

fn write_xf(xml: &mut String, xf: &XfRecord) -> Result<()> {
    write!(
        xml,
        r#"<xf numFmtId="{}" fontId="{}" fillId="{}" borderId="{}" xfId="0""#,
        xf.num_fmt_id, xf.font_id, xf.fill_id, xf.border_id
    )?;
    if xf.font_id != 0 {
        xml.push_str(r#" applyFont="1""#);
    }
    if xf.fill_id != 0 {
        xml.push_str(r#" applyFill="1""#);
    }
    if xf.border_id != 0 {
        xml.push_str(r#" applyBorder="1""#);
    }
    if xf.num_fmt_id != 0 {
        xml.push_str(r#" applyNumberFormat="1""#);
    }

    let Some(alignment) = &xf.alignment else {
        xml.push_str("/>");
        return Ok(());
    };

    xml.push_str(r#" applyAlignment="1"><alignment"#);
    if let Some(horizontal) = alignment.horizontal {
        write!(xml, r#" horizontal="{}""#, horizontal.as_str())?;
    }
    if let Some(vertical) = alignment.vertical {
        write!(xml, r#" vertical="{}""#, vertical.as_str())?;
    }
    if alignment.wrap_text {
        xml.push_str(r#" wrapText="1""#);
    }
    xml.push_str("/></xf>");
    Ok(())
}

/// `12.0` → `12`; ryu always prints a fractional part.
pub(crate) fn trim_float(formatted: &str) -> &str {
    formatted.strip_suffix(".0").unwrap_or(formatted)
}
