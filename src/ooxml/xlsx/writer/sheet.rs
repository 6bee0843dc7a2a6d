//! In-memory worksheet and its XML serialisation.

use super::strings::SharedStrings;
use super::styles::{StylesBuilder, trim_float};
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::xlsx::error::Result;
use crate::ooxml::xlsx::format::CellFormat;
use crate::sheet::{CellRange, CellValue, GridAddress};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as FmtWrite;

/// A note attached to a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellComment {
    pub at: GridAddress,
    pub author: String,
    pub text: String,
}

/// One worksheet of an [`XlsxWorkbook`](super::XlsxWorkbook).
///
/// Cells are keyed by `(row, column)` so iteration follows the order rows
/// are written in `sheetData`.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
    cell_formats: HashMap<(u32, u32), CellFormat>,
    row_formats: BTreeMap<u32, CellFormat>,
    merged: Vec<CellRange>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    comments: Vec<CellComment>,
}

impl Worksheet {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value written at `at`, if any.
    pub fn value(&self, at: GridAddress) -> Option<&CellValue> {
        self.cells.get(&(at.row, at.column)).filter(|v| !v.is_empty())
    }

    /// The format stored for the cell itself, ignoring its row.
    pub fn cell_format(&self, at: GridAddress) -> Option<&CellFormat> {
        self.cell_formats.get(&(at.row, at.column))
    }

    pub fn row_format(&self, row: u32) -> Option<&CellFormat> {
        self.row_formats.get(&row)
    }

    pub fn merged_ranges(&self) -> &[CellRange] {
        &self.merged
    }

    pub fn column_width(&self, column: u32) -> Option<f64> {
        self.column_widths.get(&column).copied()
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn comments(&self) -> &[CellComment] {
        &self.comments
    }

    /// Number of addresses holding a non-empty value.
    pub fn cell_count(&self) -> usize {
        self.cells.values().filter(|v| !v.is_empty()).count()
    }

    /// Smallest range covering every written cell and merge.
    pub fn used_range(&self) -> Option<CellRange> {
        let corners = self
            .cells
            .keys()
            .map(|&(row, column)| (GridAddress::new(column, row), GridAddress::new(column, row)))
            .chain(self.merged.iter().map(|r| (r.start(), r.end())));

        corners.fold(None, |acc: Option<CellRange>, (lo, hi)| {
            Some(match acc {
                None => CellRange::new(lo, hi),
                Some(range) => CellRange::new(
                    GridAddress::new(range.start().column.min(lo.column), range.start().row.min(lo.row)),
                    GridAddress::new(range.end().column.max(hi.column), range.end().row.max(hi.row)),
                ),
            })
        })
    }

    pub(crate) fn set_value(&mut self, at: GridAddress, value: CellValue) {
        self.cells.insert((at.row, at.column), value);
    }

    /// Store a format; the cell is kept in `sheetData` even without a value.
    pub(crate) fn set_cell_format(&mut self, at: GridAddress, format: CellFormat) {
        let key = (at.row, at.column);
        self.cells.entry(key).or_insert(CellValue::Empty);
        self.cell_formats.insert(key, format);
    }

    pub(crate) fn set_row_format(&mut self, row: u32, format: CellFormat) {
        self.row_formats.insert(row, format);
    }

    pub(crate) fn add_merge(&mut self, range: CellRange) {
        self.merged.push(range);
    }

    pub(crate) fn set_column_width(&mut self, column: u32, width: f64) {
        self.column_widths.insert(column, width);
    }

    pub(crate) fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// Attach a note, replacing any earlier note on the same cell.
    pub(crate) fn set_comment(&mut self, at: GridAddress, text: &str, author: &str) {
        self.comments.retain(|c| c.at != at);
        self.comments.push(CellComment {
            at,
            author: author.to_string(),
            text: text.to_string(),
        });
    }

    /// Generate the worksheet part.
    ///
    /// `legacy_drawing` is the relationship id of the VML drawing holding
    /// the comment shapes, when the sheet has comments.
    pub(crate) fn to_xml(
        &self,
        strings: &mut SharedStrings,
        styles: &mut StylesBuilder,
        selected: bool,
        legacy_drawing: Option<&str>,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<worksheet xmlns="{}" xmlns:r="{}">"#,
            namespace::SML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;

        match self.used_range() {
            Some(range) => write!(xml, r#"<dimension ref="{}"/>"#, range)?,
            None => xml.push_str(r#"<dimension ref="A1"/>"#),
        }

        xml.push_str(r#"<sheetViews><sheetView workbookViewId="0""#);
        if selected {
            xml.push_str(r#" tabSelected="1""#);
        }
        xml.push_str("/></sheetViews>");
        xml.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

        self.write_cols(&mut xml)?;

        xml.push_str("<sheetData>");
        self.write_sheet_data(&mut xml, strings, styles)?;
        xml.push_str("</sheetData>");

        if !self.merged.is_empty() {
            write!(xml, r#"<mergeCells count="{}">"#, self.merged.len())?;
            for range in &self.merged {
                write!(xml, r#"<mergeCell ref="{}"/>"#, range)?;
            }
            xml.push_str("</mergeCells>");
        }

        xml.push_str(
            r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
        );

        if let Some(r_id) = legacy_drawing {
            write!(xml, r#"<legacyDrawing r:id="{}"/>"#, r_id)?;
        }

        xml.push_str("</worksheet>");
        Ok(xml)
    }

    fn write_cols(&self, xml: &mut String) -> Result<()> {
        if self.column_widths.is_empty() {
            return Ok(());
        }

        let mut buf = ryu::Buffer::new();
        xml.push_str("<cols>");
        for (&column, &width) in &self.column_widths {
            write!(
                xml,
                r#"<col min="{0}" max="{0}" width="{1}" customWidth="1"/>"#,
                column,
                trim_float(buf.format(width))
            )?;
        }
        xml.push_str("</cols>");
        Ok(())
    }

    fn write_sheet_data(
        &self,
        xml: &mut String,
        strings: &mut SharedStrings,
        styles: &mut StylesBuilder,
    ) -> Result<()> {
        let rows: BTreeSet<u32> = self
            .cells
            .keys()
            .map(|&(row, _)| row)
            .chain(self.row_heights.keys().copied())
            .chain(self.row_formats.keys().copied())
            .collect();

        let mut buf = ryu::Buffer::new();
        for row in rows {
            let row_format = self.row_formats.get(&row);

            write!(xml, r#"<row r="{}""#, row)?;
            if let Some(format) = row_format {
                write!(xml, r#" s="{}" customFormat="1""#, styles.add_cell_format(format))?;
            }
            if let Some(&height) = self.row_heights.get(&row) {
                write!(xml, r#" ht="{}" customHeight="1""#, trim_float(buf.format(height)))?;
            }
            xml.push('>');

            for (&(_, column), value) in self.cells.range((row, 0)..=(row, u32::MAX)) {
                let style = self
                    .cell_formats
                    .get(&(row, column))
                    .or(row_format)
                    .map(|format| styles.add_cell_format(format))
                    .filter(|&index| index != 0);
                write_cell(xml, GridAddress::new(column, row), value, style, strings)?;
            }

            xml.push_str("</row>");
        }

        Ok(())
    }

    /// Generate the comments part, or `None` when the sheet has no notes.
    pub(crate) fn comments_xml(&self) -> Result<Option<String>> {
        if self.comments.is_empty() {
            return Ok(None);
        }

        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(xml, r#"<comments xmlns="{}">"#, namespace::SML_MAIN)?;

        let mut authors: Vec<&str> = Vec::new();
        for comment in &self.comments {
            if !authors.contains(&comment.author.as_str()) {
                authors.push(&comment.author);
            }
        }

        xml.push_str("<authors>");
        for author in &authors {
            write!(xml, "<author>{}</author>", escape_xml(author))?;
        }
        xml.push_str("</authors>");

        xml.push_str("<commentList>");
        for comment in &self.comments {
            let author_id = authors
                .iter()
                .position(|a| *a == comment.author)
                .unwrap_or(0);
            write!(xml, r#"<comment ref="{}" authorId="{}"><text>"#, comment.at, author_id)?;

            xml.push_str(r#"<r><rPr><b/><sz val="9"/><color indexed="81"/><rFont val="Tahoma"/><charset val="1"/></rPr>"#);
            write!(xml, "<t>{}:</t></r>", escape_xml(&comment.author))?;

            xml.push_str(r#"<r><rPr><sz val="9"/><color indexed="81"/><rFont val="Tahoma"/><charset val="1"/></rPr>"#);
            write!(xml, r#"<t xml:space="preserve">{}</t></r>"#, escape_xml(&comment.text))?;

            xml.push_str("</text></comment>");
        }
        xml.push_str("</commentList></comments>");

        Ok(Some(xml))
    }

    /// Generate the VML drawing holding one hidden note shape per comment.
    ///
    /// `idmap` must be unique per sheet; shape ids are allocated in blocks
    /// of 1024 under it.
    pub(crate) fn vml_drawing_xml(&self, idmap: usize) -> Result<Option<String>> {
        if self.comments.is_empty() {
            return Ok(None);
        }

        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<xml xmlns:v="urn:schemas-microsoft-com:vml""#);
        xml.push_str(r#" xmlns:o="urn:schemas-microsoft-com:office:office""#);
        xml.push_str(r#" xmlns:x="urn:schemas-microsoft-com:office:excel">"#);
        write!(
            xml,
            r#"<o:shapelayout v:ext="edit"><o:idmap v:ext="edit" data="{}"/></o:shapelayout>"#,
            idmap
        )?;
        xml.push_str(
            r#"<v:shapetype id="_x0000_t202" coordsize="21600,21600" o:spt="202" path="m,l,21600r21600,l21600,xe">"#,
        );
        xml.push_str(r#"<v:stroke joinstyle="miter"/><v:path gradientshapeok="t" o:connecttype="rect"/>"#);
        xml.push_str("</v:shapetype>");

        for (idx, comment) in self.comments.iter().enumerate() {
            let (column, row) = (comment.at.column, comment.at.row);
            let shape_id = idmap * 1024 + idx + 1;
            let margin_left = 48.0 + f64::from(column - 1) * 63.0;
            let margin_top = 12.0 + f64::from(row - 1) * 15.75;

            write!(
                xml,
                "<v:shape id=\"_x0000_s{}\" type=\"#_x0000_t202\" style=\"position:absolute;\
                 margin-left:{:.0}pt;margin-top:{:.0}pt;width:108pt;height:59.25pt;z-index:{};visibility:hidden\" \
                 fillcolor=\"#ffffe1\" o:insetmode=\"auto\">",
                shape_id,
                margin_left,
                margin_top,
                idx + 1
            )?;
            xml.push_str(r##"<v:fill color2="#ffffe1"/>"##);
            xml.push_str(r#"<v:shadow on="t" color="black" obscured="t"/>"#);
            xml.push_str(r#"<v:path o:connecttype="none"/>"#);
            xml.push_str(r#"<v:textbox style="mso-direction-alt:auto"><div style="text-align:left"></div></v:textbox>"#);
            write!(
                xml,
                r#"<x:ClientData ObjectType="Note"><x:MoveWithCells/><x:SizeWithCells/><x:Anchor>{}, 15, {}, 0, {}, 15, {}, 4</x:Anchor>"#,
                column + 1,
                row.saturating_sub(1),
                column + 3,
                row + 2
            )?;
            xml.push_str("<x:AutoFill>False</x:AutoFill>");
            write!(xml, "<x:Row>{}</x:Row><x:Column>{}</x:Column>", row - 1, column - 1)?;
            xml.push_str("</x:ClientData></v:shape>");
        }

        xml.push_str("</xml>");
        Ok(Some(xml))
    }
}

fn write_cell(
    xml: &mut String,
    at: GridAddress,
    value: &CellValue,
    style: Option<usize>,
    strings: &mut SharedStrings,
) -> Result<()> {
    let style_attr = style.map(|s| format!(r#" s="{}""#, s)).unwrap_or_default();

    match value {
        CellValue::Empty => {
            if !style_attr.is_empty() {
                write!(xml, r#"<c r="{}"{}/>"#, at, style_attr)?;
            }
        },
        CellValue::String(s) if s.is_empty() => {
            if !style_attr.is_empty() {
                write!(xml, r#"<c r="{}"{}/>"#, at, style_attr)?;
            }
        },
        CellValue::String(s) => {
            let index = strings.add(s);
            write!(xml, r#"<c r="{}"{} t="s"><v>{}</v></c>"#, at, style_attr, index)?;
        },
        CellValue::Number(_) => {
            write!(xml, r#"<c r="{}"{}><v>{}</v></c>"#, at, style_attr, value)?;
        },
        CellValue::Bool(b) => {
            write!(
                xml,
                r#"<c r="{}"{} t="b"><v>{}</v></c>"#,
                at,
                style_attr,
                if *b { "1" } else { "0" }
            )?;
        },
        CellValue::Formula(formula) => {
            write!(xml, r#"<c r="{}"{}><f>{}</f></c>"#, at, style_attr, escape_xml(formula))?;
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::format::CellFont;

    fn at(column: u32, row: u32) -> GridAddress {
        GridAddress::new(column, row)
    }

    fn bold() -> CellFormat {
        CellFormat {
            font: Some(CellFont {
                bold: true,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn render(sheet: &Worksheet) -> (String, SharedStrings) {
        let mut strings = SharedStrings::new();
        let mut styles = StylesBuilder::new();
        let xml = sheet.to_xml(&mut strings, &mut styles, true, None).unwrap();
        (xml, strings)
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Worksheet::new("Sheet1".into());
        let (xml, strings) = render(&sheet);
        assert!(xml.contains(r#"<dimension ref="A1"/>"#));
        assert!(xml.contains("<sheetData></sheetData>"));
        assert!(xml.contains(r#"tabSelected="1""#));
        assert!(!xml.contains("<cols>"));
        assert!(strings.is_empty());
    }

    #[test]
    fn test_cell_values() {
        let mut sheet = Worksheet::new("Data".into());
        sheet.set_value(at(1, 1), CellValue::String("name".into()));
        sheet.set_value(at(2, 1), CellValue::Number(42.0));
        sheet.set_value(at(3, 1), CellValue::Number(1.5));
        sheet.set_value(at(1, 2), CellValue::Bool(true));
        sheet.set_value(at(2, 2), CellValue::Formula("SUM(B1:C1)".into()));

        let (xml, strings) = render(&sheet);
        assert!(xml.contains(r#"<c r="A1" t="s"><v>0</v></c>"#));
        assert!(xml.contains(r#"<c r="B1"><v>42</v></c>"#));
        assert!(xml.contains(r#"<c r="C1"><v>1.5</v></c>"#));
        assert!(xml.contains(r#"<c r="A2" t="b"><v>1</v></c>"#));
        assert!(xml.contains(r#"<c r="B2"><f>SUM(B1:C1)</f></c>"#));
        assert!(xml.contains(r#"<dimension ref="A1:C2"/>"#));
        assert_eq!(strings.unique_count(), 1);
    }

    #[test]
    fn test_rows_are_ordered() {
        let mut sheet = Worksheet::new("S".into());
        sheet.set_value(at(2, 3), CellValue::Number(2.0));
        sheet.set_value(at(1, 3), CellValue::Number(1.0));
        sheet.set_value(at(1, 1), CellValue::Number(0.0));

        let (xml, _) = render(&sheet);
        let first = xml.find(r#"<row r="1">"#).unwrap();
        let third = xml.find(r#"<row r="3">"#).unwrap();
        assert!(first < third);
        assert!(xml.contains(r#"<row r="3"><c r="A3"><v>1</v></c><c r="B3"><v>2</v></c></row>"#));
    }

    #[test]
    fn test_styled_blank_cell_is_emitted() {
        let mut sheet = Worksheet::new("S".into());
        sheet.set_cell_format(at(2, 2), bold());
        sheet.set_value(at(3, 2), CellValue::String(String::new()));

        let (xml, _) = render(&sheet);
        assert!(xml.contains(r#"<c r="B2" s="1"/>"#));
        assert!(!xml.contains(r#"r="C2""#));
        assert_eq!(sheet.value(at(2, 2)), None);
    }

    #[test]
    fn test_row_format_is_inherited() {
        let mut sheet = Worksheet::new("S".into());
        sheet.set_row_format(1, bold());
        sheet.set_value(at(1, 1), CellValue::String("x".into()));
        sheet.set_row_height(4, 30.5);

        let (xml, _) = render(&sheet);
        assert!(xml.contains(r#"<row r="1" s="1" customFormat="1"><c r="A1" s="1" t="s">"#));
        assert!(xml.contains(r#"<row r="4" ht="30.5" customHeight="1"></row>"#));
    }

    #[test]
    fn test_columns_and_merges() {
        let mut sheet = Worksheet::new("S".into());
        sheet.set_column_width(2, 20.0);
        sheet.add_merge(CellRange::new(at(1, 1), at(2, 3)));

        let (xml, _) = render(&sheet);
        assert!(xml.contains(r#"<cols><col min="2" max="2" width="20" customWidth="1"/></cols>"#));
        assert!(xml.contains(r#"<mergeCells count="1"><mergeCell ref="A1:B3"/></mergeCells>"#));
        assert_eq!(sheet.used_range(), Some(CellRange::new(at(1, 1), at(2, 3))));
    }

    #[test]
    fn test_comments_and_drawing() {
        let mut sheet = Worksheet::new("S".into());
        assert!(sheet.comments_xml().unwrap().is_none());

        sheet.set_comment(at(2, 3), "first", "htmlsheet");
        sheet.set_comment(at(2, 3), "a < b", "htmlsheet");
        assert_eq!(sheet.comments().len(), 1);

        let comments = sheet.comments_xml().unwrap().unwrap();
        assert!(comments.contains("<authors><author>htmlsheet</author></authors>"));
        assert!(comments.contains(r#"<comment ref="B3" authorId="0">"#));
        assert!(comments.contains("a &lt; b"));

        let vml = sheet.vml_drawing_xml(2).unwrap().unwrap();
        assert!(vml.contains(r#"<o:idmap v:ext="edit" data="2"/>"#));
        assert!(vml.contains(r#"id="_x0000_s2049""#));
        assert!(vml.contains("<x:Anchor>3, 15, 2, 0, 5, 15, 5, 4</x:Anchor>"));
        assert!(vml.contains("<x:Row>2</x:Row><x:Column>1</x:Column>"));

        let mut strings = SharedStrings::new();
        let mut styles = StylesBuilder::new();
        let xml = sheet.to_xml(&mut strings, &mut styles, false, Some("rId2")).unwrap();
        assert!(xml.ends_with(r#"<legacyDrawing r:id="rId2"/></worksheet>"#));
    }
}
