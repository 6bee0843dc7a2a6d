//! Workbook writer: the XLSX implementation of [`SheetWriter`].

use super::sheet::Worksheet;
use super::strings::SharedStrings;
use super::styles::StylesBuilder;
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::{PackageWriter, Relationships};
use crate::ooxml::xlsx::constants::lookup_symbol;
use crate::ooxml::xlsx::error::{Result, XlsxError};
use crate::ooxml::xlsx::format::CellFormat;
use crate::ooxml::xlsx::properties::DocumentProperties;
use crate::sheet::{CellRange, CellValue, GridAddress, SaveTarget, SheetWriter, StyleMap};
use serde_json::Value;
use std::fmt::Write as FmtWrite;
use tracing::debug;

/// Author recorded on notes unless configured otherwise.
pub const DEFAULT_NOTE_AUTHOR: &str = "htmlsheet";

/// Excel's hard limit on sheet name length.
const MAX_SHEET_NAME_LEN: usize = 31;

const INVALID_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// An in-memory XLSX workbook.
///
/// Sheets are appended by [`SheetWriter::create_sheet`] and every other
/// write goes to the most recently created one. Nothing touches the disk
/// until [`SaveTarget::save`] is called.
///
/// # Examples
///
/// ```
/// use htmlsheet::ooxml::xlsx::XlsxWorkbook;
/// use htmlsheet::sheet::{CellValue, GridAddress, SaveTarget, SheetWriter};
///
/// let mut workbook = XlsxWorkbook::new();
/// workbook.create_sheet(Some("Totals"))?;
/// workbook.write_cell(GridAddress::new(1, 1), CellValue::Number(3.0), None)?;
///
/// let bytes = workbook.to_bytes()?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), htmlsheet::ooxml::xlsx::XlsxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct XlsxWorkbook {
    sheets: Vec<Worksheet>,
    current: Option<usize>,
    note_author: String,
    properties: DocumentProperties,
}

impl XlsxWorkbook {
    /// Create a workbook without any sheet.
    pub fn new() -> Self {
        Self {
            sheets: Vec::new(),
            current: None,
            note_author: DEFAULT_NOTE_AUTHOR.to_string(),
            properties: DocumentProperties::default(),
        }
    }

    pub fn with_note_author(mut self, author: impl Into<String>) -> Self {
        self.note_author = author.into();
        self
    }

    pub fn note_author(&self) -> &str {
        &self.note_author
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut DocumentProperties {
        &mut self.properties
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn sheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn active_mut(&mut self) -> Result<&mut Worksheet> {
        let index = self.current.ok_or(XlsxError::NoSheet)?;
        self.sheets.get_mut(index).ok_or(XlsxError::NoSheet)
    }

    /// Validate the address and return the current sheet.
    fn target(&mut self, at: GridAddress) -> Result<&mut Worksheet> {
        if !at.is_valid() {
            return Err(XlsxError::InvalidAddress(at));
        }
        self.active_mut()
    }

    fn check_range(range: CellRange) -> Result<()> {
        for corner in [range.start(), range.end()] {
            if !corner.is_valid() {
                return Err(XlsxError::InvalidAddress(corner));
            }
        }
        Ok(())
    }

    /// Turn a requested name into a unique, Excel-legal sheet name.
    fn unique_sheet_name(&self, requested: Option<&str>) -> String {
        let mut cleaned: String = requested
            .unwrap_or_default()
            .chars()
            .map(|c| if INVALID_SHEET_NAME_CHARS.contains(&c) { '_' } else { c })
            .take(MAX_SHEET_NAME_LEN)
            .collect();
        // Excel refuses names that start or end with an apostrophe
        if cleaned.starts_with('\'') {
            cleaned.replace_range(..1, "_");
        }
        if cleaned.ends_with('\'') {
            cleaned.replace_range(cleaned.len() - 1.., "_");
        }
        let base = if cleaned.trim().is_empty() {
            format!("Sheet{}", self.sheets.len() + 1)
        } else {
            cleaned
        };

        let taken = |name: &str| self.sheets.iter().any(|s| s.name().eq_ignore_ascii_case(name));
        if !taken(&base) {
            return base;
        }

        (2usize..)
            .map(|n| {
                let suffix = format!(" ({})", n);
                let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
                let mut name: String = base.chars().take(keep).collect();
                name.push_str(&suffix);
                name
            })
            .find(|name| !taken(name))
            .unwrap_or(base)
    }

    fn workbook_xml(&self, sheets: &[Worksheet], rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<workbook xmlns="{}" xmlns:r="{}">"#,
            namespace::SML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;
        xml.push_str(r#"<bookViews><workbookView activeTab="0"/></bookViews>"#);

        xml.push_str("<sheets>");
        for ((sheet_id, sheet), rel_id) in (1..).zip(sheets).zip(rel_ids) {
            write!(
                xml,
                r#"<sheet name="{}" sheetId="{}" r:id="{}"/>"#,
                escape_xml(sheet.name()),
                sheet_id,
                rel_id
            )?;
        }
        xml.push_str("</sheets></workbook>");
        Ok(xml)
    }
}

impl Default for XlsxWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter for XlsxWorkbook {
    type Error = XlsxError;

    fn create_sheet(&mut self, name: Option<&str>) -> Result<()> {
        let name = self.unique_sheet_name(name);
        debug!(sheet = %name, "creating worksheet");
        self.sheets.push(Worksheet::new(name));
        self.current = Some(self.sheets.len() - 1);
        Ok(())
    }

    fn current_sheet(&self) -> Option<&str> {
        self.current
            .and_then(|index| self.sheets.get(index))
            .map(Worksheet::name)
    }

    fn write_cell(&mut self, at: GridAddress, value: CellValue, style: Option<&StyleMap>) -> Result<()> {
        let format = style.map(CellFormat::from_style).transpose()?.flatten();
        let sheet = self.target(at)?;
        sheet.set_value(at, value);
        if let Some(format) = format {
            sheet.set_cell_format(at, format);
        }
        Ok(())
    }

    fn apply_style(&mut self, range: CellRange, style: &StyleMap) -> Result<()> {
        Self::check_range(range)?;
        let format = CellFormat::from_style(style)?;
        let sheet = self.active_mut()?;
        if let Some(format) = format {
            for at in range.addresses() {
                sheet.set_cell_format(at, format.clone());
            }
        }
        Ok(())
    }

    fn apply_row_style(&mut self, row: u32, style: &StyleMap) -> Result<()> {
        let format = CellFormat::from_style(style)?;
        let sheet = self.target(GridAddress::new(1, row))?;
        if let Some(format) = format {
            sheet.set_row_format(row, format);
        }
        Ok(())
    }

    fn merge_range(&mut self, range: CellRange) -> Result<()> {
        Self::check_range(range)?;
        let sheet = self.active_mut()?;
        if range.is_single_cell() {
            return Ok(());
        }
        if let Some(&existing) = sheet.merged_ranges().iter().find(|r| r.overlaps(&range)) {
            return Err(XlsxError::OverlappingMerge { range, existing });
        }
        sheet.add_merge(range);
        Ok(())
    }

    fn merged_ranges(&self) -> &[CellRange] {
        self.current
            .and_then(|index| self.sheets.get(index))
            .map(Worksheet::merged_ranges)
            .unwrap_or_default()
    }

    fn set_column_width(&mut self, column: u32, width: f64) -> Result<()> {
        self.target(GridAddress::new(column, 1))?.set_column_width(column, width);
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.target(GridAddress::new(1, row))?.set_row_height(row, height);
        Ok(())
    }

    fn add_note(&mut self, at: GridAddress, text: &str) -> Result<()> {
        let author = self.note_author.clone();
        self.target(at)?.set_comment(at, text, &author);
        Ok(())
    }

    fn resolve_constant(&self, symbol: &str) -> Option<Value> {
        lookup_symbol(symbol).map(|v| Value::String(v.to_string()))
    }
}

impl SaveTarget for XlsxWorkbook {
    type Error = XlsxError;

    /// Assemble the whole package.
    ///
    /// A workbook without sheets still produces one blank `Sheet1`.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let blank;
        let sheets: &[Worksheet] = if self.sheets.is_empty() {
            blank = [Worksheet::new("Sheet1".to_string())];
            &blank
        } else {
            &self.sheets
        };

        let mut package = PackageWriter::new();
        package.add_default("vml", ct::OFC_VML_DRAWING);

        let mut strings = SharedStrings::new();
        let mut styles = StylesBuilder::new();
        let mut workbook_rels = Relationships::new();
        let mut sheet_rel_ids = Vec::with_capacity(sheets.len());

        for (n, sheet) in (1usize..).zip(sheets) {
            let partname = format!("/xl/worksheets/sheet{}.xml", n);
            let mut sheet_rels = Relationships::new();

            let legacy_drawing = match (sheet.comments_xml()?, sheet.vml_drawing_xml(n)?) {
                (Some(comments), Some(vml)) => {
                    package.add_part(format!("/xl/comments{}.xml", n), ct::SML_COMMENTS, comments.into_bytes())?;
                    package.add_part(
                        format!("/xl/drawings/vmlDrawing{}.vml", n),
                        ct::OFC_VML_DRAWING,
                        vml.into_bytes(),
                    )?;
                    sheet_rels.relate_to(&format!("../comments{}.xml", n), rt::COMMENTS);
                    Some(sheet_rels.relate_to(&format!("../drawings/vmlDrawing{}.vml", n), rt::VML_DRAWING))
                },
                _ => None,
            };

            let xml = sheet.to_xml(&mut strings, &mut styles, n == 1, legacy_drawing.as_deref())?;
            package.add_part(partname.clone(), ct::SML_WORKSHEET, xml.into_bytes())?;
            package.add_part_rels(&partname, &sheet_rels)?;

            sheet_rel_ids.push(workbook_rels.relate_to(&format!("worksheets/sheet{}.xml", n), rt::WORKSHEET));
        }

        // Sheets register their formats and strings while serialising, so
        // these two parts come last.
        package.add_part("/xl/styles.xml", ct::SML_STYLES, styles.to_xml()?.into_bytes())?;
        workbook_rels.relate_to("styles.xml", rt::STYLES);
        package.add_part("/xl/sharedStrings.xml", ct::SML_SHARED_STRINGS, strings.to_xml()?.into_bytes())?;
        workbook_rels.relate_to("sharedStrings.xml", rt::SHARED_STRINGS);

        let workbook_xml = self.workbook_xml(sheets, &sheet_rel_ids)?;
        package.add_part("/xl/workbook.xml", ct::SML_SHEET_MAIN, workbook_xml.into_bytes())?;
        package.add_part_rels("/xl/workbook.xml", &workbook_rels)?;

        package.add_part(
            "/docProps/core.xml",
            ct::OPC_CORE_PROPERTIES,
            self.properties.core_xml()?.into_bytes(),
        )?;
        let app_xml = self.properties.app_xml(sheets.iter().map(Worksheet::name))?;
        package.add_part("/docProps/app.xml", ct::OFC_EXTENDED_PROPERTIES, app_xml.into_bytes())?;

        let package_rels = package.package_rels_mut();
        package_rels.relate_to("xl/workbook.xml", rt::OFFICE_DOCUMENT);
        package_rels.relate_to("docProps/core.xml", rt::CORE_PROPERTIES);
        package_rels.relate_to("docProps/app.xml", rt::EXTENDED_PROPERTIES);

        debug!(sheets = sheets.len(), parts = package.part_count(), "assembled workbook package");
        Ok(package.finish()?)
    }
}
