//! One-call conversion from HTML tables to a saved workbook.

use crate::common::{Error, Result};
use crate::compose::{Composer, DimensionPrecedence};
use crate::config::ConverterConfig;
use crate::html::{HtmlParser, HtmlSource};
use crate::ooxml::xlsx::XlsxWorkbook;
use crate::sheet::{SaveTarget, SheetWriter, StyleMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const XLSX_SUFFIX: &str = ".xlsx";

/// Extracts the selected tables of an HTML source and composes them onto a
/// sheet writer.
///
/// Output accessors fail with [`Error::NotProcessed`] until
/// [`process`](Converter::process) or
/// [`process_with`](Converter::process_with) has run.
///
/// # Examples
///
/// ```no_run
/// use htmlsheet::Converter;
///
/// let path = Converter::from_source("report.html")
///     .table_class(Some("export"))
///     .process()?
///     .save("report")?;
/// assert!(path.ends_with("report.xlsx"));
/// # Ok::<(), htmlsheet::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Converter<W = XlsxWorkbook> {
    source: Option<HtmlSource>,
    config: ConverterConfig,
    writer: Option<W>,
}

impl Converter {
    /// Create a converter without any input.
    pub fn new() -> Self {
        Self {
            source: None,
            config: ConverterConfig::default(),
            writer: None,
        }
    }

    /// Create a converter for markup or a file path (see [`HtmlSource::detect`]).
    pub fn from_source(source: impl Into<HtmlSource>) -> Self {
        Self::new().source(source)
    }

    /// Create a converter for literal markup.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self::new().source(HtmlSource::Markup(html.into()))
    }

    /// Convert onto a fresh [`XlsxWorkbook`].
    pub fn process(self) -> Result<Self> {
        let workbook = XlsxWorkbook::new().with_note_author(self.config.note_author.as_str());
        self.process_with(workbook)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Converter<W> {
    pub fn source(mut self, source: impl Into<HtmlSource>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn table_class(mut self, class: Option<&str>) -> Self {
        self.config.table_class = class.map(str::to_string);
        self
    }

    pub fn row_class(mut self, class: Option<&str>) -> Self {
        self.config.row_class = class.map(str::to_string);
        self
    }

    pub fn cell_class(mut self, class: Option<&str>) -> Self {
        self.config.cell_class = class.map(str::to_string);
        self
    }

    pub fn default_styles(mut self, styles: StyleMap) -> Self {
        self.config.default_styles = styles;
        self
    }

    /// Styles applied to `<th>` cells on top of the default styles.
    pub fn default_header_styles(mut self, styles: StyleMap) -> Self {
        self.config.default_header_styles = styles;
        self
    }

    pub fn default_dimensions(mut self, dimensions: StyleMap) -> Self {
        self.config.default_dimensions = dimensions;
        self
    }

    pub fn dimension_precedence(mut self, precedence: DimensionPrecedence) -> Self {
        self.config.dimension_precedence = precedence;
        self
    }

    /// Author recorded on notes written by [`process`](Converter::process).
    pub fn note_author(mut self, author: impl Into<String>) -> Self {
        self.config.note_author = author.into();
        self
    }

    /// Parse the source and compose it onto `writer`.
    ///
    /// The writer is kept by the returned converter; on failure it is
    /// dropped together with everything written so far.
    pub fn process_with<V: SheetWriter>(self, mut writer: V) -> Result<Converter<V>> {
        let mut parser = HtmlParser::new()
            .table_class(self.config.table_class.as_deref())
            .row_class(self.config.row_class.as_deref())
            .cell_class(self.config.cell_class.as_deref());
        if let Some(source) = &self.source {
            parser = parser.source(source.clone());
        }

        let document = parser.parse()?;
        Composer::from_config(&self.config).compose(&document, &mut writer)?;
        debug!(tables = document.table_count(), "conversion finished");

        Ok(Converter {
            source: self.source,
            config: self.config,
            writer: Some(writer),
        })
    }

    pub fn is_processed(&self) -> bool {
        self.writer.is_some()
    }

    /// The composed spreadsheet.
    pub fn writer(&self) -> Result<&W> {
        self.writer.as_ref().ok_or(Error::NotProcessed)
    }

    pub fn writer_mut(&mut self) -> Result<&mut W> {
        self.writer.as_mut().ok_or(Error::NotProcessed)
    }

    pub fn into_writer(self) -> Result<W> {
        self.writer.ok_or(Error::NotProcessed)
    }
}

impl<W> Converter<W>
where
    W: SaveTarget,
    Error: From<W::Error>,
{
    /// Save the spreadsheet and return the path actually written.
    ///
    /// Any trailing `.xlsx` suffixes (in any letter case) are replaced by a
    /// single `.xlsx`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let writer = self.writer()?;
        let path = xlsx_path(path.as_ref());
        writer.save(&path)?;
        Ok(path)
    }

    /// Stream the spreadsheet to `out`.
    pub fn write_to<O: Write>(&self, out: O) -> Result<()> {
        Ok(self.writer()?.write_to(out)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.writer()?.to_bytes()?)
    }
}

fn xlsx_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    while let Some(stem_len) = name.len().checked_sub(XLSX_SUFFIX.len()) {
        match name.get(stem_len..) {
            Some(tail) if tail.eq_ignore_ascii_case(XLSX_SUFFIX) => name.truncate(stem_len),
            _ => break,
        }
    }
    name.push_str(XLSX_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::tests::RecordingWriter;
    use crate::sheet::{CellValue, GridAddress};
    use serde_json::json;
    use std::io::{Cursor, Read};

    const HTML: &str = r#"
        <table _excel-name="People">
            <tr><th>Name</th><th>Age</th></tr>
            <tr><td>Ada</td><td>36</td></tr>
        </table>
        <table class="skip"><tr><td>x</td></tr></table>
    "#;

    fn read_member(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut text = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_output_before_process_fails() {
        let mut converter = Converter::from_html(HTML);
        assert!(matches!(converter.writer(), Err(Error::NotProcessed)));
        assert!(matches!(converter.writer_mut(), Err(Error::NotProcessed)));
        assert!(matches!(converter.to_bytes(), Err(Error::NotProcessed)));
        assert!(matches!(converter.write_to(Vec::new()), Err(Error::NotProcessed)));
        assert!(matches!(converter.save("never"), Err(Error::NotProcessed)));
        assert!(!converter.is_processed());
        assert!(matches!(converter.into_writer(), Err(Error::NotProcessed)));
    }

    #[test]
    fn test_missing_source() {
        let err = Converter::new().process().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_process_builds_workbook() {
        let converter = Converter::from_html(HTML).process().unwrap();
        let workbook = converter.writer().unwrap();

        assert_eq!(workbook.sheet_count(), 2);
        let people = workbook.sheet_by_name("People").unwrap();
        assert_eq!(people.value(GridAddress::new(2, 2)), Some(&CellValue::Number(36.0)));
        assert_eq!(workbook.sheet(1).unwrap().name(), "Sheet2");
    }

    #[test]
    fn test_colspan_crossing_rowspan_aborts() {
        use crate::ooxml::xlsx::XlsxError;
        use crate::sheet::CellRange;

        let html = r#"<table>
            <tr><td>a</td><td rowspan="2">b</td></tr>
            <tr><td colspan="3">c</td><td>d</td></tr>
        </table>"#;
        let err = Converter::from_html(html).process().unwrap_err();

        let at = GridAddress::new;
        match err.writer_error::<XlsxError>() {
            Some(XlsxError::OverlappingMerge { range, existing }) => {
                assert_eq!(*range, CellRange::new(at(1, 2), at(3, 2)));
                assert_eq!(*existing, CellRange::new(at(2, 1), at(2, 2)));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_drives_filters_and_styles() {
        let config = ConverterConfig {
            table_class: Some("skip".into()),
            default_styles: json!({"font": {"italic": true}}).as_object().cloned().unwrap(),
            note_author: "Audit".into(),
            ..Default::default()
        };
        let converter = Converter::from_html(HTML).with_config(config).process().unwrap();
        let workbook = converter.into_writer().unwrap();

        assert_eq!(workbook.sheet_count(), 1);
        assert_eq!(workbook.note_author(), "Audit");
        let format = workbook.sheet(0).unwrap().cell_format(GridAddress::new(1, 1)).unwrap();
        assert!(format.font.as_ref().unwrap().italic);
    }

    #[test]
    fn test_process_with_custom_writer() {
        let converter = Converter::from_html(HTML)
            .cell_class(Some("none"))
            .process_with(RecordingWriter::default())
            .unwrap();
        let writer = converter.writer().unwrap();
        assert!(writer.writes().is_empty());
        assert_eq!(writer.calls.len(), 2);
    }

    #[test]
    fn test_save_normalises_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Converter::from_html(HTML).process().unwrap();

        for requested in ["out", "out.xlsx", "out.XLSX.xlsx"] {
            let path = converter.save(dir.path().join(requested)).unwrap();
            assert_eq!(path, dir.path().join("out.xlsx"));
        }

        let bytes = std::fs::read(dir.path().join("out.xlsx")).unwrap();
        assert!(read_member(&bytes, "xl/workbook.xml").contains(r#"name="People""#));
    }

    #[test]
    fn test_write_to_matches_to_bytes() {
        let converter = Converter::from_html(HTML).process().unwrap();
        let mut streamed = Vec::new();
        converter.write_to(&mut streamed).unwrap();

        let sheet = read_member(&streamed, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<c r="B2"><v>36</v></c>"#));
        assert!(!converter.to_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_xlsx_path() {
        assert_eq!(xlsx_path(Path::new("a/report")), PathBuf::from("a/report.xlsx"));
        assert_eq!(xlsx_path(Path::new("report.Xlsx")), PathBuf::from("report.xlsx"));
        assert_eq!(xlsx_path(Path::new("data.xlsx.bak")), PathBuf::from("data.xlsx.bak.xlsx"));
        assert_eq!(xlsx_path(Path::new("résumé")), PathBuf::from("résumé.xlsx"));
    }
}
