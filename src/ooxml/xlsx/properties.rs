//! Core and extended document properties (`docProps/*.xml`).

use super::error::Result;
use crate::common::xml::escape_xml;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

const APPLICATION: &str = "htmlsheet";

/// Metadata written to `docProps/core.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    pub creator: Option<String>,
    pub title: Option<String>,
    pub created: DateTime<Utc>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            creator: None,
            title: None,
            created: Utc::now(),
        }
    }
}

impl DocumentProperties {
    pub fn core_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(768);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
            r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
            r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        ));

        if let Some(title) = &self.title {
            write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
        }
        if let Some(creator) = &self.creator {
            write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(creator))?;
        }

        let stamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        write!(xml, r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#, stamp)?;
        write!(xml, r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#, stamp)?;
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    /// Extended properties listing the sheet titles.
    pub fn app_xml<'a>(&self, sheet_names: impl ExactSizeIterator<Item = &'a str>) -> Result<String> {
        let count = sheet_names.len();
        let mut xml = String::with_capacity(768);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties""#,
            r#" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
        ));
        write!(xml, "<Application>{}</Application>", APPLICATION)?;
        xml.push_str("<DocSecurity>0</DocSecurity><ScaleCrop>false</ScaleCrop>");
        write!(
            xml,
            r#"<HeadingPairs><vt:vector size="2" baseType="variant"><vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant><vt:variant><vt:i4>{}</vt:i4></vt:variant></vt:vector></HeadingPairs>"#,
            count
        )?;
        write!(xml, r#"<TitlesOfParts><vt:vector size="{}" baseType="lpstr">"#, count)?;
        for name in sheet_names {
            write!(xml, "<vt:lpstr>{}</vt:lpstr>", escape_xml(name))?;
        }
        xml.push_str("</vt:vector></TitlesOfParts>");
        xml.push_str("<LinksUpToDate>false</LinksUpToDate><SharedDoc>false</SharedDoc>");
        xml.push_str("<HyperlinksChanged>false</HyperlinksChanged><AppVersion>16.0300</AppVersion>");
        xml.push_str("</Properties>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_xml() {
        let props = DocumentProperties {
            creator: Some("Ann & Bob".into()),
            title: None,
            created: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };
        let xml = props.core_xml().unwrap();
        assert!(xml.contains("<dc:creator>Ann &amp; Bob</dc:creator>"));
        assert!(xml.contains(r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-05-01T12:30:00Z</dcterms:created>"#));
        assert!(!xml.contains("<dc:title>"));
    }

    #[test]
    fn test_app_xml_lists_sheets() {
        let xml = DocumentProperties::default()
            .app_xml(["Report", "Sheet2"].into_iter())
            .unwrap();
        assert!(xml.contains("<vt:i4>2</vt:i4>"));
        assert!(xml.contains("<vt:lpstr>Report</vt:lpstr><vt:lpstr>Sheet2</vt:lpstr>"));
    }
}
