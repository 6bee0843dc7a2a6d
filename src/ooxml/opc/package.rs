//! Package assembly: parts, content types and relationships into a ZIP.

use super::constants::{content_type as ct, namespace};
use super::error::{OpcError, Result};
use super::rel::Relationships;
use crate::common::xml::escape_xml;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Partname of the content types manifest, as stored in the archive.
const CONTENT_TYPES_MEMBER: &str = "[Content_Types].xml";

#[derive(Debug)]
struct PackagePart {
    partname: String,
    content_type: String,
    blob: Vec<u8>,
}

/// Collects the parts of a package and serialises them into ZIP bytes.
///
/// Partnames are absolute (`/xl/workbook.xml`). Content types of parts
/// whose extension has a matching `Default` entry are not repeated as
/// `Override` entries.
///
/// # Example
///
/// ```
/// use htmlsheet::ooxml::opc::PackageWriter;
/// use htmlsheet::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
///
/// let mut pkg = PackageWriter::new();
/// pkg.add_part("/xl/workbook.xml", ct::SML_SHEET_MAIN, b"<workbook/>".to_vec())?;
/// pkg.package_rels_mut().relate_to("xl/workbook.xml", rt::OFFICE_DOCUMENT);
/// let bytes = pkg.finish()?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), htmlsheet::ooxml::opc::OpcError>(())
/// ```
#[derive(Debug)]
pub struct PackageWriter {
    defaults: BTreeMap<String, String>,
    parts: Vec<PackagePart>,
    package_rels: Relationships,
}

impl PackageWriter {
    pub fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            parts: Vec::new(),
            package_rels: Relationships::new(),
        }
    }

    /// Register a `Default` content type for an extension.
    pub fn add_default(&mut self, ext: &str, content_type: &str) {
        self.defaults.insert(ext.to_string(), content_type.to_string());
    }

    /// Add a part under an absolute partname.
    pub fn add_part(
        &mut self,
        partname: impl Into<String>,
        content_type: &str,
        blob: Vec<u8>,
    ) -> Result<()> {
        let partname = partname.into();
        if !partname.starts_with('/') || partname.ends_with('/') || partname.len() < 2 {
            return Err(OpcError::InvalidPartName(partname));
        }
        if self.parts.iter().any(|p| p.partname.eq_ignore_ascii_case(&partname)) {
            return Err(OpcError::DuplicatePart(partname));
        }

        self.parts.push(PackagePart {
            partname,
            content_type: content_type.to_string(),
            blob,
        });
        Ok(())
    }

    /// Add the relationships part belonging to `source_partname`.
    ///
    /// Empty collections are skipped.
    pub fn add_part_rels(&mut self, source_partname: &str, rels: &Relationships) -> Result<()> {
        if rels.is_empty() {
            return Ok(());
        }
        self.add_part(
            rels_partname(source_partname),
            ct::OPC_RELATIONSHIPS,
            rels.to_xml().into_bytes(),
        )
    }

    /// Relationships from the package root (`/_rels/.rels`).
    pub fn package_rels_mut(&mut self) -> &mut Relationships {
        &mut self.package_rels
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Serialise the package into ZIP bytes, deflating every member.
    pub fn finish(self) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));

        archive.start_file(CONTENT_TYPES_MEMBER, options)?;
        archive.write_all(self.content_types_xml().as_bytes())?;

        archive.start_file("_rels/.rels", options)?;
        archive.write_all(self.package_rels.to_xml().as_bytes())?;

        for part in &self.parts {
            archive.start_file(membername(&part.partname), options)?;
            archive.write_all(&part.blob)?;
        }

        Ok(archive.finish()?.into_inner())
    }

    fn content_types_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.parts.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(namespace::OPC_CONTENT_TYPES);
        xml.push_str(r#"">"#);

        for (ext, content_type) in &self.defaults {
            xml.push_str(r#"<Default Extension=""#);
            xml.push_str(&escape_xml(ext));
            xml.push_str(r#"" ContentType=""#);
            xml.push_str(&escape_xml(content_type));
            xml.push_str(r#""/>"#);
        }

        for part in &self.parts {
            let default = extension(&part.partname).and_then(|ext| self.defaults.get(ext));
            if default.is_some_and(|ct| *ct == part.content_type) {
                continue;
            }
            xml.push_str(r#"<Override PartName=""#);
            xml.push_str(&escape_xml(&part.partname));
            xml.push_str(r#"" ContentType=""#);
            xml.push_str(&escape_xml(&part.content_type));
            xml.push_str(r#""/>"#);
        }

        xml.push_str("</Types>");
        xml
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Partname of the relationships part for `source_partname`.
///
/// `/xl/workbook.xml` → `/xl/_rels/workbook.xml.rels`
pub fn rels_partname(source_partname: &str) -> String {
    match source_partname.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("/_rels/{}.rels", source_partname),
    }
}

/// ZIP member name of a partname (no leading slash).
fn membername(partname: &str) -> &str {
    partname.trim_start_matches('/')
}

fn extension(partname: &str) -> Option<&str> {
    let file = partname.rsplit('/').next()?;
    file.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;
    use std::io::Read;

    fn read_member(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut member = archive.by_name(name).unwrap();
        let mut content = String::new();
        member.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_rels_partname() {
        assert_eq!(rels_partname("/xl/workbook.xml"), "/xl/_rels/workbook.xml.rels");
        assert_eq!(
            rels_partname("/xl/worksheets/sheet1.xml"),
            "/xl/worksheets/_rels/sheet1.xml.rels"
        );
    }

    #[test]
    fn test_invalid_and_duplicate_parts() {
        let mut pkg = PackageWriter::new();
        assert!(matches!(
            pkg.add_part("xl/workbook.xml", ct::SML_SHEET_MAIN, Vec::new()),
            Err(OpcError::InvalidPartName(_))
        ));
        pkg.add_part("/xl/workbook.xml", ct::SML_SHEET_MAIN, Vec::new()).unwrap();
        assert!(matches!(
            pkg.add_part("/xl/Workbook.xml", ct::SML_SHEET_MAIN, Vec::new()),
            Err(OpcError::DuplicatePart(_))
        ));
    }

    #[test]
    fn test_finish_writes_manifest_rels_and_parts() {
        let mut pkg = PackageWriter::new();
        pkg.add_part("/xl/workbook.xml", ct::SML_SHEET_MAIN, b"<workbook/>".to_vec())
            .unwrap();
        pkg.add_part("/docProps/custom.xml", ct::XML, b"<x/>".to_vec())
            .unwrap();
        pkg.package_rels_mut()
            .relate_to("xl/workbook.xml", rt::OFFICE_DOCUMENT);

        let mut rels = Relationships::new();
        rels.relate_to("styles.xml", rt::STYLES);
        pkg.add_part_rels("/xl/workbook.xml", &rels).unwrap();
        pkg.add_part_rels("/xl/empty.xml", &Relationships::new()).unwrap();
        assert_eq!(pkg.part_count(), 3);

        let bytes = pkg.finish().unwrap();
        let types = read_member(&bytes, "[Content_Types].xml");
        assert!(types.contains(r#"<Override PartName="/xl/workbook.xml""#));
        // Parts covered by a Default entry get no Override
        assert!(!types.contains("/docProps/custom.xml"));
        assert!(!types.contains("/xl/_rels/workbook.xml.rels"));

        assert!(read_member(&bytes, "_rels/.rels").contains("xl/workbook.xml"));
        assert!(read_member(&bytes, "xl/_rels/workbook.xml.rels").contains("styles.xml"));
        assert_eq!(read_member(&bytes, "xl/workbook.xml"), "<workbook/>");
    }
}
