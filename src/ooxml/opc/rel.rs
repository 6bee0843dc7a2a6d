//! Relationship collections and their `.rels` serialisation.

use super::constants::namespace;
use crate::common::xml::escape_xml;

/// A single internal relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    r_id: String,
    reltype: String,
    target: String,
}

impl Relationship {
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Target reference, relative to the source part's directory.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Relationships of one source part (or of the package itself).
///
/// Identifiers are assigned sequentially as `rId1`, `rId2`, ...
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its identifier.
    ///
    /// Relating to the same target with the same type twice returns the
    /// existing identifier.
    pub fn relate_to(&mut self, target: &str, reltype: &str) -> String {
        if let Some(existing) = self
            .rels
            .iter()
            .find(|r| r.target == target && r.reltype == reltype)
        {
            return existing.r_id.clone();
        }

        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            r_id: r_id.clone(),
            reltype: reltype.to_string(),
            target: target.to_string(),
        });
        r_id
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Serialize to the content of a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);

        for rel in &self.rels {
            xml.push_str(r#"<Relationship Id=""#);
            xml.push_str(&escape_xml(&rel.r_id));
            xml.push_str(r#"" Type=""#);
            xml.push_str(&escape_xml(&rel.reltype));
            xml.push_str(r#"" Target=""#);
            xml.push_str(&escape_xml(&rel.target));
            xml.push_str(r#""/>"#);
        }

        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_sequential_ids_and_dedup() {
        let mut rels = Relationships::new();
        assert_eq!(rels.relate_to("worksheets/sheet1.xml", rt::WORKSHEET), "rId1");
        assert_eq!(rels.relate_to("styles.xml", rt::STYLES), "rId2");
        assert_eq!(rels.relate_to("worksheets/sheet1.xml", rt::WORKSHEET), "rId1");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_to_xml() {
        let mut rels = Relationships::new();
        rels.relate_to("xl/workbook.xml", rt::OFFICE_DOCUMENT);
        let xml = rels.to_xml();
        assert!(xml.contains(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#));
        assert!(xml.ends_with("</Relationships>"));
    }
}
