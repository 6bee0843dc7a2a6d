/// Shared strings table for XLSX workbooks.
use super::super::error::Result;
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// Shared strings table built while worksheets are serialised.
///
/// Excel stores cell text in one workbook-wide table and references it by
/// index. `count` tracks every reference, `uniqueCount` the distinct
/// strings.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    references: usize,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference a string and return its index.
    pub fn add(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&index) = self.index.get(s) {
            return index;
        }

        let index = self.strings.len();
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), index);
        index
    }

    /// Number of distinct strings.
    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Serialize the table to `sharedStrings.xml`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.strings.len() * 32);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            namespace::SML_MAIN,
            self.references,
            self.strings.len()
        )?;

        for s in &self.strings {
            // Leading or trailing whitespace is dropped by Excel unless preserved
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s))?;
            } else {
                write!(xml, "<si><t>{}</t></si>", escape_xml(s))?;
            }
        }

        xml.push_str("</sst>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_strings_dedup() {
        let mut ss = SharedStrings::new();
        assert_eq!(ss.add("Hello"), 0);
        assert_eq!(ss.add("World"), 1);
        assert_eq!(ss.add("Hello"), 0);
        assert_eq!(ss.unique_count(), 2);

        let xml = ss.to_xml().unwrap();
        assert!(xml.contains(r#"count="3" uniqueCount="2""#));
        assert!(xml.contains("<si><t>Hello</t></si>"));
    }

    #[test]
    fn test_escaping_and_space_preservation() {
        let mut ss = SharedStrings::new();
        ss.add("a < b & c");
        ss.add(" padded ");
        let xml = ss.to_xml().unwrap();
        assert!(xml.contains("<t>a &lt; b &amp; c</t>"));
        assert!(xml.contains(r#"<t xml:space="preserve"> padded </t>"#));
    }
}
