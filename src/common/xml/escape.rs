use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// Characters that XML 1.0 cannot represent at all are dropped first, so the
/// result is always safe to embed in element text or attribute values.
///
/// # Examples
///
/// ```
/// use htmlsheet::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("bell\u{7}"), "bell");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let cleaned = strip_invalid_xml_chars(s);
    XML_ESCAPER.replace_all(&cleaned, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Remove characters outside the XML 1.0 `Char` production.
///
/// Tab, line feed and carriage return survive; the remaining C0 controls,
/// lone surrogates (impossible in `&str`) and U+FFFE/U+FFFF are removed.
pub fn strip_invalid_xml_chars(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

#[inline]
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}
