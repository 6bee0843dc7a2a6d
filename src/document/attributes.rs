use indexmap::IndexMap;
use indexmap::map::Iter;

/// Attribute store of a model entity.
///
/// Maps attribute names to their raw string values in the order the parser
/// reported them. Setting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value for `name`.
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Look up an attribute.
    ///
    /// Returns `None` for names that were never set and `Some("")` for
    /// attributes that are present with an empty value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Whether the attribute is present, regardless of its value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_differs_from_empty() {
        let attrs: Attributes = [("data-empty", "")].into_iter().collect();
        assert_eq!(attrs.get("data-empty"), Some(""));
        assert_eq!(attrs.get("data-missing"), None);
        assert!(attrs.contains("data-empty"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut attrs = Attributes::new();
        attrs.insert("colspan", "2");
        attrs.insert("class", "total");
        attrs.insert("colspan", "3");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("colspan"), Some("3"));
        // Replacing a value keeps the original position
        let names: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["colspan", "class"]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let attrs: Attributes = [("Bar", "foo")].into_iter().collect();
        assert_eq!(attrs.get("Bar"), Some("foo"));
        assert_eq!(attrs.get("bar"), None);
    }
}
