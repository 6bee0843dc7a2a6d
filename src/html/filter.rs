/// Optional class-token filter for tables, rows or cells.
///
/// A node matches a set filter when its `class` attribute, split on ASCII
/// whitespace, contains the token exactly. An unset filter matches every
/// node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFilter {
    token: Option<String>,
}

impl ClassFilter {
    /// A filter that matches every node.
    pub fn any() -> Self {
        Self::default()
    }

    /// A filter for `class`.
    ///
    /// Surrounding whitespace is ignored; an empty name matches everything.
    pub fn new(class: Option<&str>) -> Self {
        let token = class
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self { token }
    }

    /// The class token, if the filter is set.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.token.is_some()
    }

    /// Test a node's `class` attribute against the filter.
    pub fn matches(&self, class_attr: Option<&str>) -> bool {
        match (&self.token, class_attr) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(token), Some(classes)) => classes.split_ascii_whitespace().any(|c| c == token),
        }
    }
}

impl From<Option<&str>> for ClassFilter {
    fn from(class: Option<&str>) -> Self {
        Self::new(class)
    }
}

impl From<&str> for ClassFilter {
    fn from(class: &str) -> Self {
        Self::new(Some(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_membership() {
        let filter = ClassFilter::from("b");
        assert!(filter.matches(Some("a b c")));
        assert!(filter.matches(Some("  b\t")));
        assert!(!filter.matches(Some("a c")));
        assert!(!filter.matches(None));
        assert!(!ClassFilter::from("x").matches(Some("a b c")));
    }

    #[test]
    fn test_no_prefix_or_suffix_matches() {
        let filter = ClassFilter::from("pick");
        assert!(!filter.matches(Some("pickme")));
        assert!(!filter.matches(Some("unpick")));
    }

    #[test]
    fn test_unset_matches_everything() {
        assert!(ClassFilter::any().matches(None));
        assert!(ClassFilter::new(None).matches(Some("anything")));
        assert!(!ClassFilter::new(Some("   ")).is_set());
    }
}
