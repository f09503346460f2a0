use convert_case::{Case, Casing};

/// True for characters permitted in a node name.
pub fn valid_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// A widget type tag used in diagnostics: lowercase ASCII alphanumerics plus
/// underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName {
    /// The validated tag text.
    name: String,
}

impl NodeName {
    /// Munge an arbitrary string into a valid node name by converting to
    /// snake case and dropping any remaining invalid characters.
    pub fn convert(name: &str) -> Self {
        let name = name.to_case(Case::Snake);
        Self {
            name: name.chars().filter(|x| valid_name_char(*x)).collect(),
        }
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert() {
        assert_eq!(NodeName::convert("PackBox"), "pack_box");
        assert_eq!(NodeName::convert("Grid"), "grid");
        assert_eq!(NodeName::convert("Foo Bar!"), "foo_bar");
    }
}
