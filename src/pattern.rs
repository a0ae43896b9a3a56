//! Name patterns for list filtering
//!
//! Replaces the string-or-regex parameter of the host API with a tagged
//! choice. The default matches everything.

use regex::Regex;

/// Filter applied to entry names during a list operation
#[derive(Debug, Clone, Default)]
pub enum NamePattern {
    /// Match every entry (the default)
    #[default]
    Any,

    /// Match entries whose name contains the given substring
    Contains(String),

    /// Match entries whose name matches the given regex
    Regex(Regex),
}

impl NamePattern {
    /// Does `name` match this pattern?
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Any => true,
            NamePattern::Contains(needle) => name.contains(needle.as_str()),
            NamePattern::Regex(re) => re.is_match(name),
        }
    }
}

impl From<&str> for NamePattern {
    fn from(needle: &str) -> Self {
        NamePattern::Contains(needle.to_string())
    }
}

impl From<String> for NamePattern {
    fn from(needle: String) -> Self {
        NamePattern::Contains(needle)
    }
}

impl From<Regex> for NamePattern {
    fn from(re: Regex) -> Self {
        NamePattern::Regex(re)
    }
}
