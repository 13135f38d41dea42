//! Property values.

use std::collections::BTreeSet;
use std::fmt;

/// One formal alias of a character name, with its alias type
/// (`correction`, `control`, `alternate`, `figment`, `abbreviation`)
/// when the data provides one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameAlias {
    pub alias: String,
    pub kind: Option<String>,
}

impl NameAlias {
    pub fn new(alias: impl Into<String>, kind: Option<&str>) -> Self {
        NameAlias {
            alias: alias.into(),
            kind: kind.map(str::to_string),
        }
    }
}

impl fmt::Display for NameAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{} ({})", self.alias, kind),
            None => f.write_str(&self.alias),
        }
    }
}

/// The value a group holds for one property.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyValue {
    Text(String),
    Aliases(BTreeSet<NameAlias>),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            PropertyValue::Aliases(_) => None,
        }
    }

    pub fn as_aliases(&self) -> Option<&BTreeSet<NameAlias>> {
        match self {
            PropertyValue::Aliases(aliases) => Some(aliases),
            PropertyValue::Text(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Text(text.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        PropertyValue::Text(text)
    }
}

impl From<BTreeSet<NameAlias>> for PropertyValue {
    fn from(aliases: BTreeSet<NameAlias>) -> Self {
        PropertyValue::Aliases(aliases)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(text) => f.write_str(text),
            PropertyValue::Aliases(aliases) => {
                let parts: Vec<String> = aliases.iter().map(|a| a.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}
