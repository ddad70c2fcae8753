//! Field module - the fixed set of article fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An article field that a pattern set can describe.
///
/// The set is closed: pattern documents using any other key are rejected.
/// Variants are declared in alphabetical order so that ordered maps keyed by
/// `Field` serialize the same way the pattern document lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Article body text
    Body,

    /// Short summary, usually from a meta tag
    Description,

    /// Comma separated keywords
    Keywords,

    /// Section or category the article belongs to
    Section,

    /// Publish time, as found in the document
    Time,

    /// Headline
    Title,
}

/// Error returned when parsing a field name that is not in the fixed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}' (expected one of body, description, keywords, section, time, title)")]
pub struct UnknownField(pub String);

impl Field {
    /// Every field, in the order training walks through them
    pub const ALL: [Field; 6] = [
        Field::Body,
        Field::Description,
        Field::Keywords,
        Field::Section,
        Field::Time,
        Field::Title,
    ];

    /// Get the field name as it appears in pattern documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Body => "body",
            Field::Description => "description",
            Field::Keywords => "keywords",
            Field::Section => "section",
            Field::Time => "time",
            Field::Title => "title",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(Field::Body),
            "description" => Ok(Field::Description),
            "keywords" => Ok(Field::Keywords),
            "section" => Ok(Field::Section),
            "time" => Ok(Field::Time),
            "title" => Ok(Field::Title),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
