//! Pattern module - selectors, field patterns and pattern sets

use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised when a field pattern fails validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The selector method is not one of the supported kinds
    #[error("unsupported selector method '{0}' (expected css or xpath)")]
    UnsupportedMethod(String),

    /// The selector pattern is empty
    #[error("selector pattern must not be empty")]
    EmptyPattern,
}

/// How a pattern is applied to a parsed document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector, matched against the HTML tree
    Css(String),

    /// XPath 1.0 expression, evaluated against the document
    Xpath(String),
}

impl Selector {
    /// Build a selector from the `method` and `pattern` strings of a pattern document
    pub fn from_parts(method: &str, pattern: &str) -> Result<Self, PatternError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(PatternError::EmptyPattern);
        }

        match method.trim().to_lowercase().as_str() {
            "css" => Ok(Selector::Css(pattern.to_string())),
            "xpath" => Ok(Selector::Xpath(pattern.to_string())),
            other => Err(PatternError::UnsupportedMethod(other.to_string())),
        }
    }

    /// Get the method name as stored in pattern documents
    pub fn method(&self) -> &'static str {
        match self {
            Selector::Css(_) => "css",
            Selector::Xpath(_) => "xpath",
        }
    }

    /// Get the raw pattern string
    pub fn pattern(&self) -> &str {
        match self {
            Selector::Css(pattern) | Selector::Xpath(pattern) => pattern,
        }
    }

    /// Check that this selector would survive a round trip through a pattern document
    pub fn validate(&self) -> Result<(), PatternError> {
        Selector::from_parts(self.method(), self.pattern()).map(|_| ())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.method(), self.pattern())
    }
}

/// Transform applied to the matched text after selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostProcess {
    /// Collapse every run of whitespace into a single space
    Squish,

    /// Regex substitution over the matched text
    Replace {
        /// Regular expression to search for
        find: String,
        /// Replacement, may reference capture groups (`$1`)
        #[serde(default)]
        with: String,
    },
}

/// One field's extraction instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldPattern", into = "RawFieldPattern")]
pub struct FieldPattern {
    /// Selector used to locate the field in the document
    pub selector: Selector,

    /// Optional transform applied to the matched text
    pub post_process: Option<PostProcess>,
}

impl FieldPattern {
    /// Create a CSS field pattern with no post-processing
    pub fn css(pattern: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(pattern.into()),
            post_process: None,
        }
    }

    /// Create an XPath field pattern with no post-processing
    pub fn xpath(pattern: impl Into<String>) -> Self {
        Self {
            selector: Selector::Xpath(pattern.into()),
            post_process: None,
        }
    }

    /// Attach a post-process step
    pub fn with_post_process(mut self, post_process: PostProcess) -> Self {
        self.post_process = Some(post_process);
        self
    }
}

impl fmt::Display for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        match &self.post_process {
            Some(PostProcess::Squish) => write!(f, " | squish"),
            Some(PostProcess::Replace { find, with }) => {
                write!(f, " | replace /{}/ -> '{}'", find, with)
            }
            None => Ok(()),
        }
    }
}

/// On-disk shape of a field pattern: `{ method, pattern, post_process? }`
#[derive(Serialize, Deserialize)]
struct RawFieldPattern {
    method: String,
    pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post_process: Option<PostProcess>,
}

impl TryFrom<RawFieldPattern> for FieldPattern {
    type Error = PatternError;

    fn try_from(raw: RawFieldPattern) -> Result<Self, Self::Error> {
        Ok(Self {
            selector: Selector::from_parts(&raw.method, &raw.pattern)?,
            post_process: raw.post_process,
        })
    }
}

impl From<FieldPattern> for RawFieldPattern {
    fn from(pattern: FieldPattern) -> Self {
        Self {
            method: pattern.selector.method().to_string(),
            pattern: pattern.selector.pattern().to_string(),
            post_process: pattern.post_process,
        }
    }
}

/// The per-domain collection of field patterns.
///
/// A set may be partial: fields without a pattern simply extract as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSet {
    fields: BTreeMap<Field, FieldPattern>,
}

impl PatternSet {
    /// Create an empty pattern set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pattern for a field, returning the previous one
    pub fn insert(&mut self, field: Field, pattern: FieldPattern) -> Option<FieldPattern> {
        self.fields.insert(field, pattern)
    }

    /// Builder-style insert
    pub fn with(mut self, field: Field, pattern: FieldPattern) -> Self {
        self.insert(field, pattern);
        self
    }

    /// Get the pattern for a field
    pub fn get(&self, field: Field) -> Option<&FieldPattern> {
        self.fields.get(&field)
    }

    /// Iterate over the fields that have a pattern, in field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldPattern)> {
        self.fields.iter().map(|(field, pattern)| (*field, pattern))
    }

    /// Number of fields with a pattern
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field has a pattern
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every field has a pattern
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Fields without a pattern, in field order
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.fields.contains_key(field))
            .collect()
    }
}

impl FromIterator<(Field, FieldPattern)> for PatternSet {
    fn from_iter<I: IntoIterator<Item = (Field, FieldPattern)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
