//! Article module - the structured output of an extraction

use crate::field::Field;
use serde::Serialize;
use std::collections::BTreeMap;

/// Structured fields extracted from one document.
///
/// Every field is always present; fields that were not found hold an empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedFields {
    values: BTreeMap<Field, String>,
}

impl ExtractedFields {
    /// All fields present and empty
    pub fn empty() -> Self {
        Self {
            values: Field::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        }
    }

    /// Set the value of a field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Get the value of a field (empty when not found)
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Iterate over every field and its value, in field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// True when no field holds a value
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.is_empty())
    }
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_every_field() {
        let fields = ExtractedFields::empty();
        assert_eq!(fields.iter().count(), 6);
        assert!(fields.is_blank());
    }

    #[test]
    fn test_set_and_get() {
        let mut fields = ExtractedFields::empty();
        fields.set(Field::Title, "Hello");
        assert_eq!(fields.get(Field::Title), "Hello");
        assert_eq!(fields.get(Field::Body), "");
        assert!(!fields.is_blank());
    }

    #[test]
    fn test_json_shape() {
        let mut fields = ExtractedFields::empty();
        fields.set(Field::Title, "Hello");
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["body"], "");
    }
}
