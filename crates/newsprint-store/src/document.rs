//! The persisted pattern document, handled as a whole value.
//!
//! The document is kept as a `serde_yaml::Value` rather than a typed struct so
//! that keys this crate does not understand (other top-level sections, unknown
//! per-domain data) survive a load/store round trip. Updates go through
//! [`PatternDocument::with_domain`], a pure function returning a new document
//! with exactly one `domains.<domain>` entry replaced.

use crate::error::StoreError;
use newsprint_domain::{Field, FieldPattern, PatternSet};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const DOMAINS_KEY: &str = "domains";
const PRESETS_KEY: &str = "presets";

/// The full pattern document: `domains.<root domain>.<field> = { method, pattern }`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDocument {
    root: Value,
}

impl Default for PatternDocument {
    fn default() -> Self {
        Self {
            root: Value::Mapping(Mapping::new()),
        }
    }
}

impl PatternDocument {
    /// An empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a YAML value; the top level must be a mapping (or empty)
    pub fn from_value(root: Value) -> Result<Self, StoreError> {
        match root {
            Value::Null => Ok(Self::default()),
            Value::Mapping(_) => Ok(Self { root }),
            _ => Err(StoreError::MalformedDocument(
                "top level must be a mapping".to_string(),
            )),
        }
    }

    /// Parse a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StoreError> {
        let root: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(root)
    }

    /// Serialize the whole document
    pub fn to_yaml_string(&self) -> Result<String, StoreError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// The underlying YAML value
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Raw entry stored for a domain, whether or not it is a valid pattern set
    pub fn domain_entry(&self, domain: &str) -> Option<&Value> {
        self.root.get(DOMAINS_KEY)?.get(domain)
    }

    /// Every valid pattern set in the document, keyed by domain.
    ///
    /// Entries that do not deserialize (unknown field, unsupported method,
    /// empty pattern) or that hold no fields are skipped with a warning.
    pub fn pattern_sets(&self) -> BTreeMap<String, PatternSet> {
        let mut sets = BTreeMap::new();

        let domains = match self.root.get(DOMAINS_KEY) {
            None | Some(Value::Null) => return sets,
            Some(Value::Mapping(domains)) => domains,
            Some(_) => {
                warn!("'{}' is not a mapping; no pattern sets loaded", DOMAINS_KEY);
                return sets;
            }
        };

        for (key, entry) in domains {
            let Some(domain) = key.as_str() else {
                warn!("Skipping non-string domain key {:?}", key);
                continue;
            };

            match serde_yaml::from_value::<PatternSet>(entry.clone()) {
                Ok(set) if set.is_empty() => {
                    warn!("Skipping domain '{}': no field patterns", domain);
                }
                Ok(set) => {
                    sets.insert(domain.to_string(), set);
                }
                Err(e) => {
                    warn!("Skipping domain '{}': {}", domain, e);
                }
            }
        }

        sets
    }

    /// Named preset patterns for a field, from the `presets` section.
    ///
    /// Presets using methods this crate cannot apply are skipped.
    pub fn presets(&self, field: Field) -> Vec<(String, FieldPattern)> {
        let Some(presets) = self
            .root
            .get(PRESETS_KEY)
            .and_then(|presets| presets.get(field.as_str()))
            .and_then(Value::as_mapping)
        else {
            return Vec::new();
        };

        presets
            .iter()
            .filter_map(|(name, entry)| {
                let name = name.as_str()?;
                match serde_yaml::from_value::<FieldPattern>(entry.clone()) {
                    Ok(pattern) => Some((name.to_string(), pattern)),
                    Err(e) => {
                        debug!("Ignoring {} preset '{}': {}", field, name, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// A copy of this document with `domains.<domain>` set to `pattern_set`.
    ///
    /// Every other key, including other domains, is carried over unchanged and
    /// keeps its position; a new domain is appended.
    pub fn with_domain(&self, domain: &str, pattern_set: &PatternSet) -> Result<Self, StoreError> {
        let mut root = self.root.clone();
        let entry = serde_yaml::to_value(pattern_set)?;

        let top = root.as_mapping_mut().ok_or_else(|| {
            StoreError::MalformedDocument("top level must be a mapping".to_string())
        })?;

        if matches!(top.get(DOMAINS_KEY), None | Some(Value::Null)) {
            top.insert(Value::from(DOMAINS_KEY), Value::Mapping(Mapping::new()));
        }

        let domains = top
            .get_mut(DOMAINS_KEY)
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| {
                StoreError::MalformedDocument(format!("'{}' is not a mapping", DOMAINS_KEY))
            })?;
        domains.insert(Value::from(domain), entry);

        Ok(Self { root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
presets:
  title:
    og_title:
      method: xpath
      pattern: "//meta[@property='og:title']/@content"
    readability:
      method: readability
      pattern: ""
domains:
  example.com:
    title:
      method: css
      pattern: h1
  broken.com:
    title:
      method: highscore
      pattern: x
  other.org:
    body:
      method: css
      pattern: article p
    extra_key: kept
"#;

    #[test]
    fn test_pattern_sets_skip_invalid_entries() {
        let doc = PatternDocument::from_yaml_str(SAMPLE).unwrap();
        let sets = doc.pattern_sets();

        assert!(sets.contains_key("example.com"));
        assert!(!sets.contains_key("broken.com"));
        // unknown field keys invalidate the whole entry
        assert!(!sets.contains_key("other.org"));
    }

    #[test]
    fn test_presets_skip_unsupported_methods() {
        let doc = PatternDocument::from_yaml_str(SAMPLE).unwrap();
        let presets = doc.presets(Field::Title);

        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].0, "og_title");
        assert!(doc.presets(Field::Body).is_empty());
    }

    #[test]
    fn test_with_domain_only_touches_one_key() {
        let doc = PatternDocument::from_yaml_str(SAMPLE).unwrap();
        let set = PatternSet::new().with(Field::Title, FieldPattern::css(".t"));

        let updated = doc.with_domain("new-site.com", &set).unwrap();

        assert_eq!(updated.as_value()["presets"], doc.as_value()["presets"]);
        for domain in ["example.com", "broken.com", "other.org"] {
            assert_eq!(updated.domain_entry(domain), doc.domain_entry(domain));
        }
        assert_eq!(updated.pattern_sets().get("new-site.com"), Some(&set));
        // the original value is untouched
        assert!(doc.domain_entry("new-site.com").is_none());
    }

    #[test]
    fn test_with_domain_on_empty_document() {
        let doc = PatternDocument::new();
        let set = PatternSet::new().with(Field::Title, FieldPattern::css("h1"));

        let updated = doc.with_domain("example.com", &set).unwrap();
        assert_eq!(updated.pattern_sets().len(), 1);
    }

    #[test]
    fn test_with_domain_rejects_scalar_domains_section() {
        let doc = PatternDocument::from_yaml_str("domains: test\n").unwrap();
        let set = PatternSet::new().with(Field::Title, FieldPattern::css("h1"));

        assert!(doc.pattern_sets().is_empty());
        assert!(matches!(
            doc.with_domain("example.com", &set),
            Err(StoreError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        assert!(matches!(
            PatternDocument::from_yaml_str("- a\n- b\n"),
            Err(StoreError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_domain_order_preserved() {
        let doc = PatternDocument::from_yaml_str(SAMPLE).unwrap();
        let set = PatternSet::new().with(Field::Title, FieldPattern::css(".headline"));

        let yaml = doc.with_domain("broken.com", &set).unwrap().to_yaml_string().unwrap();
        let example = yaml.find("example.com").unwrap();
        let broken = yaml.find("broken.com").unwrap();
        let other = yaml.find("other.org").unwrap();
        assert!(example < broken && broken < other);
    }
}
