//! Pattern application over a raw document

use crate::error::{ApplyError, ExtractError};
use crate::postprocess;
use crate::resolver::resolve_domain;
use crate::selector::ParsedDocument;
use newsprint_domain::{ExtractedFields, FieldPattern, PatternSet, Preview};
use newsprint_store::PatternStore;
use std::sync::Arc;
use tracing::debug;

/// Apply every pattern of `pattern_set` to `raw`.
///
/// The document is parsed once. Fields without a pattern, fields whose
/// pattern matched nothing and fields whose pattern could not be applied all
/// come back as empty strings.
pub fn transform(raw: &str, pattern_set: &PatternSet) -> ExtractedFields {
    let document = ParsedDocument::new(raw);
    let mut fields = ExtractedFields::empty();

    for (field, pattern) in pattern_set.iter() {
        match apply_pattern(&document, pattern) {
            Ok(value) => fields.set(field, value),
            Err(e) => debug!("Field '{}' left empty: {}", field, e),
        }
    }

    fields
}

/// Apply one pattern to `raw`, reporting failures instead of swallowing them
pub fn preview(raw: &str, pattern: &FieldPattern) -> Preview {
    match apply_pattern(&ParsedDocument::new(raw), pattern) {
        Ok(value) if value.is_empty() => Preview::NoMatch,
        Ok(value) => Preview::Text(value),
        Err(e) => Preview::Invalid(e.to_string()),
    }
}

fn apply_pattern(document: &ParsedDocument<'_>, pattern: &FieldPattern) -> Result<String, ApplyError> {
    let matches = document.select(&pattern.selector)?;
    let joined = matches
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if joined.is_empty() {
        return Ok(joined);
    }

    let value = match &pattern.post_process {
        Some(step) => postprocess::apply(&joined, step)?,
        None => joined,
    };
    Ok(value.trim().to_string())
}

/// Extraction bound to a pattern store
#[derive(Clone)]
pub struct ExtractionEngine {
    store: Arc<PatternStore>,
}

impl ExtractionEngine {
    /// Create an engine reading patterns from `store`
    pub fn new(store: Arc<PatternStore>) -> Self {
        Self { store }
    }

    /// The backing store
    pub fn store(&self) -> &Arc<PatternStore> {
        &self.store
    }

    /// See [`transform`]
    pub fn transform(&self, raw: &str, pattern_set: &PatternSet) -> ExtractedFields {
        transform(raw, pattern_set)
    }

    /// See [`preview`]
    pub fn preview(&self, raw: &str, pattern: &FieldPattern) -> Preview {
        preview(raw, pattern)
    }

    /// Resolve `url` to its root domain and extract `raw` with that domain's
    /// stored patterns.
    ///
    /// A domain with no stored pattern set yields
    /// [`ExtractError::ScrapePatternNotDefined`].
    pub fn transform_for_domain(&self, url: &str, raw: &str) -> Result<ExtractedFields, ExtractError> {
        let domain = resolve_domain(url)?;

        let pattern_set = self
            .store
            .lookup(&domain)
            .ok_or_else(|| ExtractError::ScrapePatternNotDefined {
                domain: domain.clone(),
            })?;

        debug!("Extracting {} with {} pattern(s) for '{}'", url, pattern_set.len(), domain);
        Ok(transform(raw, &pattern_set))
    }
}
