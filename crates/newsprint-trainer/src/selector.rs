//! Interactive per-field pattern search

use crate::candidates::builtin_candidates;
use crate::error::TrainError;
use newsprint_domain::{Candidate, Field, FieldPattern, PatternChoice, PatternSet, Prompt};
use newsprint_extractor::preview;
use newsprint_store::PatternStore;
use tracing::debug;

/// Searches for a working pattern for every field of one document, with the
/// operator confirming each choice.
///
/// Owns no state across calls; the only side effect of [`train`](Self::train)
/// is the sequence of prompt round-trips.
pub struct PatternCandidateSelector<'a> {
    store: &'a PatternStore,
}

impl<'a> PatternCandidateSelector<'a> {
    /// Create a selector drawing preset candidates from `store`
    pub fn new(store: &'a PatternStore) -> Self {
        Self { store }
    }

    /// Candidates for `field`: store presets first, then built-in patterns,
    /// each previewed against `raw`
    pub fn candidates(&self, field: Field, raw: &str) -> Vec<Candidate> {
        let presets = self.store.presets(field);
        let builtins = builtin_candidates(field)
            .into_iter()
            .map(|(label, pattern)| (label.to_string(), pattern));

        let mut candidates: Vec<Candidate> = Vec::new();
        for (label, pattern) in presets.into_iter().chain(builtins) {
            if candidates.iter().any(|c| c.pattern == pattern) {
                continue;
            }
            let preview = preview(raw, &pattern);
            candidates.push(Candidate {
                label,
                pattern,
                preview,
            });
        }
        candidates
    }

    /// Walk every field and let the operator pick, preview and confirm a
    /// pattern for it.
    ///
    /// Abandoned fields are absent from the returned set, which may therefore
    /// be partial or empty.
    pub fn train<P>(&self, domain: &str, raw: &str, prompt: &mut P) -> Result<PatternSet, TrainError>
    where
        P: Prompt + ?Sized,
    {
        let mut pattern_set = PatternSet::new();

        for field in Field::ALL {
            let candidates = self.candidates(field, raw);
            if let Some(pattern) = self.train_field(domain, field, raw, &candidates, prompt)? {
                pattern_set.insert(field, pattern);
            }
        }

        debug!(
            "Trained {} of {} field(s) for '{}'",
            pattern_set.len(),
            Field::ALL.len(),
            domain
        );
        Ok(pattern_set)
    }

    fn train_field<P>(
        &self,
        domain: &str,
        field: Field,
        raw: &str,
        candidates: &[Candidate],
        prompt: &mut P,
    ) -> Result<Option<FieldPattern>, TrainError>
    where
        P: Prompt + ?Sized,
    {
        loop {
            let choice = prompt
                .select_or_edit_pattern(field, candidates)
                .map_err(TrainError::prompt(domain, "select pattern"))?;

            let pattern = match choice {
                PatternChoice::Abandon => {
                    debug!("Field '{}' abandoned for '{}'", field, domain);
                    return Ok(None);
                }
                PatternChoice::Use(pattern) => pattern,
            };

            let result = preview(raw, &pattern);
            let message = format!("{} [{}]\n{}\nUse this pattern for {}?", field, pattern, result, field);
            if prompt
                .confirm(&message)
                .map_err(TrainError::prompt(domain, "confirm pattern"))?
            {
                return Ok(Some(pattern));
            }
        }
    }
}
