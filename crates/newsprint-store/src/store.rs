//! The process-wide pattern store

use crate::document::PatternDocument;
use crate::error::StoreError;
use crate::source::{PatternsSource, Source, StopwordsSource, StoreConfig};
use newsprint_domain::{Field, FieldPattern, PatternSet};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Result of [`PatternStore::merge_and_persist`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The domain was new; the set was stored
    Inserted(PatternSet),

    /// The domain existed and was overwritten
    Replaced(PatternSet),

    /// The domain existed and overwrite was not requested; nothing changed
    KeptExisting(PatternSet),
}

impl MergeOutcome {
    /// The pattern set now stored for the domain
    pub fn pattern_set(&self) -> &PatternSet {
        match self {
            MergeOutcome::Inserted(set)
            | MergeOutcome::Replaced(set)
            | MergeOutcome::KeptExisting(set) => set,
        }
    }

    /// Consume the outcome, returning the pattern set now stored for the domain
    pub fn into_pattern_set(self) -> PatternSet {
        match self {
            MergeOutcome::Inserted(set)
            | MergeOutcome::Replaced(set)
            | MergeOutcome::KeptExisting(set) => set,
        }
    }

    /// True when the store was modified
    pub fn was_written(&self) -> bool {
        !matches!(self, MergeOutcome::KeptExisting(_))
    }
}

/// Everything loaded from the sources, swapped as a unit
struct Snapshot {
    document: PatternDocument,
    patterns: BTreeMap<String, PatternSet>,
    stopwords: Vec<String>,
}

impl Snapshot {
    fn load(config: &StoreConfig) -> Result<Self, StoreError> {
        let document = config.patterns.load()?;
        let stopwords = config.stopwords.load()?;
        Ok(Self::from_parts(document, stopwords))
    }

    fn from_parts(document: PatternDocument, stopwords: Vec<String>) -> Self {
        Self {
            patterns: document.pattern_sets(),
            document,
            stopwords,
        }
    }
}

/// Domain-keyed extraction patterns plus the stopword list.
///
/// Share one instance per process as `Arc<PatternStore>`.
///
/// # Thread Safety
///
/// Lookups take a shared read lock on the loaded snapshot. `merge_and_persist`,
/// `reset` and source changes serialize on a single writer lock that also owns
/// the configured sources, so the load-modify-store of the whole document is
/// never interleaved with another mutation.
pub struct PatternStore {
    state: RwLock<Snapshot>,
    writer: Mutex<StoreConfig>,
}

impl PatternStore {
    /// Load a store from the given sources.
    ///
    /// Fails with [`StoreError::ConfigurationLoad`] when either source cannot
    /// be read.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let snapshot = Snapshot::load(&config)?;
        info!(
            "Loaded {} pattern set(s) from {}, {} stopword(s) from {}",
            snapshot.patterns.len(),
            config.patterns.describe(),
            snapshot.stopwords.len(),
            config.stopwords.describe()
        );

        Ok(Self {
            state: RwLock::new(snapshot),
            writer: Mutex::new(config),
        })
    }

    /// Load a store from two YAML files
    pub fn from_paths(
        patterns: impl Into<PathBuf>,
        stopwords: impl Into<PathBuf>,
    ) -> Result<Self, StoreError> {
        Self::new(StoreConfig::from_paths(patterns, stopwords))
    }

    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn writer(&self) -> MutexGuard<'_, StoreConfig> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pattern set stored for `domain`; a miss is a normal outcome
    pub fn lookup(&self, domain: &str) -> Option<PatternSet> {
        self.read().patterns.get(domain).cloned()
    }

    /// True when a valid pattern set is stored for `domain`
    pub fn contains(&self, domain: &str) -> bool {
        self.read().patterns.contains_key(domain)
    }

    /// Every domain with a stored pattern set, sorted
    pub fn domains(&self) -> Vec<String> {
        self.read().patterns.keys().cloned().collect()
    }

    /// The loaded stopword list, in source order
    pub fn stopwords(&self) -> Vec<String> {
        self.read().stopwords.clone()
    }

    /// Named preset patterns for a field
    pub fn presets(&self, field: Field) -> Vec<(String, FieldPattern)> {
        self.read().document.presets(field)
    }

    /// True when the backing document holds an entry for `domain`, loadable or not.
    ///
    /// File-backed stores re-read the file, so entries written since this
    /// store loaded are seen.
    pub fn has_entry(&self, domain: &str) -> Result<bool, StoreError> {
        let config = self.writer();
        Ok(self.current_document(&config)?.domain_entry(domain).is_some())
    }

    /// The document a write would start from: the file as it is now, or the
    /// in-memory copy for supplier-backed stores
    fn current_document(&self, config: &StoreConfig) -> Result<PatternDocument, StoreError> {
        match &config.patterns {
            Source::File(_) => config.patterns.load(),
            Source::Supplier(_) => Ok(self.read().document.clone()),
        }
    }

    fn install(&self, document: PatternDocument) {
        let stopwords = self.read().stopwords.clone();
        *self.write() = Snapshot::from_parts(document, stopwords);
    }

    /// Change where patterns are loaded from; takes effect on the next [`reset`](Self::reset)
    pub fn set_patterns_source(&self, source: PatternsSource) {
        self.writer().patterns = source;
    }

    /// Change where stopwords are loaded from; takes effect on the next [`reset`](Self::reset)
    pub fn set_stopwords_source(&self, source: StopwordsSource) {
        self.writer().stopwords = source;
    }

    /// Discard in-memory state and reload both sources.
    ///
    /// On failure the previously loaded state is kept.
    pub fn reset(&self) -> Result<(), StoreError> {
        let config = self.writer();

        match Snapshot::load(&config) {
            Ok(snapshot) => {
                info!(
                    "Reloaded {} pattern set(s) and {} stopword(s)",
                    snapshot.patterns.len(),
                    snapshot.stopwords.len()
                );
                *self.write() = snapshot;
                Ok(())
            }
            Err(e) => {
                warn!("Reset failed, keeping previous state: {}", e);
                Err(e)
            }
        }
    }

    /// Store `pattern_set` under `domain` and persist the whole document.
    ///
    /// - absent domain: inserted and persisted
    /// - present, `overwrite == false`: untouched, the existing set is returned
    /// - present, `overwrite == true`: replaced and persisted
    ///
    /// Presence is decided against the re-read document, so an entry another
    /// process saved, or one that was skipped at load, is never clobbered
    /// without `overwrite`. Such an unloadable entry is kept as is and
    /// reported with an empty set.
    ///
    /// File-backed stores re-read the file, update the single domain key and
    /// write the complete document through a temporary file that is renamed
    /// over the original. Supplier-backed stores only update memory.
    pub fn merge_and_persist(
        &self,
        domain: &str,
        pattern_set: PatternSet,
        overwrite: bool,
    ) -> Result<MergeOutcome, StoreError> {
        if pattern_set.is_empty() {
            return Err(StoreError::EmptyPatternSet(domain.to_string()));
        }

        for (field, pattern) in pattern_set.iter() {
            pattern
                .selector
                .validate()
                .map_err(|source| StoreError::InvalidPattern {
                    domain: domain.to_string(),
                    field,
                    source,
                })?;
        }

        let config = self.writer();
        let base = self.current_document(&config)?;

        let existed = base.domain_entry(domain).is_some();
        if existed && !overwrite {
            let existing = base.pattern_sets().remove(domain).unwrap_or_default();
            info!("Kept existing patterns for '{}'", domain);
            self.install(base);
            return Ok(MergeOutcome::KeptExisting(existing));
        }

        let updated = base.with_domain(domain, &pattern_set)?;

        match &config.patterns {
            Source::File(path) => {
                write_atomically(path, &updated.to_yaml_string()?)?;
                info!("Persisted patterns for '{}' to {}", domain, path.display());
            }
            Source::Supplier(_) => {
                debug!("Supplier-backed store; patterns for '{}' kept in memory", domain);
            }
        }

        self.install(updated);

        Ok(if existed {
            MergeOutcome::Replaced(pattern_set)
        } else {
            MergeOutcome::Inserted(pattern_set)
        })
    }
}

fn write_atomically(path: &Path, contents: &str) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsprint_domain::FieldPattern;

    fn supplier_store(yaml: &'static str) -> PatternStore {
        PatternStore::new(StoreConfig::new(
            PatternsSource::supplier(move || Ok(PatternDocument::from_yaml_str(yaml)?)),
            StopwordsSource::empty(),
        ))
        .unwrap()
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let store = supplier_store("domains: {}\n");
        assert!(store.lookup("example.com").is_none());
        assert!(!store.contains("example.com"));
    }

    #[test]
    fn test_empty_set_rejected() {
        let store = supplier_store("domains: {}\n");
        assert!(matches!(
            store.merge_and_persist("example.com", PatternSet::new(), false),
            Err(StoreError::EmptyPatternSet(_))
        ));
    }

    #[test]
    fn test_empty_selector_rejected_before_persisting() {
        let store = supplier_store("domains: {}\n");
        let set = PatternSet::new()
            .with(Field::Title, FieldPattern::css("h1"))
            .with(Field::Body, FieldPattern::xpath(""));

        match store.merge_and_persist("example.com", set, false) {
            Err(StoreError::InvalidPattern { domain, field, .. }) => {
                assert_eq!(domain, "example.com");
                assert_eq!(field, Field::Body);
            }
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
        assert!(!store.contains("example.com"));
    }

    #[test]
    fn test_supplier_merge_is_in_memory_until_reset() {
        let store = supplier_store("domains: {}\n");
        let set = PatternSet::new().with(Field::Title, FieldPattern::css("h1"));

        let outcome = store.merge_and_persist("example.com", set.clone(), false).unwrap();
        assert_eq!(outcome, MergeOutcome::Inserted(set.clone()));
        assert_eq!(store.lookup("example.com"), Some(set));

        store.reset().unwrap();
        assert!(store.lookup("example.com").is_none());
    }

    #[test]
    fn test_merge_outcome_accessors() {
        let set = PatternSet::new().with(Field::Title, FieldPattern::css("h1"));
        let kept = MergeOutcome::KeptExisting(set.clone());
        assert!(!kept.was_written());
        assert_eq!(kept.pattern_set(), &set);
        assert!(MergeOutcome::Replaced(set.clone()).was_written());
        assert_eq!(MergeOutcome::Inserted(set.clone()).into_pattern_set(), set);
    }

    #[test]
    fn test_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PatternStore>();
    }
}
