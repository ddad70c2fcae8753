//! The scrape-or-train state machine

use crate::error::TrainError;
use crate::selector::PatternCandidateSelector;
use newsprint_domain::{ExtractedFields, Fetcher, Field, PatternSet, Prompt};
use newsprint_extractor::{resolve_domain, ExtractError, ExtractionEngine};
use newsprint_store::{MergeOutcome, PatternStore};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Where a [`TrainingCoordinator`] is in its flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    /// Nothing has happened yet, or the run failed before extraction
    Start,
    /// Extraction succeeded with stored patterns (terminal)
    Extracted,
    /// No patterns are stored for the domain
    NoPattern,
    /// The operator declined to train (terminal)
    Declined,
    /// Candidate selection finished
    Trained,
    /// Training produced no patterns at all (terminal)
    Untrained,
    /// The trained patterns were handed to the store (terminal)
    Saved,
    /// The operator chose not to save the trained patterns (terminal)
    Discarded,
}

impl fmt::Display for TrainingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrainingState::Start => "start",
            TrainingState::Extracted => "extracted",
            TrainingState::NoPattern => "no pattern",
            TrainingState::Declined => "declined",
            TrainingState::Trained => "trained",
            TrainingState::Untrained => "untrained",
            TrainingState::Saved => "saved",
            TrainingState::Discarded => "discarded",
        };
        f.write_str(name)
    }
}

/// Result of a training invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// Stored patterns existed and produced these fields
    Extracted(ExtractedFields),

    /// The operator declined to train; nothing was produced
    Declined {
        /// Domain without patterns
        domain: String,
    },

    /// Every field was abandoned; nothing to save
    Untrained {
        /// Domain that was trained
        domain: String,
    },

    /// The trained patterns went to the store
    Saved {
        /// Domain that was trained
        domain: String,
        /// What the store did with them
        outcome: MergeOutcome,
    },

    /// The operator declined to save; the patterns exist only here
    Discarded {
        /// Domain that was trained
        domain: String,
        /// The patterns that were not saved
        patterns: PatternSet,
    },
}

/// Drives one scrape-or-train invocation:
/// resolve the domain, fetch the document, try extraction, and when no
/// patterns are stored let the operator train and save a pattern set.
///
/// # Example
///
/// ```no_run
/// use newsprint_domain::{Fetcher, Prompt};
/// use newsprint_store::PatternStore;
/// use newsprint_trainer::{TrainingCoordinator, TrainingOutcome};
/// use std::sync::Arc;
///
/// fn scrape(store: Arc<PatternStore>, fetcher: &impl Fetcher, prompt: &mut impl Prompt) {
///     let mut coordinator = TrainingCoordinator::new(store, fetcher, prompt);
///     match coordinator.run("https://www.example.com/story") {
///         Ok(TrainingOutcome::Extracted(fields)) => println!("{:?}", fields),
///         Ok(other) => println!("{:?}", other),
///         Err(e) => eprintln!("{}", e),
///     }
/// }
/// ```
pub struct TrainingCoordinator<'a, F: ?Sized, P: ?Sized> {
    engine: ExtractionEngine,
    fetcher: &'a F,
    prompt: &'a mut P,
    state: TrainingState,
}

impl<'a, F, P> TrainingCoordinator<'a, F, P>
where
    F: Fetcher + ?Sized,
    P: Prompt + ?Sized,
{
    /// Create a coordinator for one invocation
    pub fn new(store: Arc<PatternStore>, fetcher: &'a F, prompt: &'a mut P) -> Self {
        Self {
            engine: ExtractionEngine::new(store),
            fetcher,
            prompt,
            state: TrainingState::Start,
        }
    }

    /// Current state
    pub fn state(&self) -> TrainingState {
        self.state
    }

    fn store(&self) -> &PatternStore {
        self.engine.store()
    }

    fn transition(&mut self, to: TrainingState) {
        debug!("Training state: {} -> {}", self.state, to);
        self.state = to;
    }

    fn fetch(&self, url: &str) -> Result<(String, String), TrainError> {
        let domain = resolve_domain(url).map_err(|source| TrainError::Resolve {
            url: url.to_string(),
            source,
        })?;

        let raw = self.fetcher.fetch(url).map_err(|source| TrainError::Fetch {
            domain: domain.clone(),
            url: url.to_string(),
            source,
        })?;

        Ok((domain, raw))
    }

    /// Extract `url` with stored patterns, or offer to train when the domain
    /// has none.
    ///
    /// Only a missing pattern set is handled here; every other failure
    /// aborts the invocation.
    pub fn run(&mut self, url: &str) -> Result<TrainingOutcome, TrainError> {
        self.state = TrainingState::Start;
        let (domain, raw) = self.fetch(url)?;

        match self.engine.transform_for_domain(url, &raw) {
            Ok(fields) => {
                self.transition(TrainingState::Extracted);
                return Ok(TrainingOutcome::Extracted(fields));
            }
            Err(ExtractError::ScrapePatternNotDefined { .. }) => {
                self.transition(TrainingState::NoPattern);
            }
            Err(source) => {
                return Err(TrainError::Extract {
                    domain,
                    url: url.to_string(),
                    source,
                })
            }
        }

        info!("No scrape pattern defined for '{}'", domain);
        let message = format!(
            "No scrape pattern is defined for '{}'. Step through training now?",
            domain
        );
        let train = self
            .prompt
            .confirm(&message)
            .map_err(TrainError::prompt(&domain, "confirm training"))?;

        if !train {
            self.transition(TrainingState::Declined);
            return Ok(TrainingOutcome::Declined { domain });
        }

        self.train_and_save(domain, &raw)
    }

    /// Train `url`'s domain regardless of what is stored, then offer to save
    /// (and overwrite) the result
    pub fn retrain(&mut self, url: &str) -> Result<TrainingOutcome, TrainError> {
        self.state = TrainingState::Start;
        let (domain, raw) = self.fetch(url)?;
        self.transition(TrainingState::NoPattern);
        self.train_and_save(domain, &raw)
    }

    fn train_and_save(&mut self, domain: String, raw: &str) -> Result<TrainingOutcome, TrainError> {
        let patterns =
            PatternCandidateSelector::new(self.engine.store()).train(&domain, raw, &mut *self.prompt)?;
        self.transition(TrainingState::Trained);

        if patterns.is_empty() {
            self.transition(TrainingState::Untrained);
            return Ok(TrainingOutcome::Untrained { domain });
        }

        let save = self
            .prompt
            .confirm(&save_message(&domain, &patterns))
            .map_err(TrainError::prompt(&domain, "confirm save"))?;

        if !save {
            self.transition(TrainingState::Discarded);
            return Ok(TrainingOutcome::Discarded { domain, patterns });
        }

        let existing = self
            .store()
            .has_entry(&domain)
            .map_err(|source| TrainError::Store {
                domain: domain.clone(),
                source,
            })?;

        let overwrite = if existing {
            let message = format!("'{}' already has saved patterns. Overwrite them?", domain);
            self.prompt
                .confirm(&message)
                .map_err(TrainError::prompt(&domain, "confirm overwrite"))?
        } else {
            false
        };

        let outcome = self
            .store()
            .merge_and_persist(&domain, patterns, overwrite)
            .map_err(|source| TrainError::Store {
                domain: domain.clone(),
                source,
            })?;

        info!(
            "Saved training for '{}' ({})",
            domain,
            if outcome.was_written() { "written" } else { "kept existing" }
        );
        self.transition(TrainingState::Saved);
        Ok(TrainingOutcome::Saved { domain, outcome })
    }
}

fn save_message(domain: &str, patterns: &PatternSet) -> String {
    let missing = patterns.missing_fields();
    if missing.is_empty() {
        return format!("Save the trained patterns for '{}'?", domain);
    }

    let names = missing
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "The patterns for '{}' have nothing for: {}. Save them anyway?",
        domain, names
    )
}
