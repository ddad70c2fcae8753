//! Training flow tests with a scripted fetcher and prompt

use crate::{PatternCandidateSelector, TrainError, TrainingCoordinator, TrainingOutcome, TrainingState};
use newsprint_domain::{
    Candidate, FetchError, Fetcher, Field, FieldPattern, PatternChoice, PatternSet, Preview,
    Prompt, PromptError,
};
use newsprint_store::{
    MergeOutcome, PatternDocument, PatternStore, PatternsSource, StopwordsSource, StoreConfig,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::sync::Arc;

const PATTERNS: &str = r#"
presets:
  title:
    site_headline:
      method: css
      pattern: .t
domains:
  google.ca:
    title:
      method: css
      pattern: h1
"#;

const PAGE: &str = r#"<html>
<head><meta property="og:title" content="OG headline"></head>
<body>
  <h1>Big news</h1>
  <div class="t">Site headline</div>
  <article><p>Body text.</p></article>
</body>
</html>"#;

struct MockFetcher {
    body: Option<String>,
    requested: RefCell<Vec<String>>,
}

impl MockFetcher {
    fn serving(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            requested: RefCell::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            body: None,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        self.body.clone().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 503,
        })
    }
}

/// Answers prompts from queues; unanswered selections abandon the field
#[derive(Default)]
struct ScriptedPrompt {
    confirms: VecDeque<bool>,
    choices: VecDeque<PatternChoice>,
    interrupt: bool,
    asked: Vec<String>,
    offered: Vec<(Field, Vec<Candidate>)>,
}

impl ScriptedPrompt {
    fn confirming(answers: &[bool]) -> Self {
        Self {
            confirms: answers.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn choosing(mut self, choices: Vec<PatternChoice>) -> Self {
        self.choices = choices.into();
        self
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        if self.interrupt {
            return Err(PromptError::Interrupted);
        }
        self.asked.push(message.to_string());
        Ok(self
            .confirms
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected confirm: {}", message)))
    }

    fn select_or_edit_pattern(
        &mut self,
        field: Field,
        candidates: &[Candidate],
    ) -> Result<PatternChoice, PromptError> {
        self.offered.push((field, candidates.to_vec()));
        Ok(self.choices.pop_front().unwrap_or(PatternChoice::Abandon))
    }
}

fn store() -> Arc<PatternStore> {
    Arc::new(
        PatternStore::new(StoreConfig::new(
            PatternsSource::supplier(|| Ok(PatternDocument::from_yaml_str(PATTERNS)?)),
            StopwordsSource::empty(),
        ))
        .unwrap(),
    )
}

/// Abandon every field but the title, which gets `pattern`
fn title_choice(pattern: &str) -> Vec<PatternChoice> {
    Field::ALL
        .into_iter()
        .map(|field| match field {
            Field::Title => PatternChoice::Use(FieldPattern::css(pattern)),
            _ => PatternChoice::Abandon,
        })
        .collect()
}

fn title_only(pattern: &str) -> PatternSet {
    PatternSet::new().with(Field::Title, FieldPattern::css(pattern))
}

#[test]
fn test_known_domain_extracts_without_prompting() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt::default();

    let mut coordinator = TrainingCoordinator::new(store, &fetcher, &mut prompt);
    let outcome = coordinator.run("https://news.google.ca/story").unwrap();

    assert_eq!(coordinator.state(), TrainingState::Extracted);
    match outcome {
        TrainingOutcome::Extracted(fields) => assert_eq!(fields.get(Field::Title), "Big news"),
        other => panic!("Expected Extracted, got {:?}", other),
    }
    assert!(prompt.asked.is_empty());
    assert!(prompt.offered.is_empty());
    assert_eq!(fetcher.requested.borrow().as_slice(), ["https://news.google.ca/story"]);
}

#[test]
fn test_declining_training_skips_selector() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt::confirming(&[false]);

    let mut coordinator = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt);
    let outcome = coordinator.run("http://new-site.com/a").unwrap();

    assert_eq!(coordinator.state(), TrainingState::Declined);
    assert_eq!(
        outcome,
        TrainingOutcome::Declined {
            domain: "new-site.com".to_string()
        }
    );
    assert!(prompt.offered.is_empty());
    assert!(prompt.asked[0].contains("new-site.com"));
    assert!(!store.contains("new-site.com"));
}

#[test]
fn test_empty_training_has_no_save_prompt() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt::confirming(&[true]);

    let mut coordinator = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt);
    let outcome = coordinator.run("http://new-site.com/a").unwrap();

    assert_eq!(coordinator.state(), TrainingState::Untrained);
    assert!(matches!(outcome, TrainingOutcome::Untrained { .. }));
    assert_eq!(prompt.asked.len(), 1);
    assert_eq!(prompt.offered.len(), Field::ALL.len());
    assert!(!store.contains("new-site.com"));
}

#[test]
fn test_train_and_decline_save() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    // train? yes, use .t? yes, save? no
    let mut prompt = ScriptedPrompt::confirming(&[true, true, false]).choosing(title_choice(".t"));

    let mut coordinator = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt);
    let outcome = coordinator.run("http://new-site.com/a").unwrap();

    assert_eq!(coordinator.state(), TrainingState::Discarded);
    assert_eq!(
        outcome,
        TrainingOutcome::Discarded {
            domain: "new-site.com".to_string(),
            patterns: title_only(".t"),
        }
    );
    assert!(!store.contains("new-site.com"));
}

#[test]
fn test_train_and_save_new_domain() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    // train? yes, use .t? yes, save? yes (no overwrite question for a new domain)
    let mut prompt = ScriptedPrompt::confirming(&[true, true, true]).choosing(title_choice(".t"));

    let mut coordinator = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt);
    let outcome = coordinator.run("http://new-site.com/a").unwrap();

    assert_eq!(coordinator.state(), TrainingState::Saved);
    assert_eq!(
        outcome,
        TrainingOutcome::Saved {
            domain: "new-site.com".to_string(),
            outcome: MergeOutcome::Inserted(title_only(".t")),
        }
    );
    assert_eq!(store.lookup("new-site.com"), Some(title_only(".t")));
    assert_eq!(store.lookup("google.ca"), Some(title_only("h1")));

    // the preview of the chosen pattern was shown before accepting it
    assert!(prompt.asked[1].contains("Site headline"));
    // the save prompt names what is missing
    assert!(prompt.asked[2].contains("body"));
}

#[test]
fn test_rejected_preview_loops_on_the_same_field() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt::confirming(&[false, true, true]).choosing(vec![
        PatternChoice::Use(FieldPattern::css("h2")),
        PatternChoice::Use(FieldPattern::css("article p")),
    ]);

    let mut coordinator = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt);
    let outcome = coordinator.retrain("new-site.com/a").unwrap();

    assert!(prompt.asked[0].contains("(no match)"));
    assert_eq!(prompt.offered[0].0, Field::Body);
    assert_eq!(prompt.offered[1].0, Field::Body);
    assert_eq!(prompt.offered[2].0, Field::Description);
    assert_eq!(
        outcome,
        TrainingOutcome::Saved {
            domain: "new-site.com".to_string(),
            outcome: MergeOutcome::Inserted(
                PatternSet::new().with(Field::Body, FieldPattern::css("article p"))
            ),
        }
    );
}

#[test]
fn test_retrain_existing_domain_with_overwrite() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    // use .t? yes, save? yes, overwrite? yes
    let mut prompt = ScriptedPrompt::confirming(&[true, true, true]).choosing(title_choice(".t"));

    let mut coordinator = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt);
    let outcome = coordinator.retrain("https://www.google.ca/x").unwrap();

    assert_eq!(
        outcome,
        TrainingOutcome::Saved {
            domain: "google.ca".to_string(),
            outcome: MergeOutcome::Replaced(title_only(".t")),
        }
    );
    assert!(prompt.asked[2].contains("Overwrite"));
    assert_eq!(store.lookup("google.ca"), Some(title_only(".t")));
}

#[test]
fn test_retrain_existing_domain_without_overwrite_keeps_original() {
    let store = store();
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt::confirming(&[true, true, false]).choosing(title_choice(".t"));

    let mut coordinator = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt);
    let outcome = coordinator.retrain("https://www.google.ca/x").unwrap();

    assert_eq!(
        outcome,
        TrainingOutcome::Saved {
            domain: "google.ca".to_string(),
            outcome: MergeOutcome::KeptExisting(title_only("h1")),
        }
    );
    assert_eq!(store.lookup("google.ca"), Some(title_only("h1")));
}

#[test]
fn test_fetch_failure_propagates_unchanged() {
    let fetcher = MockFetcher::failing();
    let mut prompt = ScriptedPrompt::default();

    let mut coordinator = TrainingCoordinator::new(store(), &fetcher, &mut prompt);
    let err = coordinator.run("http://new-site.com/a").unwrap_err();

    assert_eq!(coordinator.state(), TrainingState::Start);
    assert_eq!(err.domain(), "new-site.com");
    match err {
        TrainError::Fetch {
            source: FetchError::Status { status, .. },
            ..
        } => assert_eq!(status, 503),
        other => panic!("Expected Fetch, got {:?}", other),
    }
}

#[test]
fn test_unresolvable_url_is_not_fetched() {
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt::default();

    let mut coordinator = TrainingCoordinator::new(store(), &fetcher, &mut prompt);
    assert!(matches!(
        coordinator.run("http://"),
        Err(TrainError::Resolve { .. })
    ));
    assert!(fetcher.requested.borrow().is_empty());
}

#[test]
fn test_interrupted_prompt_aborts() {
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt {
        interrupt: true,
        ..Default::default()
    };

    let mut coordinator = TrainingCoordinator::new(store(), &fetcher, &mut prompt);
    match coordinator.run("http://new-site.com/a") {
        Err(TrainError::Prompt { domain, step, source: PromptError::Interrupted }) => {
            assert_eq!(domain, "new-site.com");
            assert_eq!(step, "confirm training");
        }
        other => panic!("Expected Prompt error, got {:?}", other),
    }
    assert_eq!(coordinator.state(), TrainingState::NoPattern);
}

#[test]
fn test_candidates_list_presets_before_builtins() {
    let store = store();
    let selector = PatternCandidateSelector::new(&store);

    let candidates = selector.candidates(Field::Title, PAGE);
    let labels: Vec<_> = candidates.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["site_headline", "og:title", "h1", "title"]);

    assert_eq!(candidates[0].preview, Preview::Text("Site headline".to_string()));
    assert_eq!(candidates[1].preview, Preview::Text("OG headline".to_string()));
    assert_eq!(candidates[3].preview, Preview::NoMatch);
}

#[test]
fn test_trained_patterns_persist_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let patterns = dir.path().join("article_scrape_patterns.yml");
    let stopwords = dir.path().join("stopwords.yml");
    fs::write(&patterns, PATTERNS).unwrap();
    fs::write(&stopwords, "- the\n").unwrap();

    let store = Arc::new(PatternStore::from_paths(&patterns, &stopwords).unwrap());
    let fetcher = MockFetcher::serving(PAGE);
    let mut prompt = ScriptedPrompt::confirming(&[true, true, true]).choosing(title_choice(".t"));

    TrainingCoordinator::new(store, &fetcher, &mut prompt)
        .run("http://new-site.com/a")
        .unwrap();

    let reloaded = PatternStore::from_paths(&patterns, &stopwords).unwrap();
    assert_eq!(reloaded.lookup("new-site.com"), Some(title_only(".t")));
    assert_eq!(reloaded.lookup("google.ca"), Some(title_only("h1")));
    assert_eq!(reloaded.presets(Field::Title).len(), 1);
}

#[test]
fn test_overwrite_is_asked_for_domain_saved_after_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let patterns = dir.path().join("article_scrape_patterns.yml");
    let stopwords = dir.path().join("stopwords.yml");
    fs::write(&patterns, PATTERNS).unwrap();
    fs::write(&stopwords, "- the\n").unwrap();

    let store = Arc::new(PatternStore::from_paths(&patterns, &stopwords).unwrap());

    // another trainer saves new-site.com after this store loaded
    let mut raw = fs::read_to_string(&patterns).unwrap();
    raw.push_str("  new-site.com:\n    title:\n      method: css\n      pattern: h1\n");
    fs::write(&patterns, raw).unwrap();

    let fetcher = MockFetcher::serving(PAGE);
    // train? yes, use .t? yes, save? yes, overwrite? no
    let mut prompt =
        ScriptedPrompt::confirming(&[true, true, true, false]).choosing(title_choice(".t"));

    let outcome = TrainingCoordinator::new(store.clone(), &fetcher, &mut prompt)
        .run("http://new-site.com/a")
        .unwrap();

    assert!(prompt.asked[3].contains("Overwrite"));
    assert_eq!(
        outcome,
        TrainingOutcome::Saved {
            domain: "new-site.com".to_string(),
            outcome: MergeOutcome::KeptExisting(title_only("h1")),
        }
    );

    let reloaded = PatternStore::from_paths(&patterns, &stopwords).unwrap();
    assert_eq!(reloaded.lookup("new-site.com"), Some(title_only("h1")));
}
