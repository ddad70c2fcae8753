//! Interactive terminal prompt used during training.

use colored::*;
use newsprint_domain::{
    Candidate, Field, FieldPattern, PatternChoice, PostProcess, Prompt, PromptError, Selector,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Longest preview shown next to a candidate
const PREVIEW_WIDTH: usize = 72;

/// Answer to the candidate menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    /// Zero-based candidate index
    Pick(usize),
    Custom,
    Skip,
}

/// Line-editor backed [`Prompt`].
///
/// Ctrl-D answers "no" (or skips the field); Ctrl-C aborts the session.
pub struct TerminalPrompt {
    editor: DefaultEditor,
    color_enabled: bool,
}

impl TerminalPrompt {
    /// Create a prompt on the controlling terminal.
    pub fn new(color_enabled: bool) -> Result<Self, PromptError> {
        let editor = DefaultEditor::new().map_err(readline_error)?;
        Ok(Self {
            editor,
            color_enabled,
        })
    }

    /// Read one line; `None` on end of input.
    fn read(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(readline_error(e)),
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color_enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Ask for a custom pattern; `None` when the operator backs out.
    fn read_custom_pattern(&mut self) -> Result<Option<FieldPattern>, PromptError> {
        loop {
            let Some(method) = self.read("method (css/xpath) > ")? else {
                return Ok(None);
            };
            let Some(pattern) = self.read("pattern > ")? else {
                return Ok(None);
            };

            let selector = match Selector::from_parts(&method, &pattern) {
                Ok(selector) => selector,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            let post_process = self.read_post_process()?;
            return Ok(Some(FieldPattern {
                selector,
                post_process,
            }));
        }
    }

    fn read_post_process(&mut self) -> Result<Option<PostProcess>, PromptError> {
        loop {
            let answer = self
                .read("post-process (none/squish/replace) [none] > ")?
                .unwrap_or_default();

            match answer.to_lowercase().as_str() {
                "" | "none" | "n" => return Ok(None),
                "squish" | "s" => return Ok(Some(PostProcess::Squish)),
                "replace" | "r" => {
                    let Some(find) = self.read("find (regex) > ")? else {
                        return Ok(None);
                    };
                    let with = self.read("replace with > ")?.unwrap_or_default();
                    return Ok(Some(PostProcess::Replace { find, with }));
                }
                other => println!("Unknown post-process '{}'", other),
            }
        }
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        println!();
        println!("{}", message);

        loop {
            let Some(answer) = self.read("(y/n) > ")? else {
                return Ok(false);
            };
            match parse_yes_no(&answer) {
                Some(answer) => return Ok(answer),
                None => println!("Please answer y or n"),
            }
        }
    }

    fn select_or_edit_pattern(
        &mut self,
        field: Field,
        candidates: &[Candidate],
    ) -> Result<PatternChoice, PromptError> {
        println!();
        println!("{}", self.heading(&format!("== {} ==", field)));
        for (i, candidate) in candidates.iter().enumerate() {
            println!("  {}) [{}] {}", i + 1, candidate.label, candidate.pattern);
            let preview = truncate(&candidate.preview.to_string(), PREVIEW_WIDTH);
            println!("       {}", self.dim(&preview));
        }
        println!("  c) custom pattern");
        println!("  s) skip {}", field);

        loop {
            let Some(answer) = self.read(&format!("{} > ", field))? else {
                return Ok(PatternChoice::Abandon);
            };

            match parse_selection(&answer, candidates.len()) {
                Some(Selection::Pick(index)) => {
                    return Ok(PatternChoice::Use(candidates[index].pattern.clone()))
                }
                Some(Selection::Skip) => return Ok(PatternChoice::Abandon),
                Some(Selection::Custom) => {
                    if let Some(pattern) = self.read_custom_pattern()? {
                        return Ok(PatternChoice::Use(pattern));
                    }
                }
                None => println!("Enter 1-{}, c or s", candidates.len()),
            }
        }
    }
}

fn readline_error(e: ReadlineError) -> PromptError {
    match e {
        ReadlineError::Interrupted => PromptError::Interrupted,
        ReadlineError::Io(e) => PromptError::Io(e),
        other => PromptError::Editor(other.to_string()),
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

fn parse_selection(answer: &str, count: usize) -> Option<Selection> {
    match answer.trim().to_lowercase().as_str() {
        "c" | "custom" => Some(Selection::Custom),
        "s" | "skip" => Some(Selection::Skip),
        other => match other.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Some(Selection::Pick(n - 1)),
            _ => None,
        },
    }
}

fn truncate(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= width {
        return flat;
    }
    let cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}
