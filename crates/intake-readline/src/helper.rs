use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use intake_core::triage::is_emergency;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Slash commands understood by the REPL.
pub const COMMANDS: &[&str] = &["/reset", "/summary", "/health", "/help"];

/// Bare words that end the session.
pub const EXIT_WORDS: &[&str] = &["quit", "exit"];

/// Accepted answers to the reset confirmation.
pub const CONFIRM_ANSWERS: &[&str] = &["yes", "no"];

/// What the editor is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// A chat message, slash command or exit word.
    Chat,
    /// The answer to the reset confirmation.
    Confirm,
}

/// rustyline helper for the intake prompt.
///
/// In chat mode it completes slash commands and exit words and renders
/// emergency phrasing in alert style while it is typed. In confirm mode it
/// only offers `yes` and `no`.
#[derive(Clone)]
pub struct CliHelper {
    mode: InputMode,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            mode: InputMode::Chat,
        }
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    fn candidates(&self, line: &str) -> Vec<&'static str> {
        let words: &[&'static str] = match self.mode {
            InputMode::Chat if line.starts_with('/') => COMMANDS,
            InputMode::Chat => EXIT_WORDS,
            InputMode::Confirm => CONFIRM_ANSWERS,
        };
        if line.is_empty() && self.mode == InputMode::Chat {
            return Vec::new();
        }

        let lowered = line.to_lowercase();
        words
            .iter()
            .copied()
            .filter(|word| word.starts_with(&lowered))
            .collect()
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .candidates(&line[..pos])
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match self.mode {
            InputMode::Chat if line.starts_with('/') => Owned(line.bright_cyan().to_string()),
            InputMode::Chat if is_emergency(line) => Owned(line.bright_red().bold().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        // Exit words complete on Tab only.
        let hintable = match self.mode {
            InputMode::Chat => line.starts_with('/') && !line.contains(' '),
            InputMode::Confirm => !line.is_empty(),
        };
        if !hintable {
            return None;
        }

        self.candidates(line)
            .into_iter()
            .find(|word| word.len() > line.len())
            .map(|word| word[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}
