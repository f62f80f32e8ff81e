//! Interactive session loop
//!
//! Two states: awaiting input, and terminated. Each non-exit line becomes
//! one exchange with the backend; the exit word (any case) or end of input
//! terminates. The loop owns its `History` and replaces it after every
//! exchange.

use super::History;
use crate::llm::InferenceBackend;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Sentinel that ends a session, compared case-insensitively
pub const EXIT_WORD: &str = "exit";

/// How prompts are built for each exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// The raw input line is the whole prompt; nothing is remembered
    OneOff,
    /// The trailing `window` exchanges are rendered ahead of each input
    Contextual { window: usize },
}

impl SessionMode {
    pub fn banner(&self) -> &'static str {
        match self {
            SessionMode::OneOff => "Welcome to the Simple LLM Chat! Type 'exit' to quit.",
            SessionMode::Contextual { .. } => {
                "Welcome to the Contextual LLM Chat! Type 'exit' to quit."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    AwaitingInput,
    Terminated,
}

pub struct Session<'a> {
    backend: &'a dyn InferenceBackend,
    mode: SessionMode,
    exit_word: String,
}

impl<'a> Session<'a> {
    pub fn new(backend: &'a dyn InferenceBackend, mode: SessionMode) -> Self {
        Self {
            backend,
            mode,
            exit_word: EXIT_WORD.to_string(),
        }
    }

    pub fn with_exit_word(mut self, word: &str) -> Self {
        self.exit_word = word.to_string();
        self
    }

    fn is_exit(&self, line: &str) -> bool {
        line.to_lowercase() == self.exit_word.to_lowercase()
    }

    /// Resolve one input line against the current history.
    ///
    /// Returns the next history and the text shown to the operator. On
    /// failure the `[ERROR] ...` text is what gets remembered for the turn.
    pub async fn exchange(&self, history: History, line: &str) -> (History, String) {
        match self.mode {
            SessionMode::OneOff => {
                let text = self.backend.dispatch(line).await.into_text();
                (history, text)
            }
            SessionMode::Contextual { window } => {
                let prompt = history.render(line, window);
                let text = self.backend.dispatch(&prompt).await.into_text();
                let history = history.append(line, text.as_str());
                (history, text)
            }
        }
    }

    /// Drive the loop until the exit word or end of input.
    ///
    /// Only I/O on `input`/`output` can fail; backend failures are shown
    /// and the loop keeps going. Returns the final history.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
    ) -> Result<History> {
        tracing::debug!(
            backend = self.backend.name(),
            model = self.backend.model(),
            mode = ?self.mode,
            "Starting chat session"
        );

        writeln!(output, "{}", self.mode.banner())?;

        let mut history = History::new();
        let mut state = SessionState::AwaitingInput;
        let mut line = String::new();

        while state == SessionState::AwaitingInput {
            write!(output, "\nYou: ")?;
            output.flush()?;

            line.clear();
            let read = input
                .read_line(&mut line)
                .context("Failed to read operator input")?;
            let text = line.strip_suffix('\n').unwrap_or(&line);
            let text = text.strip_suffix('\r').unwrap_or(text);

            if read == 0 || self.is_exit(text) {
                writeln!(output, "Goodbye!")?;
                state = SessionState::Terminated;
                continue;
            }

            let (next, response) = self.exchange(history, text).await;
            history = next;

            match self.mode {
                SessionMode::OneOff => writeln!(output, "LLM: {}", response)?,
                SessionMode::Contextual { .. } => writeln!(output, "LLM: {}\n", response)?,
            }
        }

        tracing::debug!(turns = history.len(), "Chat session ended");
        Ok(history)
    }
}
