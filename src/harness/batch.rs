//! Batch runner: one-shot questions, no history

use crate::llm::InferenceBackend;
use anyhow::Result;
use std::fmt;
use std::io::Write;

/// Fixed healthcare question set used by the `test` command
pub const DEFAULT_QUESTIONS: [&str; 5] = [
    "What are the symptoms of gout?",
    "How is gout diagnosed?",
    "What treatments are available for gout?",
    "What lifestyle changes can help manage gout?",
    "What foods should be avoided with gout?",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub question: String,
    pub response: String,
}

/// Question -> response mapping in first-seen order
///
/// Inserting a question that is already present replaces its response in
/// place, so each distinct question appears once and holds the last result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    entries: Vec<ReportEntry>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question: impl Into<String>, response: impl Into<String>) {
        let question = question.into();
        let response = response.into();
        match self.entries.iter_mut().find(|e| e.question == question) {
            Some(entry) => entry.response = response,
            None => self.entries.push(ReportEntry { question, response }),
        }
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.question == question)
            .map(|e| e.response.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{} => {}", entry.question, entry.response)?;
        }
        Ok(())
    }
}

/// Dispatch every question on its own, in order, and collect the results.
///
/// Failures are recorded as their `[ERROR] ...` text and the run moves on
/// to the next question. Only writing progress lines can fail.
pub async fn run_batch<S: AsRef<str>, W: Write>(
    backend: &dyn InferenceBackend,
    questions: &[S],
    mut progress: W,
) -> Result<BatchReport> {
    tracing::info!(
        model = backend.model(),
        questions = questions.len(),
        "Starting batch run"
    );

    let mut report = BatchReport::new();
    for question in questions {
        let question = question.as_ref();
        writeln!(progress, "Testing question: {}", question)?;

        let result = backend.dispatch(question).await;
        if !result.is_success() {
            tracing::warn!(question, "Batch question failed");
        }
        report.insert(question, result.into_text());
    }

    tracing::debug!(entries = report.len(), "Batch run finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{sim::SimBackend, InferenceResult};

    #[tokio::test]
    async fn test_questions_are_sent_raw_and_in_order() {
        let backend = SimBackend::replying(["r1", "r2", "r3", "r4", "r5"]);
        let mut progress = Vec::new();

        let report = run_batch(&backend, &DEFAULT_QUESTIONS, &mut progress)
            .await
            .unwrap();

        assert_eq!(backend.prompts(), DEFAULT_QUESTIONS.map(String::from).to_vec());
        assert_eq!(report.len(), 5);
        assert_eq!(report.get("How is gout diagnosed?"), Some("r2"));

        let progress = String::from_utf8(progress).unwrap();
        assert!(progress.starts_with("Testing question: What are the symptoms of gout?\n"));
        assert_eq!(progress.lines().count(), 5);
    }

    #[tokio::test]
    async fn test_duplicate_question_keeps_last_result() {
        let backend = SimBackend::replying(["r1", "r2"]);

        let report = run_batch(&backend, &["A", "A"], std::io::sink())
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.get("A"), Some("r2"));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_run() {
        let backend = SimBackend::new([
            InferenceResult::Failure("API request failed: Network error: refused".to_string()),
            InferenceResult::Success("fine".to_string()),
        ]);

        let report = run_batch(&backend, &["q1", "q2"], std::io::sink())
            .await
            .unwrap();

        assert_eq!(
            report.get("q1"),
            Some("[ERROR] API request failed: Network error: refused")
        );
        assert_eq!(report.get("q2"), Some("fine"));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut report = BatchReport::new();
        report.insert("a", "1");
        report.insert("b", "2");
        report.insert("a", "3");

        let questions: Vec<&str> = report.entries().iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["a", "b"]);
        assert_eq!(report.get("a"), Some("3"));
        assert_eq!(report.to_string(), "a => 3\nb => 2\n");
    }
}
