//! Scripted inference backend for tests
//!
//! Replies from a queue of canned results and records every prompt it was
//! asked to resolve, so tests can assert exactly what would have gone over
//! the wire. When the queue runs dry it answers with a failure, the same way
//! an unreachable endpoint would.

use super::{InferenceBackend, InferenceResult, FAILURE_PREFIX};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct SimBackend {
    model: String,
    replies: Mutex<VecDeque<InferenceResult>>,
    prompts: Mutex<Vec<String>>,
}

impl SimBackend {
    pub fn new(replies: impl IntoIterator<Item = InferenceResult>) -> Self {
        Self {
            model: "sim/echo".to_string(),
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Backend whose every reply is a success with the given texts, in order
    pub fn replying<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            texts
                .into_iter()
                .map(|t| InferenceResult::Success(t.into())),
        )
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl InferenceBackend for SimBackend {
    fn name(&self) -> &str {
        "sim"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn dispatch(&self, prompt: &str) -> InferenceResult {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| {
                InferenceResult::Failure(format!("{}no scripted reply left", FAILURE_PREFIX))
            })
    }
}
