//! Inference request dispatch

mod error;
mod hf_inference;
#[cfg(any(test, feature = "test-sim"))]
pub mod sim;
mod types;

pub use error::LlmError;
pub use hf_inference::{HfInferenceProvider, DEFAULT_BASE_URL, FAILURE_PREFIX};
pub use types::*;

use async_trait::async_trait;

/// Something that can turn a prompt into an `InferenceResult`
///
/// Implementations never fail: transport problems are reported as
/// `InferenceResult::Failure` so a session or batch loop keeps running.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    /// Resolve one prompt. Exactly one attempt, no retries.
    async fn dispatch(&self, prompt: &str) -> InferenceResult;
}
