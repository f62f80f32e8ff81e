//! Hosted inference API provider
//!
//! One POST per prompt to `<base_url>/<model>` with `{"inputs": prompt}`.
//! Every outcome, including transport failures, comes back as an
//! `InferenceResult`; nothing here returns an error to the caller.
//!
//! SECURITY: the API key is only sent to the configured base URL.

use super::{
    types::InferencePayload, InferenceBackend, InferenceRequest, InferenceResult, LlmError,
    ResponseShape, TextPolicy,
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Official hosted inference endpoint
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Prefix of every failure message
pub const FAILURE_PREFIX: &str = "API request failed: ";

pub struct HfInferenceProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    text_policy: TextPolicy,
}

impl HfInferenceProvider {
    /// Create a provider for `model` against the official endpoint.
    ///
    /// `timeout` bounds every request; callers pick it per session mode.
    /// The identifier is not validated; a bad one surfaces as the
    /// endpoint's own error response.
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: None,
            timeout,
            text_policy: TextPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_text_policy(mut self, policy: TextPolicy) -> Self {
        self.text_policy = policy;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn text_policy(&self) -> TextPolicy {
        self.text_policy
    }

    /// Address for a model: base URL + "/" + identifier
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    /// Send one request and fold every outcome into an `InferenceResult`
    pub async fn send(&self, request: &InferenceRequest) -> InferenceResult {
        tracing::debug!(
            target: "llm",
            model = request.model,
            prompt_len = request.prompt.len(),
            authenticated = request.bearer_token().is_some(),
            timeout_ms = self.timeout.as_millis() as u64,
            "Sending inference request"
        );

        match self.try_send(request).await {
            Ok(shape) => {
                if let ResponseShape::Unrecognized(_) = shape {
                    tracing::debug!(target: "llm", "Unrecognized response shape, showing raw body");
                }
                let text = shape.into_text(self.text_policy);
                tracing::debug!(target: "llm", response_len = text.len(), "Inference succeeded");
                InferenceResult::Success(text)
            }
            Err(e) => {
                tracing::warn!(
                    target: "llm",
                    model = request.model,
                    "Inference request failed: {}",
                    e
                );
                InferenceResult::Failure(format!("{}{}", FAILURE_PREFIX, e))
            }
        }
    }

    async fn try_send(&self, request: &InferenceRequest) -> Result<ResponseShape, LlmError> {
        let mut http_req = self
            .client
            .post(self.endpoint(&request.model))
            .timeout(self.timeout)
            .json(&InferencePayload {
                inputs: &request.prompt,
            });

        if let Some(token) = request.bearer_token() {
            http_req = http_req.bearer_auth(token);
        }

        let response = http_req.send().await.map_err(LlmError::from_network_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_http_status(status, error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(LlmError::from_network_error)?;

        Ok(ResponseShape::classify(body))
    }
}

#[async_trait]
impl InferenceBackend for HfInferenceProvider {
    fn name(&self) -> &str {
        "hf-inference"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn dispatch(&self, prompt: &str) -> InferenceResult {
        let request =
            InferenceRequest::new(self.model.as_str(), prompt).with_api_key(self.api_key.clone());
        self.send(&request).await
    }
}
