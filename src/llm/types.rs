//! Shared types for inference requests and results

use serde::Serialize;
use serde_json::Value;

/// Prefix shown to the operator (and stored in history) for failed requests
pub const ERROR_PREFIX: &str = "[ERROR] ";

/// One outbound request: who to ask, with which credentials, and what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub model: String,
    pub api_key: Option<String>,
    pub prompt: String,
}

impl InferenceRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            prompt: prompt.into(),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// The bearer token to send, if any. An empty key counts as absent.
    pub fn bearer_token(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// Wire payload: the prompt is the sole field
#[derive(Debug, Serialize)]
pub(crate) struct InferencePayload<'a> {
    pub inputs: &'a str,
}

/// Outcome of a single dispatch. Exactly one of the two, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceResult {
    Success(String),
    Failure(String),
}

impl InferenceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InferenceResult::Success(_))
    }

    /// Text as the operator sees it. Failures carry the `[ERROR] ` prefix.
    pub fn text(&self) -> String {
        match self {
            InferenceResult::Success(text) => text.clone(),
            InferenceResult::Failure(message) => format!("{}{}", ERROR_PREFIX, message),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            InferenceResult::Success(text) => text,
            InferenceResult::Failure(message) => format!("{}{}", ERROR_PREFIX, message),
        }
    }
}

/// How generated text is post-processed before it reaches the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPolicy {
    /// Strip leading/trailing whitespace (contextual sessions)
    Trim,
    /// Pass text through untouched (one-off sessions and batch runs)
    #[default]
    Verbatim,
}

impl TextPolicy {
    pub fn apply(self, text: &str) -> String {
        match self {
            TextPolicy::Trim => text.trim().to_string(),
            TextPolicy::Verbatim => text.to_string(),
        }
    }
}

/// The closed set of response bodies the endpoint can return
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// `[{"generated_text": "..."}, ...]`
    Sequence(String),
    /// `{"generated_text": "..."}`
    Single(String),
    /// Anything else that parsed as JSON; shown whole so nothing is dropped
    Unrecognized(Value),
}

impl ResponseShape {
    pub fn classify(body: Value) -> Self {
        match &body {
            Value::Array(items) => {
                if let Some(text) = items.first().and_then(generated_text) {
                    return ResponseShape::Sequence(text.to_string());
                }
            }
            Value::Object(_) => {
                if let Some(text) = generated_text(&body) {
                    return ResponseShape::Single(text.to_string());
                }
            }
            _ => {}
        }
        ResponseShape::Unrecognized(body)
    }

    /// Resolve to displayable text. The policy only applies to generated text.
    pub fn into_text(self, policy: TextPolicy) -> String {
        match self {
            ResponseShape::Sequence(text) | ResponseShape::Single(text) => policy.apply(&text),
            ResponseShape::Unrecognized(body) => body.to_string(),
        }
    }
}

fn generated_text(value: &Value) -> Option<&str> {
    value.get("generated_text").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_sequence_uses_first_element() {
        let body = json!([{"generated_text": "first"}, {"generated_text": "second"}]);
        assert_eq!(
            ResponseShape::classify(body),
            ResponseShape::Sequence("first".to_string())
        );
    }

    #[test]
    fn test_classify_single_object() {
        let body = json!({"generated_text": "  hi  "});
        let shape = ResponseShape::classify(body);
        assert_eq!(shape, ResponseShape::Single("  hi  ".to_string()));
        assert_eq!(shape.clone().into_text(TextPolicy::Trim), "hi");
        assert_eq!(shape.into_text(TextPolicy::Verbatim), "  hi  ");
    }

    #[test]
    fn test_classify_unrecognized_shapes() {
        for body in [
            json!([]),
            json!([{"summary_text": "x"}]),
            json!({"error": "Model is loading", "estimated_time": 20.0}),
            json!({"generated_text": 42}),
            json!("bare string"),
            json!(null),
        ] {
            assert!(
                matches!(
                    ResponseShape::classify(body.clone()),
                    ResponseShape::Unrecognized(_)
                ),
                "{} should be unrecognized",
                body
            );
        }
    }

    #[test]
    fn test_unrecognized_is_stringified_whole() {
        let body = json!({"error": "oops"});
        let text = ResponseShape::classify(body).into_text(TextPolicy::Trim);
        assert_eq!(text, r#"{"error":"oops"}"#);
    }

    #[test]
    fn test_failure_text_is_prefixed() {
        let result = InferenceResult::Failure("API request failed: boom".to_string());
        assert!(!result.is_success());
        assert_eq!(result.text(), "[ERROR] API request failed: boom");
        assert_eq!(result.into_text(), "[ERROR] API request failed: boom");
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let request = InferenceRequest::new("m", "p").with_api_key(Some(String::new()));
        assert_eq!(request.bearer_token(), None);

        let request = InferenceRequest::new("m", "p").with_api_key(Some("hf_x".to_string()));
        assert_eq!(request.bearer_token(), Some("hf_x"));
    }
}
