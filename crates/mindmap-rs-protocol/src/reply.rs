//! Reply shape returned to whoever fronts the pipeline.

use serde::{Deserialize, Serialize};

/// Stable machine-readable failure code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No file part, or an empty one.
    MissingInput,
    /// Upload bytes were not valid UTF-8.
    InvalidEncoding,
    /// Backend answered with zero candidates.
    EmptyGeneration,
    /// Backend raised or returned an error.
    BackendFailure,
    /// Strict mode rejected the generated payload.
    SchemaViolation,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingInput => "missing_input",
            ErrorCode::InvalidEncoding => "invalid_encoding",
            ErrorCode::EmptyGeneration => "empty_generation",
            ErrorCode::BackendFailure => "backend_failure",
            ErrorCode::SchemaViolation => "schema_violation",
        }
    }

    /// Whether the failure was caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorCode::MissingInput | ErrorCode::InvalidEncoding)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-field success or failure reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum InferenceReply {
    /// Sanitized payload, expected to parse as a character graph.
    Success { response: String },
    /// Human readable failure plus its code.
    Failure { error: String, code: ErrorCode },
}

impl InferenceReply {
    pub fn success(response: impl Into<String>) -> Self {
        InferenceReply::Success {
            response: response.into(),
        }
    }

    pub fn failure(error: impl Into<String>, code: ErrorCode) -> Self {
        InferenceReply::Failure {
            error: error.into(),
            code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InferenceReply::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn success_reply_has_single_response_field() {
        let reply = InferenceReply::success("{\"a\":1}");
        assert_eq!(
            serde_json::to_value(&reply).expect("serialize"),
            json!({ "response": "{\"a\":1}" })
        );
    }

    #[test]
    fn failure_reply_carries_message_and_code() {
        let reply = InferenceReply::failure("no file selected", ErrorCode::MissingInput);
        assert_eq!(
            serde_json::to_value(&reply).expect("serialize"),
            json!({ "error": "no file selected", "code": "missing_input" })
        );
        assert!(!reply.is_success());
    }

    #[test]
    fn only_request_errors_are_client_errors() {
        assert!(ErrorCode::MissingInput.is_client_error());
        assert!(ErrorCode::InvalidEncoding.is_client_error());
        assert!(!ErrorCode::EmptyGeneration.is_client_error());
        assert!(!ErrorCode::BackendFailure.is_client_error());
        assert!(!ErrorCode::SchemaViolation.is_client_error());
    }
}
