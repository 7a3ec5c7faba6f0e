//! Error types for the inference pipeline.

use crate::schema::SchemaError;
use mindmap_rs_protocol::{ErrorCode, InferenceReply};
use thiserror::Error;

/// Failures of a single inference request.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No file was supplied, or it had no name or no content.
    #[error("no file provided: the request must carry a named, non-empty file")]
    MissingInput,
    /// Uploaded bytes are not valid UTF-8.
    #[error("file is not valid UTF-8 text: {0}")]
    InvalidEncoding(String),
    /// Backend answered without any candidate completion.
    #[error("model backend returned no completions")]
    EmptyGeneration,
    /// Backend failed; the message is kept verbatim.
    #[error("{0}")]
    BackendFailure(String),
    /// Strict validation rejected the generated payload.
    #[error("generated payload violates the character graph schema: {0}")]
    SchemaViolation(String),
}

impl InferenceError {
    /// Stable code for callers that need to branch on the failure kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            InferenceError::MissingInput => ErrorCode::MissingInput,
            InferenceError::InvalidEncoding(_) => ErrorCode::InvalidEncoding,
            InferenceError::EmptyGeneration => ErrorCode::EmptyGeneration,
            InferenceError::BackendFailure(_) => ErrorCode::BackendFailure,
            InferenceError::SchemaViolation(_) => ErrorCode::SchemaViolation,
        }
    }
}

impl From<SchemaError> for InferenceError {
    fn from(err: SchemaError) -> Self {
        InferenceError::SchemaViolation(err.to_string())
    }
}

impl From<InferenceError> for InferenceReply {
    fn from(err: InferenceError) -> Self {
        InferenceReply::failure(err.to_string(), err.code())
    }
}

/// Turn a pipeline outcome into the single-field reply sent to callers.
pub fn into_reply(result: Result<String, InferenceError>) -> InferenceReply {
    match result {
        Ok(payload) => InferenceReply::success(payload),
        Err(err) => err.into(),
    }
}
