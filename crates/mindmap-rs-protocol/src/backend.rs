//! Model backend interface consumed by the inference pipeline.

use crate::{Completion, Prompt, SamplingConfig};
use async_trait::async_trait;

/// Errors raised by a model backend while generating.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend could not be reached.
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The backend answer could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// Any other failure inside the backend.
    #[error("{0}")]
    Provider(String),
}

/// A loaded model that turns a prompt into candidate completions.
///
/// One handle is created at startup and shared by every request.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Generate completions for the prompt with the given sampling parameters.
    async fn generate(
        &self,
        prompt: &Prompt,
        sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError>;
}
