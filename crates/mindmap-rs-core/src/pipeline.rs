//! Request pipeline: validate the upload, prompt the backend once, clean the answer.

use crate::error::InferenceError;
use crate::prompt::assemble;
use crate::sanitize::sanitize;
use crate::schema::validate_graph;
use futures_util::FutureExt;
use log::{debug, info, warn};
use mindmap_rs_config::{MindmapConfig, ValidationMode};
use mindmap_rs_protocol::{ModelBackend, SamplingConfig, Upload};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use uuid::Uuid;

/// Shared, long-lived inference pipeline.
///
/// Holds one backend handle for the lifetime of the process; requests never
/// rebuild it. A failed request leaves the pipeline usable for the next one.
#[derive(Clone)]
pub struct InferencePipeline {
    backend: Arc<dyn ModelBackend>,
    sampling: SamplingConfig,
    validation: ValidationMode,
}

impl InferencePipeline {
    /// Create a lenient pipeline over `backend`.
    pub fn new(backend: Arc<dyn ModelBackend>, sampling: SamplingConfig) -> Self {
        Self {
            backend,
            sampling,
            validation: ValidationMode::default(),
        }
    }

    /// Create a pipeline using the sampling and validation settings from config.
    pub fn from_config(backend: Arc<dyn ModelBackend>, config: &MindmapConfig) -> Self {
        Self::new(backend, config.sampling).with_validation(config.pipeline.validation)
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    pub fn validation(&self) -> ValidationMode {
        self.validation
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Run one uploaded file through the pipeline.
    ///
    /// Missing or undecodable input is rejected before the backend is called.
    pub async fn infer(&self, upload: Option<&Upload>) -> Result<String, InferenceError> {
        let Some(upload) = upload.filter(|upload| !upload.is_blank()) else {
            warn!("rejecting request without a usable file");
            return Err(InferenceError::MissingInput);
        };
        let text = std::str::from_utf8(&upload.bytes).map_err(|err| {
            warn!(
                "rejecting non UTF-8 upload (filename={}, bytes={})",
                upload.filename,
                upload.bytes.len()
            );
            InferenceError::InvalidEncoding(err.to_string())
        })?;
        debug!(
            "decoded upload (filename={}, chars={})",
            upload.filename,
            text.chars().count()
        );
        self.infer_document(text).await
    }

    /// Run already decoded document text through the pipeline.
    pub async fn infer_document(&self, text: &str) -> Result<String, InferenceError> {
        let request_id = Uuid::new_v4();
        let prompt = assemble(text);
        info!(
            "generating character graph (request_id={}, backend={}, prompt_chars={})",
            request_id,
            self.backend.name(),
            prompt.content_len()
        );

        let outcome = AssertUnwindSafe(self.backend.generate(&prompt, &self.sampling))
            .catch_unwind()
            .await;
        let completions = match outcome {
            Ok(Ok(completions)) => completions,
            Ok(Err(err)) => {
                warn!(
                    "backend generation failed (request_id={}, error={})",
                    request_id, err
                );
                return Err(InferenceError::BackendFailure(err.to_string()));
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(
                    "backend panicked during generation (request_id={}, error={})",
                    request_id, message
                );
                return Err(InferenceError::BackendFailure(message));
            }
        };

        debug!(
            "backend returned completions (request_id={}, count={})",
            request_id,
            completions.len()
        );
        let Some(first) = completions.first() else {
            warn!("backend returned no completions (request_id={request_id})");
            return Err(InferenceError::EmptyGeneration);
        };
        let payload = sanitize(&first.text);

        match self.validation {
            ValidationMode::Lenient => {
                info!(
                    "request completed (request_id={}, payload_chars={})",
                    request_id,
                    payload.len()
                );
                Ok(payload)
            }
            ValidationMode::Strict => {
                let graph = validate_graph(&payload).inspect_err(|err| {
                    warn!(
                        "generated payload failed validation (request_id={}, error={})",
                        request_id, err
                    );
                })?;
                let normalized = serde_json::to_string(&graph)
                    .map_err(|err| InferenceError::SchemaViolation(err.to_string()))?;
                info!(
                    "request completed (request_id={}, nodes={}, links={})",
                    request_id,
                    graph.nodes.len(),
                    graph.links.len()
                );
                Ok(normalized)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "model backend panicked".to_string()
    }
}
