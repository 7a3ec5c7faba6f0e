use async_trait::async_trait;
use mindmap_rs_protocol::{BackendError, Completion, ModelBackend, Prompt, SamplingConfig};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Always answers with one completion carrying the same text.
#[derive(Debug, Clone)]
pub struct FixedBackend {
    response: String,
}

impl FixedBackend {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl ModelBackend for FixedBackend {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn generate(
        &self,
        _prompt: &Prompt,
        _sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError> {
        Ok(vec![Completion::new(self.response.clone())])
    }
}

/// Answers with a fixed text and records every call it receives.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    response: String,
    calls: Arc<AtomicUsize>,
    pub last_prompt: Arc<Mutex<Option<Prompt>>>,
    pub last_sampling: Arc<Mutex<Option<SamplingConfig>>>,
}

impl RecordingBackend {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            last_sampling: Arc::new(Mutex::new(None)),
        }
    }

    /// Number of `generate` invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.clone());
        *self.last_sampling.lock() = Some(*sampling);
        Ok(vec![Completion::new(self.response.clone())])
    }
}

/// Succeeds without producing any candidate.
#[derive(Debug, Clone, Default)]
pub struct EmptyBackend;

#[async_trait]
impl ModelBackend for EmptyBackend {
    fn name(&self) -> &str {
        "empty"
    }

    async fn generate(
        &self,
        _prompt: &Prompt,
        _sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError> {
        Ok(Vec::new())
    }
}

/// Always fails with a provider error carrying the given message.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    message: String,
}

impl FailingBackend {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(
        &self,
        _prompt: &Prompt,
        _sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError> {
        Err(BackendError::Provider(self.message.clone()))
    }
}

/// Panics inside `generate`, standing in for a crashed model runtime.
#[derive(Debug, Clone)]
pub struct PanickingBackend {
    message: String,
}

impl PanickingBackend {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelBackend for PanickingBackend {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn generate(
        &self,
        _prompt: &Prompt,
        _sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError> {
        panic!("{}", self.message);
    }
}

type ScriptedResult = Result<Vec<Completion>, BackendError>;

/// Replays queued results in order, one per call.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    script: Arc<Mutex<VecDeque<ScriptedResult>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a single successful completion.
    pub fn push_text(&self, text: impl Into<String>) -> &Self {
        self.script
            .lock()
            .push_back(Ok(vec![Completion::new(text.into())]));
        self
    }

    /// Queue a failure.
    pub fn push_error(&self, error: BackendError) -> &Self {
        self.script.lock().push_back(Err(error));
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        _prompt: &Prompt,
        _sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError> {
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Provider("script exhausted".to_string())))
    }
}
