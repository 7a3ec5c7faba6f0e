//! Backend that talks to an OpenAI-compatible chat completions server
//! (vLLM, llama.cpp server, hosted APIs).

use async_trait::async_trait;
use log::{debug, warn};
use mindmap_rs_config::BackendConfig;
use mindmap_rs_protocol::{BackendError, Completion, ModelBackend, Prompt, SamplingConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// HTTP chat backend. Build once and share; the inner client pools connections.
#[derive(Debug, Clone)]
pub struct OpenAiCompatBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatBackend {
    /// Create a backend for `{base_url}/chat/completions` serving `model`.
    pub fn new(base_url: impl AsRef<str>, model: impl Into<String>) -> Self {
        let endpoint = format!(
            "{}/chat/completions",
            base_url.as_ref().trim_end_matches('/')
        );
        Self {
            client: Client::new(),
            endpoint,
            model: model.into(),
            api_key: None,
        }
    }

    /// Send a bearer token with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Build from config, reading the API key from the configured environment variable.
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        let backend = Self::new(&config.base_url, config.model.clone());
        let Some(var) = config.api_key_env.as_deref() else {
            return Ok(backend);
        };
        match std::env::var(var) {
            Ok(key) => Ok(backend.with_api_key(key)),
            Err(_) => Err(BackendError::Provider(format!(
                "environment variable {var} is not set"
            ))),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ModelBackend for OpenAiCompatBackend {
    fn name(&self) -> &str {
        "openai-compat"
    }

    async fn generate(
        &self,
        prompt: &Prompt,
        sampling: &SamplingConfig,
    ) -> Result<Vec<Completion>, BackendError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: prompt
                .messages()
                .iter()
                .map(|message| ChatMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            max_tokens: sampling.max_tokens,
            n: 1,
        };
        debug!(
            "sending chat completion (endpoint={}, model={}, messages={})",
            self.endpoint,
            self.model,
            body.messages.len()
        );

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(api_key) = self.api_key.as_deref() {
            request = request.bearer_auth(api_key);
        }
        let response = request
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            warn!(
                "chat completion failed (status={}, endpoint={})",
                status, self.endpoint
            );
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))?;
        Ok(parsed
            .choices
            .into_iter()
            .map(|choice| Completion::new(choice.message.content.unwrap_or_default()))
            .collect())
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    n: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Provider error message when the body has one, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string())
}
