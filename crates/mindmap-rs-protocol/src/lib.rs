//! Wire and data model types shared by the mindmap crates.
//!
//! Prompts, completions, uploads, sampling parameters, the backend interface
//! and the character graph payload live here so the pipeline, the backends
//! and the test doubles agree on one shape.

mod backend;
mod graph;
mod reply;
mod sampling;

pub use backend::{BackendError, ModelBackend};
pub use graph::{CharacterGraph, Link, Node};
pub use reply::{ErrorCode, InferenceReply};
pub use sampling::SamplingConfig;

use serde::{Deserialize, Serialize};

/// Author of a prompt message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Fixed instruction describing the extraction task.
    System,
    /// The submitted document.
    User,
}

impl Role {
    /// Role name as sent to chat backends.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// A single role-tagged message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Message author.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl Message {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Ordered message sequence submitted to a backend. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Prompt {
    messages: Vec<Message>,
}

impl Prompt {
    /// Wrap an already ordered message list.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Messages in submission order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total content length in bytes, used for logging.
    pub fn content_len(&self) -> usize {
        self.messages
            .iter()
            .map(|message| message.content.len())
            .sum()
    }
}

/// One candidate generation returned by a backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Completion {
    /// Generated text.
    pub text: String,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A named file part handed to the pipeline by its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Identifying name of the uploaded file.
    pub filename: String,
    /// Raw file content, expected to be UTF-8 text.
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// True when the upload carries no name or no content.
    pub fn is_blank(&self) -> bool {
        self.filename.trim().is_empty() || self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn prompt_serializes_as_chat_message_array() {
        let prompt = Prompt::new(vec![Message::system("rules"), Message::user("text")]);
        let value = serde_json::to_value(&prompt).expect("serialize");
        assert_eq!(
            value,
            json!([
                { "role": "system", "content": "rules" },
                { "role": "user", "content": "text" }
            ])
        );
        assert_eq!(prompt.content_len(), 9);
    }

    #[test]
    fn role_names_match_serde_names() {
        for role in [Role::System, Role::User] {
            let encoded = serde_json::to_value(role).expect("serialize");
            assert_eq!(encoded, json!(role.as_str()));
        }
    }

    #[test]
    fn upload_is_blank_without_name_or_content() {
        assert!(Upload::new("", b"text".to_vec()).is_blank());
        assert!(Upload::new("   ", b"text".to_vec()).is_blank());
        assert!(Upload::new("book.txt", Vec::new()).is_blank());
        assert!(!Upload::new("book.txt", b"text".to_vec()).is_blank());
    }
}
