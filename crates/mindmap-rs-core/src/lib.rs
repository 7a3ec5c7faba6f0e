//! Inference core for the mindmap service.
//!
//! Turns a book excerpt into a character graph payload: prompt assembly,
//! a single backend generation, fence cleanup and optional schema checks.

pub mod backend;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;
pub mod schema;

pub use backend::{BackendError, ModelBackend, OpenAiCompatBackend};
pub use error::{InferenceError, into_reply};
pub use pipeline::InferencePipeline;
pub use prompt::{SYSTEM_PROMPT, assemble};
pub use sanitize::sanitize;
pub use schema::{SchemaError, validate_graph};
