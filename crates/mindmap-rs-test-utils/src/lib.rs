//! Test helpers shared across mindmap crates.

pub mod backend;
pub mod documents;

pub use backend::{
    EmptyBackend, FailingBackend, FixedBackend, PanickingBackend, RecordingBackend,
    ScriptedBackend,
};
pub use documents::{SAMPLE_EXCERPT, SAMPLE_GRAPH_JSON, fenced};
