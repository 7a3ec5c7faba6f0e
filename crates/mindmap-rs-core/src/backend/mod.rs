//! Model backends the pipeline can drive.

mod openai;

pub use mindmap_rs_protocol::{BackendError, ModelBackend};
pub use openai::OpenAiCompatBackend;
