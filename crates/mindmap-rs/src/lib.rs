//! Public SDK surface for the mindmap service.
//!
//! Re-exports the building blocks and adds the document intake helpers the
//! `mindmap` binary is built from.

/// Re-export for convenience.
pub use mindmap_rs_config as config;
pub use mindmap_rs_core as core;
/// Re-export for convenience.
pub use mindmap_rs_protocol as protocol;

pub mod input;

pub use mindmap_rs_core::{InferenceError, InferencePipeline, OpenAiCompatBackend, into_reply};
pub use mindmap_rs_protocol::{ErrorCode, InferenceReply, Upload};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn init_logging_can_run_more_than_once() {
        init_logging();
        init_logging();
        log::info!("logging initialised twice");
    }
}
