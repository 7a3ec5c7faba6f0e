//! Document intake for the command line: files or stdin in, one reply per document out.

use log::{debug, warn};
use mindmap_rs_core::{InferencePipeline, into_reply};
use mindmap_rs_protocol::{ErrorCode, InferenceReply, Upload};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Argument that selects stdin instead of a file.
pub const STDIN_ARG: &str = "-";
/// Filename attached to documents read from stdin.
pub const STDIN_FILENAME: &str = "stdin";

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Stdin,
    File(PathBuf),
}

impl DocumentSource {
    /// Map command line paths to sources; no paths means stdin.
    pub fn from_args(paths: &[PathBuf]) -> Vec<DocumentSource> {
        if paths.is_empty() {
            return vec![DocumentSource::Stdin];
        }
        paths
            .iter()
            .map(|path| {
                if path.as_os_str() == STDIN_ARG {
                    DocumentSource::Stdin
                } else {
                    DocumentSource::File(path.clone())
                }
            })
            .collect()
    }

    /// Read the source into an upload.
    pub async fn read(&self) -> io::Result<Upload> {
        match self {
            DocumentSource::Stdin => {
                let mut bytes = Vec::new();
                tokio::io::stdin().read_to_end(&mut bytes).await?;
                Ok(Upload::new(STDIN_FILENAME, bytes))
            }
            DocumentSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(Upload::new(upload_name(path), bytes))
            }
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Stdin => f.write_str(STDIN_FILENAME),
            DocumentSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read one document and run it through the pipeline.
///
/// An unreadable source is reported like a missing file.
pub async fn process(pipeline: &InferencePipeline, source: &DocumentSource) -> InferenceReply {
    let upload = match source.read().await {
        Ok(upload) => upload,
        Err(err) => {
            warn!("failed to read document (source={}, error={})", source, err);
            return InferenceReply::failure(
                format!("failed to read {source}: {err}"),
                ErrorCode::MissingInput,
            );
        }
    };
    debug!(
        "read document (source={}, bytes={})",
        source,
        upload.bytes.len()
    );
    into_reply(pipeline.infer(Some(&upload)).await)
}

#[cfg(test)]
mod tests {
    use super::{DocumentSource, process};
    use mindmap_rs_core::InferencePipeline;
    use mindmap_rs_protocol::{ErrorCode, InferenceReply, SamplingConfig};
    use mindmap_rs_test_utils::{RecordingBackend, SAMPLE_EXCERPT};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn no_paths_means_stdin() {
        assert_eq!(DocumentSource::from_args(&[]), vec![DocumentSource::Stdin]);
    }

    #[test]
    fn dash_means_stdin() {
        let sources =
            DocumentSource::from_args(&[PathBuf::from("a.txt"), PathBuf::from("-")]);
        assert_eq!(
            sources,
            vec![
                DocumentSource::File(PathBuf::from("a.txt")),
                DocumentSource::Stdin
            ]
        );
    }

    #[tokio::test]
    async fn reads_file_with_its_name() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("emma.txt");
        std::fs::write(&path, SAMPLE_EXCERPT).expect("write");

        let upload = DocumentSource::File(path).read().await.expect("read");
        assert_eq!(upload.filename, "emma.txt");
        assert_eq!(upload.bytes, SAMPLE_EXCERPT.as_bytes());
    }

    #[tokio::test]
    async fn processes_file_into_success_reply() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("book.txt");
        std::fs::write(&path, SAMPLE_EXCERPT).expect("write");
        let backend = Arc::new(RecordingBackend::new("```json\n{\"nodes\":[]}\n```"));
        let pipeline = InferencePipeline::new(backend.clone(), SamplingConfig::default());

        let reply = process(&pipeline, &DocumentSource::File(path)).await;
        assert_eq!(reply, InferenceReply::success("{\"nodes\":[]}"));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn empty_file_is_missing_input() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("empty.txt");
        std::fs::write(&path, "").expect("write");
        let backend = Arc::new(RecordingBackend::new("{}"));
        let pipeline = InferencePipeline::new(backend.clone(), SamplingConfig::default());

        let reply = process(&pipeline, &DocumentSource::File(path)).await;
        assert!(matches!(
            reply,
            InferenceReply::Failure { code: ErrorCode::MissingInput, .. }
        ));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn unreadable_file_is_reported_and_skipped() {
        let temp = tempdir().expect("tempdir");
        let backend = Arc::new(RecordingBackend::new("{}"));
        let pipeline = InferencePipeline::new(backend.clone(), SamplingConfig::default());

        let missing = DocumentSource::File(temp.path().join("nope.txt"));
        let reply = process(&pipeline, &missing).await;
        match reply {
            InferenceReply::Failure { error, code } => {
                assert_eq!(code, ErrorCode::MissingInput);
                assert!(error.starts_with("failed to read"), "{error}");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
        assert_eq!(backend.calls(), 0);
    }
}
