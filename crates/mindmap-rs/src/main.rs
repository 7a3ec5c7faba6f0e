//! Command line front end: extract character mind maps from book excerpts.

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};
use mindmap_rs::input::{DocumentSource, process};
use mindmap_rs::{InferencePipeline, OpenAiCompatBackend};
use mindmap_rs_config::{MindmapConfig, ValidationMode};
use mindmap_rs_protocol::ModelBackend;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Command-line options for the mindmap client.
#[derive(Parser, Debug)]
#[command(name = "mindmap", version)]
struct Cli {
    /// Text files to analyse; `-` or none reads stdin
    files: Vec<PathBuf>,
    /// Optional path to a mindmap.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Model name served by the backend
    #[arg(long)]
    model: Option<String>,
    /// Base URL of the OpenAI-compatible API, e.g. http://localhost:8000/v1
    #[arg(long)]
    base_url: Option<String>,
    /// Parse and check the generated graph before printing it
    #[arg(long)]
    strict: bool,
}

/// Entry point for the mindmap CLI.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting mindmap (config_set={}, model_set={}, base_url_set={}, strict={}, files={})",
        cli.config.is_some(),
        cli.model.is_some(),
        cli.base_url.is_some(),
        cli.strict,
        cli.files.len()
    );

    let mut config = load_config(&cli)?;
    apply_overrides(&mut config, &cli);
    config.validate().context("invalid configuration")?;

    let backend: Arc<dyn ModelBackend> = Arc::new(
        OpenAiCompatBackend::from_config(&config.backend)
            .context("failed to build model backend")?,
    );
    info!(
        "backend ready (base_url={}, model={}, validation={:?})",
        config.backend.base_url, config.backend.model, config.pipeline.validation
    );
    let pipeline = InferencePipeline::from_config(backend, &config);

    let mut failures = 0usize;
    let mut stdout = std::io::stdout().lock();
    for source in DocumentSource::from_args(&cli.files) {
        let reply = process(&pipeline, &source).await;
        if !reply.is_success() {
            failures += 1;
        }
        let line = serde_json::to_string(&reply).context("failed to encode reply")?;
        writeln!(stdout, "{line}").context("failed to write reply")?;
    }
    stdout.flush().context("failed to flush stdout")?;

    if failures > 0 {
        warn!("finished with failures (failed={})", failures);
        return Ok(ExitCode::FAILURE);
    }
    debug!("all documents processed");
    Ok(ExitCode::SUCCESS)
}

fn load_config(cli: &Cli) -> anyhow::Result<MindmapConfig> {
    if let Some(path) = cli.config.as_ref() {
        info!("loading config from path: {}", path.display());
        return MindmapConfig::load_from_path(path).context("failed to load config");
    }
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    info!("loading layered config from cwd: {}", cwd.display());
    let layered = MindmapConfig::load_layered(&cwd).context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}

/// Command line flags win over every config layer.
fn apply_overrides(config: &mut MindmapConfig, cli: &Cli) {
    if let Some(model) = cli.model.as_ref() {
        config.backend.model = model.clone();
    }
    if let Some(base_url) = cli.base_url.as_ref() {
        config.backend.base_url = base_url.clone();
    }
    if cli.strict {
        config.pipeline.validation = ValidationMode::Strict;
    }
}
