//! Layered configuration loading.
//!
//! Layers are read lowest precedence first: system, user, the working
//! directory, then any runtime files given explicitly. Each layer is schema
//! checked on its own, merged into one JSON value and decoded once at the end.

mod layer_io;
mod merge;
mod schema;


use crate::{ConfigError, MindmapConfig};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "mindmap.json5";
/// Directory under the home directory holding the user layer.
const DEFAULT_CONFIG_DIR: &str = ".mindmap";

#[cfg(unix)]
const SYSTEM_CONFIG_PATH: Option<&str> = Some("/etc/mindmap/mindmap.json5");
#[cfg(windows)]
const SYSTEM_CONFIG_PATH: Option<&str> = Some("C:\\ProgramData\\mindmap\\mindmap.json5");
#[cfg(not(any(unix, windows)))]
const SYSTEM_CONFIG_PATH: Option<&str> = None;

/// Effective config plus the layers it was built from.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: MindmapConfig,
    /// Layers that existed and were merged, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
}

/// Where a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    System,
    User,
    Cwd,
    /// Explicit override file; highest precedence and must exist.
    Runtime,
}

impl ConfigLayerSource {
    /// Short name used in logs and schema error paths.
    pub fn label(&self) -> &'static str {
        match self {
            ConfigLayerSource::System => "system",
            ConfigLayerSource::User => "user",
            ConfigLayerSource::Cwd => "cwd",
            ConfigLayerSource::Runtime => "runtime",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Where to look for layers. `None` disables a layer.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Directory searched for `mindmap.json5`.
    pub cwd: PathBuf,
    pub system_config_path: Option<PathBuf>,
    pub user_config_path: Option<PathBuf>,
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Default system and user locations plus the given working directory.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            system_config_path: layer_io::default_system_config_path(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Candidate layers in merge order, with whether each must exist.
    fn candidates(&self) -> Vec<(ConfigLayerSource, PathBuf, bool)> {
        let mut candidates = Vec::with_capacity(3 + self.runtime_paths.len());
        if let Some(path) = &self.system_config_path {
            candidates.push((ConfigLayerSource::System, path.clone(), false));
        }
        if let Some(path) = &self.user_config_path {
            candidates.push((ConfigLayerSource::User, path.clone(), false));
        }
        candidates.push((
            ConfigLayerSource::Cwd,
            self.cwd.join(DEFAULT_CONFIG_FILE),
            false,
        ));
        for path in &self.runtime_paths {
            candidates.push((ConfigLayerSource::Runtime, path.clone(), true));
        }
        candidates
    }
}

impl MindmapConfig {
    /// Load one config file without layering.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config file (path={})", path.display());
        let value = layer_io::read_json5(path)?;
        decode(value, &path.display().to_string())
    }

    /// Load config from JSON5 text without layering.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading inline config (len={})", contents.len());
        let value = layer_io::parse_json5(contents, "<inline>")?;
        decode(value, "config")
    }

    /// Load the default layer stack for `cwd`.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load the layer stack described by `options`.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config (cwd={}, runtime_layers={})",
            options.cwd.display(),
            options.runtime_paths.len()
        );
        let mut merged = Value::Object(serde_json::Map::new());
        let mut layers = Vec::new();
        let mut seen = HashSet::new();

        for (source, path, required) in options.candidates() {
            if !seen.insert(layer_io::layer_key(&path)) {
                debug!(
                    "config layer already merged (source={}, path={})",
                    source.label(),
                    path.display()
                );
                continue;
            }
            let Some(layer) = layer_io::read_layer(source, &path, required)? else {
                continue;
            };
            let replaced = merge::overlay(&mut merged, &layer.value);
            debug!(
                "merged config layer (source={}, path={}, replaced={})",
                source.label(),
                path.display(),
                replaced
            );
            layers.push(layer.meta);
        }

        let config = decode(merged, "effective")?;
        info!("layered config ready (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }
}

struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

/// Schema check, decode and range check a complete config value.
fn decode(value: Value, label: &str) -> Result<MindmapConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: MindmapConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
