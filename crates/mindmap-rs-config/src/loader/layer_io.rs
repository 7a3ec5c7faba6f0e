//! Reading config layers from disk.

use super::{
    ConfigLayer, ConfigLayerSource, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, LoadedLayer,
    SYSTEM_CONFIG_PATH, schema,
};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Parse JSON5 text; `origin` is used in error messages.
pub(super) fn parse_json5(contents: &str, origin: &str) -> Result<Value, ConfigError> {
    json5::from_str(contents).map_err(|source| ConfigError::ParseFailed {
        origin: origin.to_string(),
        source,
    })
}

pub(super) fn read_json5(path: &Path) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json5(&contents, &path.display().to_string())
}

/// Read and schema-check one layer.
///
/// A missing file is skipped unless the layer is `required`.
pub(super) fn read_layer(
    source: ConfigLayerSource,
    path: &Path,
    required: bool,
) -> Result<Option<LoadedLayer>, ConfigError> {
    let value = match read_json5(path) {
        Ok(value) => value,
        Err(ConfigError::ReadFailed { source: err, .. })
            if !required && err.kind() == ErrorKind::NotFound =>
        {
            debug!(
                "config layer absent (source={}, path={})",
                source.label(),
                path.display()
            );
            return Ok(None);
        }
        Err(err) => return Err(err),
    };
    let label = format!("{}({})", source.label(), path.display());
    schema::validate_layer_schema(&value, &label)?;
    Ok(Some(LoadedLayer {
        meta: ConfigLayer {
            source,
            path: path.to_path_buf(),
        },
        value,
    }))
}

/// Identity of a layer file, so one file reached twice is only merged once.
pub(super) fn layer_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

pub(super) fn default_system_config_path() -> Option<PathBuf> {
    SYSTEM_CONFIG_PATH.map(PathBuf::from)
}

/// `~/.mindmap/mindmap.json5`, when a home directory is known.
pub(super) fn default_user_config_path() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE),
    )
}
