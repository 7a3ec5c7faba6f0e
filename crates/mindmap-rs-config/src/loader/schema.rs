//! Shape checks for a single config layer.
//!
//! Runs before merging so an unknown key or a mistyped value is reported
//! against the layer that introduced it.

use crate::ConfigError;
use serde_json::Value;

#[derive(Clone, Copy)]
enum Kind {
    Text,
    Number,
    /// Non-negative integer.
    Count,
    OneOf(&'static [&'static str]),
}

type Block = (&'static str, &'static [(&'static str, Kind)]);

const BLOCKS: &[Block] = &[
    (
        "backend",
        &[
            ("base_url", Kind::Text),
            ("model", Kind::Text),
            ("api_key_env", Kind::Text),
        ],
    ),
    (
        "sampling",
        &[
            ("temperature", Kind::Number),
            ("top_p", Kind::Number),
            ("max_tokens", Kind::Count),
        ],
    ),
    ("pipeline", &[("validation", Kind::OneOf(&["lenient", "strict"]))]),
];

/// Check `value` against the config layout; `layer` prefixes error paths.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let Value::Object(root) = value else {
        return Err(field_error(layer, "root", "expected object"));
    };
    for (key, value) in root {
        if key == "$schema" {
            check(value, Kind::Text, layer, key)?;
            continue;
        }
        let Some((_, fields)) = BLOCKS.iter().find(|(name, _)| name == key) else {
            return Err(field_error(layer, key, "unknown key"));
        };
        let Value::Object(block) = value else {
            return Err(field_error(layer, key, "expected object"));
        };
        for (field, value) in block {
            let path = format!("{key}.{field}");
            let Some((_, kind)) = fields.iter().find(|(name, _)| name == field) else {
                return Err(field_error(layer, &path, "unknown key"));
            };
            check(value, *kind, layer, &path)?;
        }
    }
    Ok(())
}

fn check(value: &Value, kind: Kind, layer: &str, path: &str) -> Result<(), ConfigError> {
    let message = match kind {
        Kind::Text if !value.is_string() => "expected string",
        Kind::Number if !value.is_number() => "expected number",
        Kind::Count if !value.is_u64() => "expected non-negative integer",
        Kind::OneOf(allowed) => match value.as_str() {
            None => "expected string",
            Some(choice) if !allowed.contains(&choice) => "unsupported value",
            Some(_) => return Ok(()),
        },
        _ => return Ok(()),
    };
    Err(field_error(layer, path, message))
}

fn field_error(layer: &str, path: &str, message: &str) -> ConfigError {
    ConfigError::invalid_field(format!("{layer}:{path}"), message)
}
