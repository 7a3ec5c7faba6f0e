//! Layer merging.

use serde_json::Value;

/// Overlay `layer` onto `merged`: objects merge key by key, anything else replaces.
///
/// Returns how many existing values the layer replaced, for logging.
pub(super) fn overlay(merged: &mut Value, layer: &Value) -> usize {
    match (merged, layer) {
        (Value::Object(target), Value::Object(source)) => {
            let mut replaced = 0;
            for (key, value) in source {
                if let Some(slot) = target.get_mut(key) {
                    replaced += overlay(slot, value);
                } else {
                    target.insert(key.clone(), value.clone());
                }
            }
            replaced
        }
        (slot, value) => {
            *slot = value.clone();
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::overlay;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_blocks_merge_and_scalars_replace() {
        let mut merged = json!({
            "backend": { "model": "a", "base_url": "http://x/v1" },
            "sampling": { "temperature": 1.0 }
        });
        let replaced = overlay(
            &mut merged,
            &json!({ "backend": { "model": "b" }, "pipeline": { "validation": "strict" } }),
        );
        assert_eq!(replaced, 1);
        assert_eq!(
            merged,
            json!({
                "backend": { "model": "b", "base_url": "http://x/v1" },
                "sampling": { "temperature": 1.0 },
                "pipeline": { "validation": "strict" }
            })
        );
    }
}
