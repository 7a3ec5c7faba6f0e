//! Strict checks on a generated character graph.

use log::warn;
use mindmap_rs_protocol::CharacterGraph;
use std::collections::HashSet;
use thiserror::Error;

/// Reasons a payload is not an acceptable character graph.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Payload is not JSON or does not match the graph shape.
    #[error("payload is not a character graph: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A node has an empty id.
    #[error("node at index {0} has an empty id")]
    EmptyNodeId(usize),
    /// Two nodes share an id.
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(String),
}

/// Parse a sanitized payload into a graph, rejecting broken nodes.
///
/// Links that point at unknown nodes are dropped rather than rejected.
pub fn validate_graph(payload: &str) -> Result<CharacterGraph, SchemaError> {
    let mut graph: CharacterGraph = serde_json::from_str(payload)?;

    let mut seen = HashSet::new();
    for (idx, node) in graph.nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            return Err(SchemaError::EmptyNodeId(idx));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(SchemaError::DuplicateNodeId(node.id.clone()));
        }
    }

    let dropped = graph.prune_dangling_links();
    if dropped > 0 {
        warn!(
            "dropped links with unknown endpoints (dropped={}, kept={})",
            dropped,
            graph.links.len()
        );
    }
    Ok(graph)
}
