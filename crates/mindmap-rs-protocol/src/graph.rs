//! Character graph payload produced by the extraction prompt.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashSet;

/// Characters and relationships extracted from a book excerpt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterGraph {
    /// Title of the book.
    pub title: String,
    /// Short narrative summary.
    pub summary: String,
    /// One node per character.
    pub nodes: Vec<Node>,
    /// Labeled relationships between characters.
    pub links: Vec<Link>,
}

/// A character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Unique character id, e.g. `c1`.
    pub id: String,
    /// Full name as it appears in the text.
    pub name: String,
    /// Sequential numeric weight starting at 1.
    pub val: Number,
}

/// A directed relationship between two characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    /// Id of the source character.
    pub source: String,
    /// Id of the target character.
    pub target: String,
    /// Natural-language description of the relationship.
    pub label: String,
}

impl CharacterGraph {
    /// Set of node ids present in the graph.
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Drop links whose endpoints are not known nodes and return how many were removed.
    pub fn prune_dangling_links(&mut self) -> usize {
        let known: HashSet<String> = self.nodes.iter().map(|node| node.id.clone()).collect();
        let before = self.links.len();
        self.links
            .retain(|link| known.contains(&link.source) && known.contains(&link.target));
        before - self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> CharacterGraph {
        serde_json::from_value(json!({
            "title": "The Fellowship of the Ring",
            "summary": "A ring must be destroyed.",
            "nodes": [
                { "id": "c1", "name": "Frodo Baggins", "val": 1 },
                { "id": "c2", "name": "Samwise Gamgee", "val": 2 }
            ],
            "links": [
                { "source": "c2", "target": "c1", "label": "loyal friend of" },
                { "source": "c3", "target": "c1", "label": "mentor of" }
            ]
        }))
        .expect("graph")
    }

    #[test]
    fn prune_removes_links_to_unknown_nodes() {
        let mut graph = sample();
        assert_eq!(graph.prune_dangling_links(), 1);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].source, "c2");
    }

    #[test]
    fn integer_values_stay_integers() {
        let graph = sample();
        let value = serde_json::to_value(&graph).expect("serialize");
        assert_eq!(value["nodes"][0]["val"], json!(1));
    }
}
