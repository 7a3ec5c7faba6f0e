//! Canned documents and model outputs.

/// Short excerpt with a handful of characters.
pub const SAMPLE_EXCERPT: &str = "Frodo Baggins left the Shire with his gardener Samwise Gamgee. \
Gandalf had warned Frodo about the Ring before he departed, and Aragorn met them at Bree.";

/// A well-formed character graph as a model would ideally return it.
pub const SAMPLE_GRAPH_JSON: &str = r#"{
  "title": "The Fellowship of the Ring",
  "summary": "Frodo carries the Ring out of the Shire.",
  "nodes": [
    { "id": "c1", "name": "Frodo Baggins", "val": 1 },
    { "id": "c2", "name": "Samwise Gamgee", "val": 2 },
    { "id": "c3", "name": "Gandalf", "val": 3 }
  ],
  "links": [
    { "source": "c2", "target": "c1", "label": "gardener and loyal traveling companion of" },
    { "source": "c3", "target": "c1", "label": "wise mentor who warns about the Ring" }
  ]
}"#;

/// Wrap a payload in a markdown json fence, the way chat models often answer.
pub fn fenced(payload: &str) -> String {
    format!("```json\n{payload}\n```")
}
