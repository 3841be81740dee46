//! Closed-vocabulary extraction prompt.
//!
//! Stored as a Rust string literal (not an external file) for compile-time
//! inclusion; the vocabulary and the synopsis are appended at build time.

use crate::catalog::EntityCatalog;

const EXTRACTION_TEMPLATE: &str = r#"You are a top-tier algorithm designed for extracting information in structured formats to build a knowledge graph. Extract the entities (nodes) and specify their type from the following text, but you MUST select nodes ONLY from the following predefined set (see the provided NODES list below). Do not create any new nodes or use names that do not exactly match one in the NODES list.

Also extract the relationships between these nodes. Return the result as JSON using the following format:

{
  "nodes": [
    {"id": "N0", "label": "person", "properties": {"name": "Tanjiro Kamado"}}
  ],
  "relationships": [
    {"type": "FIGHTS", "start_node_id": "N0", "end_node_id": "N13", "properties": {"outcome": "victory"}}
  ]
}

Additional rules:
- Use only nodes from the NODES list. Do not invent or substitute nodes.
- Skip any relationship if one of its entities is not in NODES.
- Only output valid relationships where both endpoints exist in NODES and the direction matches their types."#;

/// Assemble the full extraction prompt for one synopsis.
pub fn build_prompt(synopsis: &str, catalog: &EntityCatalog) -> String {
    format!(
        "{EXTRACTION_TEMPLATE}\n\nNODES =\n{}\n\nInput:\n{synopsis}",
        catalog.prompt_nodes_json()
    )
}
