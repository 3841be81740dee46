//! The in-memory knowledge-graph model and its JSON interchange form.

pub mod merge;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A scalar property value: null, boolean, integer, float or text.
///
/// Variant order matters for untagged deserialization: integers must be
/// tried before floats so `3` parses as `Int(3)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Property map attached to nodes and relationships. Keys are sorted, which
/// keeps the serialized form (and therefore node identity) deterministic.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A graph node drawn from the entity catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Node {
    /// Catalog-assigned stable identifier (e.g. `"N0"`).
    pub id: String,
    /// Category tag (e.g. `"person"`, `"demon"`).
    pub label: String,
    pub properties: Option<Properties>,
}

/// A directed relationship between two nodes, referenced by id.
///
/// Relationships carry no identity of their own and are never deduplicated;
/// two extractions of the same fact stay two relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Relationship {
    /// Relationship type (e.g. `"FIGHTS"`).
    #[serde(rename = "type")]
    pub rel_type: String,
    pub start_node_id: String,
    pub end_node_id: String,
    pub properties: Option<Properties>,
}

/// A set of nodes plus the relationships between them.
///
/// The JSON interchange form has exactly two top-level keys, `nodes` and
/// `relationships`; a missing `relationships` key reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Graph {
    /// Serialize to the interchange format: a pretty-printed UTF-8 JSON
    /// document.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Parse a graph from its JSON interchange form.
    pub fn from_json(s: &str) -> crate::Result<Self> {
        serde_json::from_str(s).map_err(Into::into)
    }
}
