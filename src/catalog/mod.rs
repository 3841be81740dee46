//! The closed entity vocabulary and display-name localization.

pub mod demon_slayer;
mod localize;

pub use localize::NameLocalizer;

use serde::{Deserialize, Serialize};

use crate::graph::{Node, Properties, PropertyValue};

/// One allowed entity: a stable id, its category label and canonical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    pub name: String,
}

impl CatalogEntry {
    /// Node form of this entry, with the canonical name as its only property.
    /// This is the shape the extraction prompt advertises.
    pub fn to_node(&self) -> Node {
        let mut properties = Properties::new();
        properties.insert(
            "name".to_string(),
            PropertyValue::Text(self.name.clone()),
        );
        Node {
            id: self.id.clone(),
            label: self.label.clone(),
            properties: Some(properties),
        }
    }
}

/// The fixed, closed set of nodes the extraction oracle may produce.
/// Loaded once at startup; ids are unique per label.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entries: Vec<CatalogEntry>,
}

impl EntityCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON array of `{id, label, name}` entries.
    pub fn from_json(s: &str) -> crate::Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(s)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the vocabulary as the node-shaped JSON array embedded in the
    /// extraction prompt.
    pub fn prompt_nodes_json(&self) -> String {
        let nodes: Vec<Node> = self.entries.iter().map(CatalogEntry::to_node).collect();
        serde_json::to_string_pretty(&nodes).expect("catalog entries always serialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, label: &str, name: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            label: label.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_entry_to_node_carries_name_property() {
        let node = entry("N0", "person", "Tanjiro Kamado").to_node();
        assert_eq!(node.id, "N0");
        assert_eq!(node.label, "person");
        let props = node.properties.expect("node has properties");
        assert_eq!(
            props.get("name"),
            Some(&PropertyValue::Text("Tanjiro Kamado".to_string()))
        );
    }

    #[test]
    fn test_from_json_parses_entry_array() {
        let catalog = EntityCatalog::from_json(
            r#"[{"id": "N0", "label": "person", "name": "Tanjiro Kamado"}]"#,
        )
        .expect("parse catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0], entry("N0", "person", "Tanjiro Kamado"));
    }

    #[test]
    fn test_prompt_nodes_json_is_node_shaped() {
        let catalog = EntityCatalog::new(vec![entry("N13", "demon", "Muzan Kibutsuji")]);
        let rendered = catalog.prompt_nodes_json();
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(value[0]["id"], "N13");
        assert_eq!(value[0]["label"], "demon");
        assert_eq!(value[0]["properties"]["name"], "Muzan Kibutsuji");
    }
}
