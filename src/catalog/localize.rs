//! Post-extraction rewrite of canonical entity names to display forms.

use std::collections::HashMap;

use crate::graph::{Graph, Node, PropertyValue};

/// Lookup table mapping a canonical entity name to a display-form name.
///
/// Matching is exact string equality on the node's `name` property;
/// non-matching names pass through unchanged. The localizer runs per chunk,
/// before merging, so dedup keys see the localized form.
#[derive(Debug, Clone, Default)]
pub struct NameLocalizer {
    map: HashMap<String, String>,
}

impl NameLocalizer {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Rewrite the node's `name` property when it exactly matches a
    /// canonical name.
    pub fn localize_node(&self, node: &mut Node) {
        let Some(props) = node.properties.as_mut() else {
            return;
        };
        let Some(PropertyValue::Text(name)) = props.get("name") else {
            return;
        };
        let Some(display) = self.map.get(name).cloned() else {
            return;
        };
        props.insert("name".to_string(), PropertyValue::Text(display));
    }

    /// Localize every node in the graph.
    pub fn localize_graph(&self, graph: &mut Graph) {
        for node in &mut graph.nodes {
            self.localize_node(node);
        }
    }
}
