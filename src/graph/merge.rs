//! Combining per-episode partial graphs into one deduplicated graph.

use std::collections::HashSet;

use super::{Graph, Node};

/// Merge partial graphs, in input order, into a single graph.
///
/// Nodes are deduplicated on the exact `(id, label, serialized properties)`
/// tuple, keeping the first occurrence; two nodes with the same id but
/// different properties stay distinct entries. Relationships are concatenated
/// as-is, never deduplicated, and endpoints are not validated here.
///
/// Merging an empty sequence yields an empty graph; this function does not
/// fail.
pub fn combine_graphs<I>(graphs: I) -> Graph
where
    I: IntoIterator<Item = Graph>,
{
    let mut merged = Graph::default();
    let mut seen: HashSet<String> = HashSet::new();

    for graph in graphs {
        for node in graph.nodes {
            if seen.insert(identity_key(&node)) {
                merged.nodes.push(node);
            }
        }
        merged.relationships.extend(graph.relationships);
    }

    merged
}

/// Exact-match node identity: id, label and the serialized property map.
///
/// Absent properties and an empty map serialize differently (`null` vs `{}`)
/// and intentionally produce different keys.
fn identity_key(node: &Node) -> String {
    let props = serde_json::to_string(&node.properties)
        .expect("scalar property maps always serialize");
    format!("{}\u{0}{}\u{0}{}", node.id, node.label, props)
}
