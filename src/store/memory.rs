//! In-memory store used by tests and local runs.

use std::sync::Mutex;

use crate::errors::Result;
use crate::graph::{Node, Properties, PropertyValue, Relationship};

use super::GraphStore;

/// A materialized node.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredNode {
    pub id: String,
    pub label: String,
    pub properties: Properties,
}

/// A materialized edge; endpoints were resolved at creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRelationship {
    pub rel_type: String,
    pub start_node_id: String,
    pub end_node_id: String,
    pub properties: Properties,
}

/// In-process [`GraphStore`] with the same observable semantics as the
/// Neo4j backend: upsert keyed by `(label, id)` with property overlay,
/// label-agnostic endpoint matching (one edge per matching endpoint pair),
/// silent drop of dangling relationships, null-valued scalars never stored.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: Vec<StoredNode>,
    relationships: Vec<StoredRelationship>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.inner.lock().expect("store mutex").nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.inner.lock().expect("store mutex").relationships.len()
    }

    /// Snapshot of the stored nodes, in creation order.
    pub fn nodes(&self) -> Vec<StoredNode> {
        self.inner.lock().expect("store mutex").nodes.clone()
    }

    /// Snapshot of the stored edges, in creation order.
    pub fn relationships(&self) -> Vec<StoredRelationship> {
        self.inner.lock().expect("store mutex").relationships.clone()
    }
}

/// Copy of `props` without null-valued entries; a property-graph store
/// cannot hold null property values.
fn non_null(props: Option<&Properties>) -> Properties {
    props
        .map(|p| {
            p.iter()
                .filter(|(_, v)| !matches!(v, PropertyValue::Null))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

impl GraphStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn wipe(&self) -> Result<()> {
        let mut inner = self.inner.lock().expect("store mutex");
        inner.nodes.clear();
        inner.relationships.clear();
        Ok(())
    }

    async fn upsert_nodes(&self, nodes: &[Node]) -> Result<()> {
        let mut inner = self.inner.lock().expect("store mutex");
        for node in nodes {
            let incoming = non_null(node.properties.as_ref());
            match inner
                .nodes
                .iter_mut()
                .find(|stored| stored.id == node.id && stored.label == node.label)
            {
                Some(existing) => existing.properties.extend(incoming),
                None => inner.nodes.push(StoredNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    properties: incoming,
                }),
            }
        }
        Ok(())
    }

    async fn create_relationships(&self, relationships: &[Relationship]) -> Result<()> {
        let mut inner = self.inner.lock().expect("store mutex");
        let Inner {
            nodes,
            relationships: stored,
        } = &mut *inner;

        for rel in relationships {
            let starts = nodes.iter().filter(|n| n.id == rel.start_node_id).count();
            let ends = nodes.iter().filter(|n| n.id == rel.end_node_id).count();

            // No matching endpoint pair means no edge; not an error.
            for _ in 0..starts * ends {
                stored.push(StoredRelationship {
                    rel_type: rel.rel_type.clone(),
                    start_node_id: rel.start_node_id.clone(),
                    end_node_id: rel.end_node_id.clone(),
                    properties: non_null(rel.properties.as_ref()),
                });
            }
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
