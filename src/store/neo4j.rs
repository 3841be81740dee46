//! Neo4j-backed store.
//!
//! Uses `neo4rs` for async, pooled Bolt connections. Writes are batched with
//! `UNWIND`, grouped per label (node upserts) and per relationship type
//! (edge creation), since Cypher cannot parameterize labels.

use neo4rs::{query, BoltList, BoltMap, BoltString, BoltType, ConfigBuilder};
use tracing::{debug, info};

use crate::errors::{PipelineError, Result};
use crate::graph::{Node, Properties, PropertyValue, Relationship};

use super::GraphStore;

/// Connection settings for a Neo4j backend.
#[derive(Debug, Clone)]
pub struct Neo4jSettings {
    /// Connection URI (e.g. `neo4j://127.0.0.1:7687`).
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Database selector; `None` uses the server default.
    pub database: Option<String>,
}

/// Neo4j implementation of [`GraphStore`].
pub struct Neo4jStore {
    graph: neo4rs::Graph,
}

impl Neo4jStore {
    /// Connect to the backend described by `settings`.
    pub async fn connect(settings: &Neo4jSettings) -> Result<Self> {
        let mut builder = ConfigBuilder::default()
            .uri(&settings.uri)
            .user(&settings.user)
            .password(&settings.password);
        if let Some(db) = &settings.database {
            builder = builder.db(db.as_str());
        }
        let config = builder.build().map_err(store_err)?;

        let graph = neo4rs::Graph::connect(config).await.map_err(store_err)?;
        info!(uri = %settings.uri, "connected to Neo4j");
        Ok(Self { graph })
    }
}

impl GraphStore for Neo4jStore {
    async fn ping(&self) -> Result<()> {
        self.graph.run(query("RETURN 1")).await.map_err(store_err)
    }

    async fn wipe(&self) -> Result<()> {
        debug!("wiping target database");
        self.graph
            .run(query("MATCH (n) DETACH DELETE n"))
            .await
            .map_err(store_err)
    }

    async fn upsert_nodes(&self, nodes: &[Node]) -> Result<()> {
        for (label, batch) in group_by(nodes, |n| n.label.as_str()) {
            let cypher = format!(
                "UNWIND $rows AS row MERGE (n:`{}` {{id: row.id}}) SET n += row.props",
                escape_backticks(label)
            );
            debug!(label, rows = batch.len(), "upserting nodes");
            self.graph
                .run(query(&cypher).param("rows", node_rows(&batch)))
                .await
                .map_err(store_err)?;
        }
        Ok(())
    }

    async fn create_relationships(&self, relationships: &[Relationship]) -> Result<()> {
        for (rel_type, batch) in group_by(relationships, |r| r.rel_type.as_str()) {
            // Endpoints match on the id property alone; a row whose endpoints
            // match nothing simply creates no edge.
            let cypher = format!(
                "UNWIND $rows AS row \
                 MATCH (a {{id: row.start_id}}), (b {{id: row.end_id}}) \
                 CREATE (a)-[r:`{}`]->(b) SET r += row.props",
                escape_backticks(rel_type)
            );
            debug!(rel_type, rows = batch.len(), "creating relationships");
            self.graph
                .run(query(&cypher).param("rows", relationship_rows(&batch)))
                .await
                .map_err(store_err)?;
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        // neo4rs tears the pool down on drop.
        Ok(())
    }
}

fn store_err(e: neo4rs::Error) -> PipelineError {
    PipelineError::Store(e.to_string())
}

/// Group items by key, preserving first-seen key order and per-key item
/// order. Batches stay small here (one graph per run), so the linear scan
/// is fine.
fn group_by<'a, T>(items: &'a [T], key: fn(&'a T) -> &'a str) -> Vec<(&'a str, Vec<&'a T>)> {
    let mut groups: Vec<(&str, Vec<&T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

fn escape_backticks(name: &str) -> String {
    name.replace('`', "``")
}

fn node_rows(nodes: &[&Node]) -> BoltType {
    let rows = nodes
        .iter()
        .map(|node| {
            let mut row = BoltMap::new();
            row.put(BoltString::from("id"), BoltType::from(node.id.as_str()));
            row.put(
                BoltString::from("props"),
                props_to_bolt(node.properties.as_ref()),
            );
            BoltType::Map(row)
        })
        .collect();
    BoltType::List(BoltList { value: rows })
}

fn relationship_rows(relationships: &[&Relationship]) -> BoltType {
    let rows = relationships
        .iter()
        .map(|rel| {
            let mut row = BoltMap::new();
            row.put(
                BoltString::from("start_id"),
                BoltType::from(rel.start_node_id.as_str()),
            );
            row.put(
                BoltString::from("end_id"),
                BoltType::from(rel.end_node_id.as_str()),
            );
            row.put(
                BoltString::from("props"),
                props_to_bolt(rel.properties.as_ref()),
            );
            BoltType::Map(row)
        })
        .collect();
    BoltType::List(BoltList { value: rows })
}

/// Convert a property map to a Bolt map, dropping null-valued entries
/// (Cypher cannot store null properties).
fn props_to_bolt(props: Option<&Properties>) -> BoltType {
    let mut map = BoltMap::new();
    if let Some(props) = props {
        for (key, value) in props {
            let bolt = match value {
                PropertyValue::Null => continue,
                PropertyValue::Bool(b) => BoltType::from(*b),
                PropertyValue::Int(i) => BoltType::from(*i),
                PropertyValue::Float(f) => BoltType::from(*f),
                PropertyValue::Text(s) => BoltType::from(s.as_str()),
            };
            map.put(BoltString::from(key.as_str()), bolt);
        }
    }
    BoltType::Map(map)
}
