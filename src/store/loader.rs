//! Writing a merged graph into a store.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::Result;
use crate::graph::Graph;

use super::GraphStore;

/// Outcome status of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadStatus {
    Success,
    Failure,
}

/// Result of one load: status plus submitted counts, and the error text
/// when the load aborted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    pub status: LoadStatus,
    /// Nodes submitted to the store (not necessarily materialized).
    pub node_count: usize,
    /// Relationships submitted to the store (dangling ones never attach).
    pub relationship_count: usize,
    pub error: Option<String>,
}

impl LoadResult {
    pub fn is_success(&self) -> bool {
        self.status == LoadStatus::Success
    }
}

/// Replace the store contents with `graph`.
///
/// Order is fixed: wipe the store, upsert every node, then create every
/// relationship. Node upserts are idempotent; relationship creation is not,
/// so a second load without the wipe doubles the edge set.
///
/// A store error at any step aborts the load and is reported as a
/// `Failure` result; writes already applied stay in place. No transaction
/// wraps the reset-then-write sequence.
pub async fn load<S: GraphStore>(graph: &Graph, store: &S) -> LoadResult {
    let node_count = graph.nodes.len();
    let relationship_count = graph.relationships.len();

    match run_steps(graph, store).await {
        Ok(()) => {
            info!(node_count, relationship_count, "graph load complete");
            LoadResult {
                status: LoadStatus::Success,
                node_count,
                relationship_count,
                error: None,
            }
        }
        Err(e) => LoadResult {
            status: LoadStatus::Failure,
            node_count,
            relationship_count,
            error: Some(e.to_string()),
        },
    }
}

async fn run_steps<S: GraphStore>(graph: &Graph, store: &S) -> Result<()> {
    store.wipe().await?;
    store.upsert_nodes(&graph.nodes).await?;
    store.create_relationships(&graph.relationships).await?;
    Ok(())
}
