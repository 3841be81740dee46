//! Property-graph store boundary.
//!
//! Defines the [`GraphStore`] trait all backends satisfy, the Neo4j and
//! in-memory implementations, and the loader that writes a merged graph.

pub mod loader;
pub mod memory;
pub mod neo4j;

use crate::errors::Result;
use crate::graph::{Node, Relationship};

/// Write interface of a property-graph backend.
///
/// Operations take whole batches; backends keep the per-item semantics:
/// node upsert is keyed by `(label, id)` and overlays properties,
/// relationship creation always appends a new edge and silently skips
/// relationships whose endpoint ids match no stored node.
#[allow(async_fn_in_trait)]
pub trait GraphStore: Send + Sync {
    /// Health check: verify connectivity to the backend.
    async fn ping(&self) -> Result<()>;

    /// Delete every node and relationship in the store.
    async fn wipe(&self) -> Result<()>;

    /// Upsert nodes by `(label, id)`: create missing ones, overlay the
    /// properties of existing ones. Idempotent per node.
    async fn upsert_nodes(&self, nodes: &[Node]) -> Result<()>;

    /// Create one new edge per relationship whose endpoints resolve by id.
    /// Never merges with existing edges; dangling endpoints drop the edge
    /// without an error.
    async fn create_relationships(&self, relationships: &[Relationship]) -> Result<()>;

    /// Close the connection pool / session.
    async fn close(&self) -> Result<()>;
}
