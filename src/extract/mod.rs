//! Structured extraction oracle boundary.
//!
//! Turns one unit of text into a partial graph constrained to the entity
//! catalog. Implementations signal failure explicitly so the pipeline can
//! skip a chunk and continue with the rest of the batch.

pub mod openai;
pub mod prompt;

use crate::catalog::EntityCatalog;
use crate::errors::Result;
use crate::graph::Graph;

/// Oracle that extracts a partial graph from one unit of text, drawing
/// nodes only from the given closed vocabulary.
#[allow(async_fn_in_trait)]
pub trait ChunkExtractor: Send + Sync {
    async fn extract(&self, text: &str, catalog: &EntityCatalog) -> Result<Graph>;
}
