//! Per-run orchestration: extraction, stamping, localization, merging.

use tracing::{info, warn};

use crate::catalog::{EntityCatalog, NameLocalizer};
use crate::episodes::Episode;
use crate::errors::{PipelineError, Result};
use crate::extract::ChunkExtractor;
use crate::graph::merge::combine_graphs;
use crate::graph::{Graph, Properties, PropertyValue};

/// Drives one batch run: every episode synopsis through the extraction
/// oracle, per-chunk post-processing, then the merge.
pub struct Pipeline<X> {
    extractor: X,
    catalog: EntityCatalog,
    localizer: NameLocalizer,
}

impl<X: ChunkExtractor> Pipeline<X> {
    pub fn new(extractor: X, catalog: EntityCatalog, localizer: NameLocalizer) -> Self {
        Self {
            extractor,
            catalog,
            localizer,
        }
    }

    /// Extract a partial graph per episode and merge them.
    ///
    /// Episodes without a synopsis and episodes whose extraction fails are
    /// skipped; the run only fails when no episode yields a usable graph.
    ///
    /// Relationship stamping and name localization happen per chunk, before
    /// the merge, so the dedup key sees the localized property values.
    pub async fn build_graph(&self, episodes: &[Episode]) -> Result<Graph> {
        let mut partials = Vec::new();

        for episode in episodes {
            let number = episode.number();
            let Some(synopsis) = episode.synopsis.as_deref() else {
                info!(episode = %number, "no synopsis, skipping");
                continue;
            };

            info!(episode = %number, "extracting");
            let mut partial = match self.extractor.extract(synopsis, &self.catalog).await {
                Ok(graph) => graph,
                Err(e) => {
                    warn!(episode = %number, error = %e, "extraction failed, skipping episode");
                    continue;
                }
            };

            stamp_episode_number(&mut partial, &number);
            self.localizer.localize_graph(&mut partial);
            partials.push(partial);
        }

        if partials.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        info!(chunks = partials.len(), "merging partial graphs");
        Ok(combine_graphs(partials))
    }
}

/// Tag every relationship with the episode it was extracted from.
fn stamp_episode_number(graph: &mut Graph, number: &str) {
    for rel in &mut graph.relationships {
        rel.properties
            .get_or_insert_with(Properties::new)
            .insert(
                "episode_number".to_string(),
                PropertyValue::Text(number.to_string()),
            );
    }
}
