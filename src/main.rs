use tracing::{error, info};

use loregraph::catalog::demon_slayer;
use loregraph::episodes::wikipedia::WikipediaEpisodeSource;
use loregraph::episodes::EpisodeSource;
use loregraph::extract::openai::{CacheConfig, OpenAiExtractor};
use loregraph::pipeline::Pipeline;
use loregraph::store::neo4j::{Neo4jSettings, Neo4jStore};
use loregraph::store::{loader, GraphStore};
use loregraph::types::PipelineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Tracing ───────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("loregraph=info".parse()?),
        )
        .init();

    info!("loregraph starting");

    // ── Config ────────────────────────────────────────────────────────────────
    let config = PipelineConfig::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    // ── Collect ───────────────────────────────────────────────────────────────
    let source = WikipediaEpisodeSource::new(config.episode_urls.clone());
    let episodes = source.fetch().await?;
    anyhow::ensure!(!episodes.is_empty(), "no episode data collected");
    info!(episodes = episodes.len(), "episodes collected");

    tokio::fs::create_dir_all(&config.output_dir).await?;
    let raw_path = config.output_dir.join("raw_episodes.json");
    tokio::fs::write(&raw_path, serde_json::to_string_pretty(&episodes)?).await?;
    info!(path = %raw_path.display(), "raw episodes saved");

    // ── Extract and merge ─────────────────────────────────────────────────────
    let extractor = OpenAiExtractor::new(
        config.openai_api_key.clone(),
        config.model_name.clone(),
        CacheConfig::default(),
    );
    let pipeline = Pipeline::new(
        extractor,
        demon_slayer::catalog(),
        demon_slayer::korean_names(),
    );
    let graph = pipeline.build_graph(&episodes).await?;

    let graph_path = config.output_dir.join("knowledge_graph.json");
    tokio::fs::write(&graph_path, graph.to_json_pretty()?).await?;
    info!(
        path = %graph_path.display(),
        nodes = graph.nodes.len(),
        relationships = graph.relationships.len(),
        "merged graph saved"
    );

    // ── Load ──────────────────────────────────────────────────────────────────
    let store = Neo4jStore::connect(&Neo4jSettings {
        uri: config.neo4j_uri.clone(),
        user: config.neo4j_user.clone(),
        password: config.neo4j_password.clone(),
        database: config.neo4j_database.clone(),
    })
    .await?;

    let result = loader::load(&graph, &store).await;
    store.close().await?;

    if !result.is_success() {
        anyhow::bail!(
            "graph load failed: {}",
            result
                .error
                .unwrap_or_else(|| "unknown store error".to_string())
        );
    }

    info!(
        nodes = result.node_count,
        relationships = result.relationship_count,
        "graph load succeeded"
    );
    Ok(())
}
