//! Shared configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Wikipedia page listing the first season's episodes, the default chunk
/// source.
const DEFAULT_EPISODE_URL: &str =
    "https://en.wikipedia.org/wiki/Demon_Slayer:_Kimetsu_no_Yaiba_season_1";

/// Central configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    /// Neo4j connection URI (e.g. `neo4j://127.0.0.1:7687`).
    #[validate(length(min = 1))]
    pub neo4j_uri: String,

    /// Neo4j username.
    pub neo4j_user: String,

    /// Neo4j password.
    #[validate(length(min = 1))]
    pub neo4j_password: String,

    /// Database selector; server default when unset.
    pub neo4j_database: Option<String>,

    /// OpenAI API key.
    #[validate(length(min = 1))]
    pub openai_api_key: String,

    /// Extraction model name.
    pub model_name: String,

    /// Season pages to scrape, in order.
    #[validate(length(min = 1))]
    pub episode_urls: Vec<String>,

    /// Directory receiving the run's JSON artifacts.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            neo4j_uri: "neo4j://127.0.0.1:7687".to_string(),
            neo4j_user: "neo4j".to_string(),
            neo4j_password: String::new(),
            neo4j_database: None,
            openai_api_key: String::new(),
            model_name: "gpt-4.1".to_string(),
            episode_urls: vec![DEFAULT_EPISODE_URL.to_string()],
            output_dir: PathBuf::from("output"),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` first (non-fatal if `.env` is absent),
    /// then reads each variable from the process environment. Required
    /// variables (`NEO4J_PASSWORD`, `OPENAI_API_KEY`) return a
    /// [`crate::PipelineError::Validation`] error when absent or empty.
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let neo4j_uri = std::env::var("NEO4J_URI")
            .unwrap_or_else(|_| "neo4j://127.0.0.1:7687".to_string());

        let neo4j_user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());

        let neo4j_password = std::env::var("NEO4J_PASSWORD").map_err(|_| {
            crate::PipelineError::Validation("NEO4J_PASSWORD is required".to_string())
        })?;

        let neo4j_database = std::env::var("NEO4J_DATABASE").ok();

        let openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            crate::PipelineError::Validation("OPENAI_API_KEY is required".to_string())
        })?;

        let model_name = std::env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-4.1".to_string());

        let episode_urls = match std::env::var("EPISODE_URLS") {
            Ok(val) => val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => vec![DEFAULT_EPISODE_URL.to_string()],
        };

        let output_dir = std::env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output"));

        let config = Self {
            neo4j_uri,
            neo4j_user,
            neo4j_password,
            neo4j_database,
            openai_api_key,
            model_name,
            episode_urls,
            output_dir,
        };

        config
            .validate()
            .map_err(|e| crate::PipelineError::Validation(e.to_string()))?;

        Ok(config)
    }
}
