//! OpenAI-backed extraction oracle.
//!
//! Uses `async-openai` for API calls, `moka` for response caching, and
//! `backoff` for exponential-backoff retry on rate limits / transient errors.

use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use moka::future::Cache;
use serde_json::json;
use tracing::{debug, warn};

use crate::catalog::EntityCatalog;
use crate::errors::{ExtractionError, PipelineError, Result};
use crate::graph::Graph;

use super::{prompt, ChunkExtractor};

// ── Cache configuration ───────────────────────────────────────────────────────

/// Configuration for the in-process response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries held in memory.
    pub max_capacity: u64,
    /// How long each entry lives before eviction.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1_000,
            ttl: Duration::from_secs(3_600), // 1 hour
        }
    }
}

// ── Client struct ─────────────────────────────────────────────────────────────

/// OpenAI extraction client implementing [`ChunkExtractor`].
///
/// One synopsis maps to one chat-completions call with a JSON-schema
/// response format derived from [`Graph`], so the reply parses directly
/// into the data model.
pub struct OpenAiExtractor {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    /// Keyed by `md5(model + prompt)`, value is the raw response payload.
    cache: Cache<String, String>,
}

impl OpenAiExtractor {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key` – OpenAI secret key.
    /// * `model`   – Model name (e.g. `"gpt-4.1"`).
    /// * `cache_config` – Cache capacity and TTL.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        cache_config: CacheConfig,
    ) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        let client = async_openai::Client::with_config(config);

        let cache = Cache::builder()
            .max_capacity(cache_config.max_capacity)
            .time_to_live(cache_config.ttl)
            .build();

        Self {
            client,
            model: model.into(),
            temperature: 0.0,
            max_tokens: 8_192,
            cache,
        }
    }

    /// Override the sampling temperature (default `0.0`).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the max output token limit (default `8192`).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Compute an MD5 cache key from model + prompt.
    fn cache_key(&self, prompt: &str) -> String {
        use md5::{Digest, Md5};
        let mut h = Md5::new();
        h.update(self.model.as_bytes());
        h.update(prompt.as_bytes());
        format!("{:x}", h.finalize())
    }

    /// Call the chat completions endpoint with exponential-backoff retry.
    ///
    /// Retries on [`ExtractionError::RateLimit`] (HTTP 429) and transient
    /// 5xx errors.
    async fn call_with_retry(&self, request: serde_json::Value) -> Result<serde_json::Value> {
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(500))
            .with_max_interval(Duration::from_secs(60))
            .with_max_elapsed_time(Some(Duration::from_secs(300)))
            .build();

        backoff::future::retry(backoff, || async {
            let outcome: std::result::Result<serde_json::Value, async_openai::error::OpenAIError> =
                self.client.chat().create_byot(request.clone()).await;

            match outcome {
                Ok(response) => Ok(response),
                Err(e) => {
                    let err = map_openai_error(e);
                    match &err {
                        ExtractionError::RateLimit => {
                            warn!("OpenAI rate limit hit, retrying with backoff");
                            Err(backoff::Error::transient(err))
                        }
                        ExtractionError::Api { status, .. } if *status >= 500 => {
                            warn!("OpenAI transient server error ({}), retrying", status);
                            Err(backoff::Error::transient(err))
                        }
                        _ => Err(backoff::Error::permanent(err)),
                    }
                }
            }
        })
        .await
        .map_err(PipelineError::Extraction)
    }

    /// Extract the assistant message payload from a chat-completions response.
    fn extract_content(response: &serde_json::Value) -> Result<String> {
        let message = &response["choices"][0]["message"];
        if message["refusal"].as_str().is_some() {
            return Err(PipelineError::Extraction(ExtractionError::Refusal));
        }
        message["content"]
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or(PipelineError::Extraction(ExtractionError::EmptyResponse))
    }
}

// ── ChunkExtractor implementation ─────────────────────────────────────────────

impl ChunkExtractor for OpenAiExtractor {
    async fn extract(&self, text: &str, catalog: &EntityCatalog) -> Result<Graph> {
        let prompt = prompt::build_prompt(text, catalog);
        let key = self.cache_key(&prompt);

        if let Some(cached) = self.cache.get(&key).await {
            debug!("extraction cache hit");
            return parse_graph(&cached);
        }

        // Constrain the model output to the Graph schema.
        let schema = schemars::schema_for!(Graph);
        let schema_value = serde_json::to_value(&schema)?;

        let request = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "graph",
                    "schema": schema_value,
                    "strict": true,
                }
            }
        });

        let response = self.call_with_retry(request).await?;
        let content = Self::extract_content(&response)?;

        self.cache.insert(key, content.clone()).await;

        parse_graph(&content)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse the model's JSON payload into a [`Graph`].
fn parse_graph(content: &str) -> Result<Graph> {
    serde_json::from_str(content)
        .map_err(|e| PipelineError::Extraction(ExtractionError::Malformed(e.to_string())))
}

/// Map an [`async_openai::error::OpenAIError`] to our [`ExtractionError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> ExtractionError {
    use async_openai::error::OpenAIError;

    match err {
        OpenAIError::ApiError(api_err) => {
            let status = api_err.status.unwrap_or(0);
            match status {
                401 | 403 => ExtractionError::Authentication,
                429 => ExtractionError::RateLimit,
                other => ExtractionError::Api {
                    status: other,
                    message: api_err.message,
                },
            }
        }
        other => ExtractionError::Api {
            status: 0,
            message: other.to_string(),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
