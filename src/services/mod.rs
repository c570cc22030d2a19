//! External services.

pub mod cache;
pub mod llm;
pub mod ollama;
pub mod retry;

use crate::models::config::Config;
use crate::Result;
use cache::{Cached, ResponseCache};
use llm::TextGenerator;
use ollama::OllamaClient;
use retry::Retrying;
use std::sync::Arc;

/// The request path used for every model call: cache, then retry, then client.
pub type Pipeline<G> = Cached<Retrying<G>>;

/// Stack the retry loop and a cache on top of any generator.
pub fn layer<G: TextGenerator>(client: G, max_attempts: u32, cache: Arc<ResponseCache>) -> Pipeline<G> {
    Cached::new(Retrying::with_attempts(client, max_attempts), cache)
}

/// Build the Ollama-backed pipeline for one run.
pub fn pipeline(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    let client = OllamaClient::with_config(config.ollama.clone())?;
    let cache = Arc::new(match config.cache_capacity {
        Some(capacity) => ResponseCache::bounded(capacity),
        None => ResponseCache::new(),
    });
    Ok(Arc::new(layer(client, config.max_attempts, cache)))
}
