//! Request model shared by every text-generation layer.
//!
//! The client, the retry loop and the response cache all implement
//! [`TextGenerator`], so they stack as decorators:
//! `Cached<Retrying<OllamaClient>>`.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One few-shot exchange shown to the model before the real input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
}

impl Example {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// A single call to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    /// System prompt describing the task and the expected JSON shape.
    pub system: String,
    /// User input (usually a file path).
    pub input: String,
    /// Few-shot examples, in the order they are sent.
    pub examples: Vec<Example>,
}

impl Request {
    pub fn new(system: impl Into<String>, input: impl Into<String>, examples: Vec<Example>) -> Self {
        Self {
            system: system.into(),
            input: input.into(),
            examples,
        }
    }

    /// Canonical cache key: the serialized `(system, input, examples)` tuple.
    pub fn cache_key(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Anything that can turn a [`Request`] into a parsed JSON value.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &Request) -> Result<Value>;
}

#[async_trait]
impl<G: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<G> {
    async fn generate(&self, request: &Request) -> Result<Value> {
        (**self).generate(request).await
    }
}
