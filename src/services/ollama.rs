//! Ollama chat API client.
//!
//! Configuration can be set via environment variables:
//! - `OLLAMA_HOST`: Ollama service URL (default: http://localhost:11434)
//! - `OLLAMA_MODEL`: Model to use (default: qwen2.5:7b)
//! - `OLLAMA_TIMEOUT`: Request timeout in seconds (default: 300)
//!
//! Every user turn ends with an opening ```` ```json ```` fence and the
//! service is told to stop at the closing fence, so the completion should
//! be a bare JSON document.

use super::llm::{Request, TextGenerator};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "qwen2.5:7b";
// CPU inference on a 7B model can take several minutes
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Marker appended to every user turn.
pub const FENCE_OPEN: &str = "```json";
/// Stop sequence; generation ends before the closing fence.
pub const FENCE_CLOSE: &str = "```";

/// Ollama client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Sampling temperature. Left unset so retries can produce different output.
    pub temperature: Option<f32>,
}

impl OllamaConfig {
    /// Overlay environment variables on top of this configuration.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            self.base_url = host;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            self.model = model;
        }
        if let Some(timeout) = std::env::var("OLLAMA_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.timeout_secs = timeout;
        }
    }

    fn builtin() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: None,
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Ollama API client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    config: OllamaConfig,
    client: reqwest::Client,
}

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: Role,
    content: String,
}

/// Options for generation.
#[derive(Debug, Serialize)]
struct ChatOptions {
    stop: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat request payload.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

/// Chat response.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: String,
}

/// Models list response.
#[derive(Debug, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// Model information.
#[derive(Debug, Deserialize)]
pub struct ModelInfo {
    pub name: String,
}

impl OllamaClient {
    /// Create a new Ollama client with custom configuration.
    pub fn with_config(config: OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Check if Ollama service is available.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url());
        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// List available models.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/api/tags", self.base_url());
        let resp: ModelsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.models)
    }

    /// Send one chat exchange and return the raw completion text.
    pub async fn chat(&self, request: &Request) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url());
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: build_messages(request),
            stream: false,
            options: ChatOptions {
                stop: vec![FENCE_CLOSE.to_string()],
                temperature: self.config.temperature,
            },
        };

        let resp: ChatResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.message.content)
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, request: &Request) -> Result<Value> {
        tracing::debug!("Chat request for input: {}", request.input);
        let content = self.chat(request).await?;
        tracing::debug!("Chat response: {}", content);
        parse_completion(&content)
    }
}

/// Append the opening fence to a user turn.
fn fenced(input: &str) -> String {
    format!("{}\n{}", input, FENCE_OPEN)
}

/// Flatten system prompt, few-shot examples and input into chat turns.
fn build_messages(request: &Request) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(request.examples.len() * 2 + 2);
    messages.push(ChatMessage {
        role: Role::System,
        content: request.system.clone(),
    });
    for example in &request.examples {
        messages.push(ChatMessage {
            role: Role::User,
            content: fenced(&example.input),
        });
        messages.push(ChatMessage {
            role: Role::Assistant,
            content: example.output.clone(),
        });
    }
    messages.push(ChatMessage {
        role: Role::User,
        content: fenced(&request.input),
    });
    messages
}

/// Parse a completion as JSON after fence handling.
///
/// A model may echo the opening fence or ignore the stop sequence, so a
/// leading fence is stripped and anything after a closing fence is dropped.
pub fn parse_completion(content: &str) -> Result<Value> {
    let mut body = content.trim();
    if let Some(rest) = body.strip_prefix(FENCE_OPEN) {
        body = rest;
    } else if let Some(rest) = body.strip_prefix(FENCE_CLOSE) {
        body = rest;
    }
    if let Some(end) = body.find(FENCE_CLOSE) {
        body = &body[..end];
    }

    serde_json::from_str(body.trim()).map_err(|source| Error::Parse {
        source,
        raw: content.to_string(),
    })
}
