//! Ollama preflight check.

use super::CheckResult;
use crate::services::ollama::{OllamaClient, OllamaConfig};

/// Check that Ollama is running and the configured model is pulled.
pub async fn check(config: &OllamaConfig) -> CheckResult {
    let client = match OllamaClient::with_config(config.clone()) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::fail("Ollama", &format!("client error: {}", e), "Check OLLAMA_HOST")
        }
    };

    match client.health_check().await {
        Ok(true) => match client.list_models().await {
            Ok(models) => {
                let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
                if has_model(&names, &config.model) {
                    CheckResult::ok(
                        "Ollama",
                        &format!("running at {} (model: {})", config.base_url, config.model),
                    )
                } else {
                    CheckResult::fail(
                        "Ollama",
                        &format!("model {} not available (models: {})", config.model, names.join(", ")),
                        &format!("Pull the model: ollama pull {}", config.model),
                    )
                }
            }
            Err(_) => CheckResult::ok("Ollama", "running"),
        },
        Ok(false) | Err(_) => CheckResult::fail(
            "Ollama",
            &format!("not running at {}", config.base_url),
            "Start Ollama: ollama serve",
        ),
    }
}

/// Ollama reports `name:tag`; a bare configured name means `:latest`.
fn has_model(available: &[&str], wanted: &str) -> bool {
    available.iter().any(|name| {
        *name == wanted || (!wanted.contains(':') && *name == format!("{}:latest", wanted))
    })
}
