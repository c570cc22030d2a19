//! Episode metadata extraction.
//!
//! Series, season and episode are three independent model calls, each
//! with its own prompt and few-shot set. Every answer is validated before
//! it is trusted; validation failures propagate to the caller.

use crate::core::prompts;
use crate::models::media::Details;
use crate::services::llm::{Request, TextGenerator};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// Highest season or episode number that still renders as two digits.
pub const MAX_NUMBER: u64 = 99;

/// Extracts series, season and episode from noisy paths.
#[derive(Clone)]
pub struct MetadataExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl MetadataExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Extract the episode number.
    pub async fn extract_episode(&self, path: &str) -> Result<u8> {
        let request = Request::new(prompts::EPISODE_PROMPT, path, prompts::episode_examples());
        let response = self.generator.generate(&request).await?;
        let episode = number_field(&response, "episode")?;
        tracing::debug!("Episode of '{}': {}", path, episode);
        Ok(episode)
    }

    /// Extract the series name.
    pub async fn extract_series(&self, path: &str) -> Result<String> {
        let request = Request::new(prompts::SERIES_PROMPT, path, prompts::series_examples());
        let response = self.generator.generate(&request).await?;
        let series = response
            .get("series")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::validation("series not found"))?
            .to_string();
        tracing::debug!("Series of '{}': {}", path, series);
        Ok(series)
    }

    /// Extract the season number.
    pub async fn extract_season(&self, path: &str) -> Result<u8> {
        let request = Request::new(prompts::SEASON_PROMPT, path, prompts::season_examples());
        let response = self.generator.generate(&request).await?;
        let season = number_field(&response, "season")?;
        tracing::debug!("Season of '{}': {}", path, season);
        Ok(season)
    }

    /// Extract all three facets.
    pub async fn details(&self, path: &str) -> Result<Details> {
        let series = self.extract_series(path).await?;
        let season = self.extract_season(path).await?;
        let episode = self.extract_episode(path).await?;
        Ok(Details {
            series,
            season,
            episode,
        })
    }
}

impl std::fmt::Debug for MetadataExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataExtractor").finish_non_exhaustive()
    }
}

/// Read a positive two-digit number from `field`.
///
/// Models answer with either a JSON number or a numeric string.
fn number_field(response: &Value, field: &str) -> Result<u8> {
    let value = match response.get(field) {
        None | Some(Value::Null) => {
            return Err(Error::validation(format!("{} not found", field)));
        }
        Some(value) => value,
    };

    let number = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::validation(format!("{} not a number", field)))?;

    if number == 0 || number > MAX_NUMBER {
        return Err(Error::validation(format!("{} out of range: {}", field, number)));
    }
    Ok(number as u8)
}
