//! Batch conformance check.
//!
//! Decides whether a set of sibling files already follows the canonical
//! `Series SxxEyy` naming, in which case the directory can be left alone.
//! Any failure counts as "not conforming" so the files get processed.

use crate::core::classifier::Classifier;
use crate::core::extractor::MetadataExtractor;
use crate::core::prompts;
use crate::error::FailClosed;
use crate::generators::filename::sanitize_filename;
use crate::models::media::Classification;
use crate::services::llm::{Request, TextGenerator};
use crate::utils::fs::file_stem;
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How a batch is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStrategy {
    /// Derive a pattern from the first file's metadata and match every stem.
    #[default]
    Pattern,
    /// Ask the model to judge the whole list at once.
    Model,
}

impl std::fmt::Display for BatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStrategy::Pattern => write!(f, "pattern"),
            BatchStrategy::Model => write!(f, "model"),
        }
    }
}

/// Batch-format checker.
#[derive(Clone)]
pub struct BatchChecker {
    generator: Arc<dyn TextGenerator>,
    classifier: Classifier,
    extractor: MetadataExtractor,
    strategy: BatchStrategy,
}

impl BatchChecker {
    pub fn new(generator: Arc<dyn TextGenerator>, strategy: BatchStrategy) -> Self {
        Self {
            classifier: Classifier::new(generator.clone()),
            extractor: MetadataExtractor::new(generator.clone()),
            generator,
            strategy,
        }
    }

    /// `true` when every path already has a canonical name.
    ///
    /// An empty batch conforms. Errors resolve to `false`.
    pub async fn check(&self, paths: &[PathBuf]) -> bool {
        if paths.is_empty() {
            return true;
        }

        let result = match self.strategy {
            BatchStrategy::Pattern => self.check_pattern(paths).await,
            BatchStrategy::Model => self.check_model(paths).await,
        };
        result.fail_closed(false, "Batch check")
    }

    /// Pattern strategy, surfacing failures.
    ///
    /// Series and season come from the first file only; the other files
    /// just have to match the naming shape derived from it.
    pub async fn check_pattern(&self, paths: &[PathBuf]) -> Result<bool> {
        let Some(first) = paths.first() else {
            return Ok(true);
        };
        let first_label = first.to_string_lossy();

        if self.classifier.try_classify(&first_label).await? != Classification::Episode {
            tracing::debug!("'{}' is not an episode; batch does not conform", first_label);
            return Ok(false);
        }

        let series = self.extractor.extract_series(&first_label).await?;
        let season = self.extractor.extract_season(&first_label).await?;
        let pattern = canonical_pattern(&series, season)?;

        Ok(all_stems_match(&pattern, paths))
    }

    /// Model strategy, surfacing failures.
    pub async fn check_model(&self, paths: &[PathBuf]) -> Result<bool> {
        let listing: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        let input = serde_json::to_string(&listing)?;

        let request = Request::new(prompts::BATCH_PROMPT, input, prompts::batch_examples());
        let response = self.generator.generate(&request).await?;

        response
            .get("matches")
            .and_then(Value::as_bool)
            .ok_or_else(|| Error::validation("matches not found"))
    }
}

impl std::fmt::Debug for BatchChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchChecker")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Anchored pattern for canonical stems of one series and season.
///
/// The series is sanitized the same way generated names are.
pub fn canonical_pattern(series: &str, season: u8) -> Result<Regex> {
    let series = sanitize_filename(series);
    let pattern = format!(r"^{} S{:02}E\d{{2}}$", regex::escape(&series), season);
    Regex::new(&pattern).map_err(|e| Error::other(format!("Invalid pattern {}: {}", pattern, e)))
}

/// Whether every file stem matches `pattern`.
pub fn all_stems_match(pattern: &Regex, paths: &[PathBuf]) -> bool {
    paths.iter().all(|path| stem_matches(pattern, path))
}

fn stem_matches(pattern: &Regex, path: &Path) -> bool {
    let stem = file_stem(path);
    let matched = pattern.is_match(&stem);
    if !matched {
        tracing::debug!("'{}' does not match {}", stem, pattern.as_str());
    }
    matched
}
