//! Path classification (Movie / Episode / Unrelated).
//!
//! Classification gates the more expensive extraction, so [`Classifier::classify`]
//! never fails: any error maps to [`Classification::Unrelated`].

use crate::core::prompts;
use crate::error::FailClosed;
use crate::models::media::Classification;
use crate::services::llm::{Request, TextGenerator};
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// Classifies paths via the text-generation service.
#[derive(Clone)]
pub struct Classifier {
    generator: Arc<dyn TextGenerator>,
}

impl Classifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Classify a path, falling back to `Unrelated` on any failure.
    pub async fn classify(&self, path: &str) -> Classification {
        let classification = self
            .try_classify(path)
            .await
            .fail_closed(Classification::Unrelated, &format!("Classifying '{}'", path));
        tracing::debug!("Classified '{}' as {}", path, classification);
        classification
    }

    /// Classify a path, surfacing failures.
    pub async fn try_classify(&self, path: &str) -> Result<Classification> {
        let request = Request::new(prompts::CLASSIFY_PROMPT, path, prompts::classify_examples());
        let response = self.generator.generate(&request).await?;

        let label = response
            .get("category")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::validation("category not found"))?;
        Classification::from_label(label)
            .ok_or_else(|| Error::validation(format!("unknown category: {}", label)))
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Answer(Result<Value>);

    #[async_trait]
    impl TextGenerator for Answer {
        async fn generate(&self, _request: &Request) -> Result<Value> {
            match &self.0 {
                Ok(value) => Ok(value.clone()),
                Err(_) => Err(Error::other("service unavailable")),
            }
        }
    }

    fn classifier(answer: Result<Value>) -> Classifier {
        Classifier::new(Arc::new(Answer(answer)))
    }

    #[tokio::test]
    async fn test_classify_episode() {
        let c = classifier(Ok(json!({"category": "Episode"})));
        assert_eq!(c.classify("Show S01E01.mkv").await, Classification::Episode);
    }

    #[tokio::test]
    async fn test_classify_falls_back_on_service_error() {
        let c = classifier(Err(Error::other("down")));
        assert_eq!(c.classify(".DS_Store").await, Classification::Unrelated);
        assert!(c.try_classify(".DS_Store").await.is_err());
    }

    #[tokio::test]
    async fn test_classify_falls_back_on_bad_answer() {
        let missing = classifier(Ok(json!({"type": "Episode"})));
        assert_eq!(missing.classify("a.mkv").await, Classification::Unrelated);

        let unknown = classifier(Ok(json!({"category": "Special"})));
        assert_eq!(unknown.classify("a.mkv").await, Classification::Unrelated);
        assert!(matches!(
            unknown.try_classify("a.mkv").await,
            Err(Error::Validation(_))
        ));
    }
}
