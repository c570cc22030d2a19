//! Bounded retry loop around a text generator.
//!
//! Model output is non-deterministic, so a malformed answer is usually
//! fixed by asking again. The request is never varied between attempts
//! and no delay is applied.

use super::llm::{Request, TextGenerator};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Default number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// Retrying decorator.
#[derive(Debug, Clone)]
pub struct Retrying<G> {
    inner: G,
    max_attempts: u32,
}

impl<G: TextGenerator> Retrying<G> {
    pub fn new(inner: G) -> Self {
        Self::with_attempts(inner, DEFAULT_MAX_ATTEMPTS)
    }

    /// A bound of zero is treated as one attempt.
    pub fn with_attempts(inner: G, max_attempts: u32) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for Retrying<G> {
    async fn generate(&self, request: &Request) -> Result<Value> {
        let mut last = None;

        for attempt in 1..=self.max_attempts {
            match self.inner.generate(request).await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!("Succeeded on attempt {}/{}", attempt, self.max_attempts);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    match &e {
                        Error::Parse { raw, .. } => tracing::warn!(
                            "Attempt {}/{} for '{}' returned unparsable output: {:?}",
                            attempt,
                            self.max_attempts,
                            request.input,
                            raw
                        ),
                        other => tracing::warn!(
                            "Attempt {}/{} for '{}' failed: {}",
                            attempt,
                            self.max_attempts,
                            request.input,
                            other
                        ),
                    }
                    last = Some(e);
                }
            }
        }

        Err(Error::RetryExhausted {
            attempts: self.max_attempts,
            last: Box::new(last.unwrap_or_else(|| Error::other("no attempt was made"))),
        })
    }
}
