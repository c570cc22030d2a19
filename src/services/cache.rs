//! Per-run response cache.
//!
//! Repeated requests within one run (the same file classified by the batch
//! check and again by the driver, for instance) are answered from memory.
//! The cache is created once per run and shared through an `Arc`; it is
//! never persisted.
//!
//! Only successful answers are stored. A request that exhausted its
//! retries is asked again the next time it comes up.
//!
//! The store is mutex-guarded, but two concurrent misses on the same key
//! both reach the service. The organizer runs strictly sequentially.

use super::llm::{Request, TextGenerator};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Entries {
    values: HashMap<String, Value>,
    /// Insertion order, used for eviction when bounded.
    order: VecDeque<String>,
}

/// Keyed store of request → parsed response.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<Entries>,
    capacity: Option<usize>,
}

impl ResponseCache {
    /// Unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` entries; the oldest entry is evicted first.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Mutex::default(),
            capacity: Some(capacity.max(1)),
        }
    }

    pub fn get(&self, request: &Request) -> Result<Option<Value>> {
        let key = request.cache_key()?;
        Ok(self.lock().values.get(&key).cloned())
    }

    pub fn has(&self, request: &Request) -> Result<bool> {
        let key = request.cache_key()?;
        Ok(self.lock().values.contains_key(&key))
    }

    pub fn set(&self, request: &Request, value: Value) -> Result<()> {
        let key = request.cache_key()?;
        let mut entries = self.lock();

        if entries.values.insert(key.clone(), value).is_none() {
            entries.order.push_back(key);
        }
        if let Some(capacity) = self.capacity {
            while entries.values.len() > capacity {
                match entries.order.pop_front() {
                    Some(oldest) => {
                        entries.values.remove(&oldest);
                    }
                    None => break,
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.values.clear();
        entries.order.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Entries are plain values; a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Caching decorator.
#[derive(Debug, Clone)]
pub struct Cached<G> {
    inner: G,
    cache: Arc<ResponseCache>,
}

impl<G: TextGenerator> Cached<G> {
    pub fn new(inner: G, cache: Arc<ResponseCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for Cached<G> {
    async fn generate(&self, request: &Request) -> Result<Value> {
        if let Some(value) = self.cache.get(request)? {
            tracing::debug!("Cache hit for '{}'", request.input);
            return Ok(value);
        }

        let value = self.inner.generate(request).await?;
        self.cache.set(request, value.clone())?;
        Ok(value)
    }
}
