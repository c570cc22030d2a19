//! Shared test support: a scripted stand-in for the text-generation service.

#![allow(dead_code)]

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use series_organizer::core::prompts;
use series_organizer::services::llm::{Request, TextGenerator};
use series_organizer::utils::fs::dotted_extension;
use series_organizer::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Answers like a well-behaved model for `Series.SxxEyy` style names.
///
/// - facets are read from `<series>[ ._-]SxxEyy` in the file name
/// - video files with an episode code are episodes, names containing
///   "movie" are movies, everything else is unrelated
/// - the batch judgment is fixed per instance
#[derive(Default)]
pub struct ScriptedService {
    calls: Mutex<HashMap<&'static str, u32>>,
    /// Number of initial calls answered with unparsable output.
    garbage_first: AtomicU32,
    /// Every call fails.
    down: bool,
    /// Answer for the model batch strategy.
    batch_matches: Option<bool>,
    /// Inputs containing this text get an empty series answer.
    poison: Option<String>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }

    pub fn with_garbage_first(self, count: u32) -> Self {
        self.garbage_first.store(count, Ordering::SeqCst);
        self
    }

    pub fn with_batch_answer(mut self, matches: bool) -> Self {
        self.batch_matches = Some(matches);
        self
    }

    pub fn with_poison(mut self, text: &str) -> Self {
        self.poison = Some(text.to_string());
        self
    }

    /// Calls received for one prompt kind.
    pub fn calls(&self, kind: &str) -> u32 {
        self.calls.lock().unwrap().get(kind).copied().unwrap_or(0)
    }

    /// Calls received in total.
    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }

    fn record(&self, kind: &'static str) {
        *self.calls.lock().unwrap().entry(kind).or_insert(0) += 1;
    }

    fn answer(&self, kind: &str, input: &str) -> Value {
        let parsed = parse_name(input);
        match kind {
            "episode" => json!({ "episode": parsed.as_ref().map(|p| p.2) }),
            "season" => json!({ "season": parsed.as_ref().map(|p| p.1) }),
            "series" => {
                if self.poison.as_deref().is_some_and(|p| input.contains(p)) {
                    json!({ "series": "" })
                } else {
                    json!({ "series": parsed.as_ref().map(|p| p.0.clone()) })
                }
            }
            "classify" => json!({ "category": classify(input, parsed.is_some()) }),
            "batch" => match self.batch_matches {
                Some(matches) => json!({ "matches": matches }),
                None => json!({ "verdict": "unsure" }),
            },
            _ => json!({}),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedService {
    async fn generate(&self, request: &Request) -> Result<Value> {
        let kind = prompt_kind(&request.system);
        self.record(kind);

        if self.down {
            return Err(Error::other("connection refused"));
        }

        let remaining = self.garbage_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.garbage_first.store(remaining - 1, Ordering::SeqCst);
            let raw = "Sure! Here is the JSON you asked for".to_string();
            let source = serde_json::from_str::<Value>(&raw).unwrap_err();
            return Err(Error::Parse { source, raw });
        }

        Ok(self.answer(kind, &request.input))
    }
}

fn prompt_kind(system: &str) -> &'static str {
    if system == prompts::EPISODE_PROMPT {
        "episode"
    } else if system == prompts::SEASON_PROMPT {
        "season"
    } else if system == prompts::SERIES_PROMPT {
        "series"
    } else if system == prompts::CLASSIFY_PROMPT {
        "classify"
    } else if system == prompts::BATCH_PROMPT {
        "batch"
    } else {
        "other"
    }
}

/// (series, season, episode) from the last path component.
fn parse_name(input: &str) -> Option<(String, u64, u64)> {
    let name = Path::new(input).file_name()?.to_string_lossy().to_string();
    let re = Regex::new(r"(?i)^(?P<series>.+?)[ ._-]+S(?P<s>\d{1,2})E(?P<e>\d{1,3})").unwrap();
    let caps = re.captures(&name)?;
    let series = caps["series"].replace(['.', '_'], " ").trim().to_string();
    Some((series, caps["s"].parse().ok()?, caps["e"].parse().ok()?))
}

fn classify(input: &str, has_code: bool) -> &'static str {
    let lower = input.to_lowercase();
    // Bare stems count as video names
    let is_video = match dotted_extension(Path::new(&lower)).as_str() {
        "" => true,
        ext => [".mkv", ".mp4", ".avi"].contains(&ext),
    };
    if is_video && lower.contains("movie") {
        "Movie"
    } else if is_video && has_code {
        "Episode"
    } else {
        "Unrelated"
    }
}
