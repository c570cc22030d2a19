//! Configuration model.
//!
//! Values are layered: built-in defaults, then `config.toml` in the user
//! config directory, then environment variables, then CLI flags.

use crate::core::batch::BatchStrategy;
use crate::core::renamer::RenameStrategy;
use crate::services::ollama::OllamaConfig;
use crate::services::retry::DEFAULT_MAX_ATTEMPTS;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ollama configuration.
    pub ollama: OllamaConfig,
    /// Attempts per model request before giving up.
    pub max_attempts: u32,
    /// Optional bound on the per-run response cache.
    pub cache_capacity: Option<usize>,
    /// Root directory of the media library.
    pub root: PathBuf,
    /// Subfolder of `root` selecting the scope of a run.
    pub subfolder: Option<PathBuf>,
    /// How non-conforming files are renamed.
    pub strategy: RenameStrategy,
    /// How a directory is judged already conforming.
    pub check: BatchStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama: OllamaConfig::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cache_capacity: None,
            root: PathBuf::from("."),
            subfolder: None,
            strategy: RenameStrategy::default(),
            check: BatchStrategy::default(),
        }
    }
}

impl Config {
    /// Directory a run operates on.
    pub fn scope(&self) -> PathBuf {
        match &self.subfolder {
            Some(sub) => self.root.join(sub),
            None => self.root.clone(),
        }
    }

    /// Overlay environment variables on top of this configuration.
    ///
    /// - `OLLAMA_HOST`, `OLLAMA_MODEL`, `OLLAMA_TIMEOUT`
    /// - `ORGANIZER_ROOT`: library root
    /// - `ORGANIZER_SUBFOLDER`: subfolder of the root to process
    /// - `ORGANIZER_MAX_ATTEMPTS`: retry bound per model request
    pub fn apply_env(&mut self) {
        self.ollama.apply_env();

        if let Ok(root) = std::env::var("ORGANIZER_ROOT") {
            self.root = PathBuf::from(root);
        }
        if let Ok(sub) = std::env::var("ORGANIZER_SUBFOLDER") {
            self.subfolder = Some(PathBuf::from(sub));
        }
        if let Some(attempts) = std::env::var("ORGANIZER_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.max_attempts = attempts;
        }
    }
}

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("series_organizer")
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Parse a config file. Missing keys take their defaults.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from file (if present) and the environment.
///
/// An explicitly given path must exist; the default path is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(p) => {
            if !p.exists() {
                return Err(crate::Error::PathNotFound(p.display().to_string()));
            }
            load_config_file(p)?
        }
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                tracing::debug!("Loading config from {}", default_path.display());
                load_config_file(&default_path)?
            } else {
                Config::default()
            }
        }
    };

    config.apply_env();
    Ok(config)
}
