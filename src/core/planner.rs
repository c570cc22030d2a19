//! Nested destination planning.
//!
//! A file belongs at `{dir}/{series}/Season {NN}/{file name}` where `dir`
//! is the directory it currently sits in. The file name itself is kept.
//!
//! Only the immediate directory is considered: an already-correct series
//! or season folder higher up the tree is not reused, so running the
//! planner on `Show/Season 01/extra/x.mkv` nests again below `extra`.

use crate::core::extractor::MetadataExtractor;
use crate::generators::folder::canonical_suffix;
use crate::models::media::Details;
use crate::utils::fs::file_stem;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Where a file should live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Metadata the placement was derived from.
    pub details: Details,
    /// Planned destination, beneath the file's current directory.
    pub destination: PathBuf,
    /// Whether the file already sits at a matching location.
    pub already_correct: bool,
}

/// Computes canonical nested destinations.
#[derive(Debug, Clone)]
pub struct PathPlanner {
    extractor: MetadataExtractor,
}

impl PathPlanner {
    pub fn new(extractor: MetadataExtractor) -> Self {
        Self { extractor }
    }

    /// Extract metadata once and derive the full placement.
    pub async fn plan(&self, file: &Path) -> Result<Placement> {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::other(format!("No file name in {}", file.display())))?;

        let details = self.extractor.details(&file_stem(file)).await?;
        let suffix = canonical_suffix(&details, &file_name);
        let parent = file.parent().unwrap_or_else(|| Path::new(""));

        Ok(Placement {
            destination: parent.join(&suffix),
            already_correct: file.ends_with(&suffix),
            details,
        })
    }

    /// Canonical destination for `file`.
    pub async fn plan_path(&self, file: &Path) -> Result<PathBuf> {
        Ok(self.plan(file).await?.destination)
    }

    /// Whether `file` already ends with its canonical `series/season/name` suffix.
    pub async fn is_already_correct(&self, file: &Path) -> Result<bool> {
        Ok(self.plan(file).await?.already_correct)
    }
}
