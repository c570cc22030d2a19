//! Rename driver.
//!
//! Walks a directory snapshot. For each directory:
//! 1. with the flat strategy, run the batch check over its files and
//!    leave the directory alone if it already conforms
//! 2. classify each file, skip non-episodes, extract metadata and rename
//!    it according to the selected [`RenameStrategy`]
//! 3. continue with the subdirectories
//!
//! The nested strategy has no directory gate: flat canonical names still
//! need moving, and the planner recognizes files already in place.
//!
//! A failing file is logged and recorded; it never stops the walk.

use crate::core::batch::{BatchChecker, BatchStrategy};
use crate::core::classifier::Classifier;
use crate::core::extractor::MetadataExtractor;
use crate::core::planner::PathPlanner;
use crate::core::scanner::scan_tree;
use crate::generators::filename::episode_filename;
use crate::models::media::{Classification, Details, DirectoryNode};
use crate::services::llm::TextGenerator;
use crate::utils::fs::{dotted_extension, FileSystem};
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How a non-conforming episode is renamed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameStrategy {
    /// Rename in place to `Series SxxEyy.ext`.
    #[default]
    Flat,
    /// Move below `Series/Season NN/`, keeping the file name.
    Nested,
}

impl std::fmt::Display for RenameStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameStrategy::Flat => write!(f, "flat"),
            RenameStrategy::Nested => write!(f, "nested"),
        }
    }
}

/// Renamer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    pub strategy: RenameStrategy,
    pub check: BatchStrategy,
    /// Compute the report without touching the file system.
    pub dry_run: bool,
}

/// One executed (or, in a dry run, planned) rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRecord {
    pub from: PathBuf,
    pub to: PathBuf,
    pub details: Details,
}

/// A file that was left untouched on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// A file whose processing failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameReport {
    pub version: String,
    pub generated_at: String,
    pub root: PathBuf,
    pub strategy: RenameStrategy,
    pub check: BatchStrategy,
    pub dry_run: bool,
    pub renamed: Vec<RenameRecord>,
    /// Directories whose files already conformed.
    pub conforming_dirs: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub failures: Vec<FailedFile>,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileOutcome {
    Renamed(RenameRecord),
    Skipped(String),
}

/// Destinations taken and sources vacated so far in one run.
///
/// Lets a dry run report the same collisions a real run would hit.
#[derive(Debug, Default)]
struct Claims {
    taken: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl Claims {
    fn is_taken(&self, fs: &dyn FileSystem, path: &Path) -> bool {
        self.taken.contains(path) || (fs.exists(path) && !self.vacated.contains(path))
    }

    fn record(&mut self, from: &Path, to: &Path) {
        self.vacated.insert(from.to_path_buf());
        self.taken.insert(to.to_path_buf());
    }
}

/// Rename driver.
pub struct Renamer {
    classifier: Classifier,
    extractor: MetadataExtractor,
    planner: PathPlanner,
    checker: BatchChecker,
    fs: Arc<dyn FileSystem>,
    options: RenameOptions,
}

impl Renamer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        fs: Arc<dyn FileSystem>,
        options: RenameOptions,
    ) -> Self {
        let extractor = MetadataExtractor::new(generator.clone());
        Self {
            classifier: Classifier::new(generator.clone()),
            planner: PathPlanner::new(extractor.clone()),
            checker: BatchChecker::new(generator, options.check),
            extractor,
            fs,
            options,
        }
    }

    /// Scan `root` and process the whole tree.
    pub async fn run(&self, root: &Path) -> Result<RenameReport> {
        let tree = scan_tree(self.fs.as_ref(), root)?;
        Ok(self.process_tree(root, &tree).await)
    }

    /// Process a snapshot. Paths sent to the model are relative to `root`.
    pub async fn process_tree(&self, root: &Path, tree: &DirectoryNode) -> RenameReport {
        let mut report = RenameReport {
            version: "1.0".to_string(),
            generated_at: Utc::now().to_rfc3339(),
            root: root.to_path_buf(),
            strategy: self.options.strategy,
            check: self.options.check,
            dry_run: self.options.dry_run,
            ..Default::default()
        };

        // Depth-first, parents before children, siblings in name order
        let mut claims = Claims::default();
        let mut pending = vec![tree];
        while let Some(node) = pending.pop() {
            self.process_directory(root, node, &mut claims, &mut report).await;
            pending.extend(node.children.iter().rev());
        }

        tracing::info!(
            "Done: {} renamed, {} conforming directories, {} skipped, {} failed",
            report.renamed.len(),
            report.conforming_dirs.len(),
            report.skipped.len(),
            report.failures.len()
        );

        report
    }

    async fn process_directory(
        &self,
        root: &Path,
        node: &DirectoryNode,
        claims: &mut Claims,
        report: &mut RenameReport,
    ) {
        if node.files.is_empty() {
            return;
        }

        if self.options.strategy == RenameStrategy::Flat {
            let labels: Vec<PathBuf> = node.files.iter().map(|f| relative_to(root, f)).collect();
            if self.checker.check(&labels).await {
                tracing::info!("Already organized, skipping: {}", node.path.display());
                report.conforming_dirs.push(node.path.clone());
                return;
            }
        }

        for file in &node.files {
            match self.process_file(root, file, claims).await {
                Ok(FileOutcome::Renamed(record)) => report.renamed.push(record),
                Ok(FileOutcome::Skipped(reason)) => {
                    tracing::debug!("Skipped {}: {}", file.display(), reason);
                    report.skipped.push(SkippedFile {
                        path: file.clone(),
                        reason,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to process {}: {}", file.display(), e);
                    report.failures.push(FailedFile {
                        path: file.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    /// Classify, extract and rename one file.
    async fn process_file(
        &self,
        root: &Path,
        file: &Path,
        claims: &mut Claims,
    ) -> Result<FileOutcome> {
        let label = relative_to(root, file).to_string_lossy().to_string();

        let classification = self.classifier.classify(&label).await;
        if classification != Classification::Episode {
            return Ok(FileOutcome::Skipped(format!("classified as {}", classification)));
        }

        let (details, destination) = match self.options.strategy {
            RenameStrategy::Flat => {
                let details = self.extractor.details(&label).await?;
                let name = episode_filename(&details, &dotted_extension(file));
                (details, file.with_file_name(name))
            }
            RenameStrategy::Nested => {
                let placement = self.planner.plan(file).await?;
                if placement.already_correct {
                    return Ok(FileOutcome::Skipped("already in place".to_string()));
                }
                (placement.details, placement.destination)
            }
        };

        if destination == file {
            return Ok(FileOutcome::Skipped("already canonical".to_string()));
        }
        if claims.is_taken(self.fs.as_ref(), &destination) {
            return Err(crate::Error::FileAlreadyExists(destination.display().to_string()));
        }

        if self.options.dry_run {
            tracing::info!("[dry-run] {} -> {}", file.display(), destination.display());
        } else {
            if let Some(parent) = destination.parent() {
                if !self.fs.exists(parent) {
                    self.fs.create_dir_all(parent)?;
                }
            }
            self.fs.move_file(file, &destination)?;
            tracing::info!("Renamed {} -> {}", file.display(), destination.display());
        }
        claims.record(file, &destination);

        Ok(FileOutcome::Renamed(RenameRecord {
            from: file.to_path_buf(),
            to: destination,
            details,
        }))
    }
}

impl std::fmt::Debug for Renamer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renamer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// `path` relative to `root`, or `path` itself when it is outside `root`.
fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Save a report to a JSON file.
pub fn save_report(report: &RenameReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!("Report saved to {:?}", path);
    Ok(())
}

/// Load a report from a JSON file.
pub fn load_report(path: &Path) -> Result<RenameReport> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
