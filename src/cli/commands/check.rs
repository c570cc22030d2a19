//! Check command implementation.

use crate::core::batch::BatchChecker;
use crate::models::config::Config;
use crate::services;
use crate::utils::fs::{FileSystem, OsFileSystem};
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Report whether the files directly inside `dir` are already organized.
pub async fn check(config: &Config, dir: &Path) -> Result<()> {
    let entries = OsFileSystem.read_dir(dir)?;
    let labels: Vec<PathBuf> = entries
        .files
        .iter()
        .map(|f| f.strip_prefix(dir).map(Path::to_path_buf).unwrap_or_else(|_| f.clone()))
        .collect();

    println!(
        "{} {} ({} files, {} check)",
        "[CHECK]".bold().cyan(),
        dir.display(),
        labels.len(),
        config.check
    );

    let checker = BatchChecker::new(services::pipeline(config)?, config.check);
    if checker.check(&labels).await {
        println!("{}", "[OK] Already organized".bold().green());
    } else {
        println!("{}", "[RENAME] Needs renaming".bold().yellow());
    }

    Ok(())
}
