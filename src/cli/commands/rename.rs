//! Rename command implementation.
//!
//! Scans the configured scope, renames non-conforming episodes and
//! optionally writes a JSON report.

use crate::core::renamer::{self, RenameOptions, RenameReport, Renamer};
use crate::models::config::Config;
use crate::services;
use crate::utils::fs::OsFileSystem;
use crate::Result;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

/// Run the rename command.
pub async fn rename(config: &Config, dry_run: bool, report_path: Option<&Path>) -> Result<()> {
    let scope = config.scope();

    println!("{}", "[RENAME] Organizing episodes...".bold().cyan());
    println!("  {} {}", "Directory:".bold(), scope.display());
    println!("  {} {}", "Strategy:".bold(), config.strategy);
    println!("  {} {}", "Check:".bold(), config.check);
    if dry_run {
        println!("  {}", "Dry run: no files will be moved".yellow());
    }
    println!();

    let generator = services::pipeline(config)?;
    let options = RenameOptions {
        strategy: config.strategy,
        check: config.check,
        dry_run,
    };
    let renamer = Renamer::new(generator, Arc::new(OsFileSystem), options);
    let report = renamer.run(&scope).await?;

    print_summary(&report);

    if let Some(path) = report_path {
        renamer::save_report(&report, path)?;
        println!(
            "{} {}",
            "[OK] Report saved to:".bold().green(),
            path.display()
        );
    }

    Ok(())
}

/// Print a run summary.
pub fn print_summary(report: &RenameReport) {
    println!();
    for record in &report.renamed {
        println!(
            "  {} {} -> {}",
            "->".green(),
            record.from.display(),
            record.to.display()
        );
    }
    for failure in &report.failures {
        println!(
            "  {} {}: {}",
            "[FAIL]".red(),
            failure.path.display(),
            failure.error
        );
    }

    println!();
    let verb = if report.dry_run { "Would rename" } else { "Renamed" };
    println!("{}", "[Summary]".bold().yellow());
    println!("  {}: {}", verb, report.renamed.len());
    println!("  Already organized directories: {}", report.conforming_dirs.len());
    println!("  Skipped files: {}", report.skipped.len());
    println!("  Failed files: {}", report.failures.len());
}
