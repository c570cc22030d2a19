//! Preflight checks module.

mod ollama;

use crate::models::config::Config;
use colored::Colorize;
use std::path::Path;

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Run all preflight checks.
///
/// `library` is the directory a run will organize, if any.
pub async fn run_preflight_checks(config: &Config, library: Option<&Path>) -> Vec<CheckResult> {
    let mut results = vec![ollama::check(&config.ollama).await];
    if let Some(path) = library {
        results.push(library_check(path));
    }
    results
}

/// Check that the directory to organize exists.
fn library_check(path: &Path) -> CheckResult {
    match crate::utils::fs::ensure_directory(path) {
        Ok(()) => CheckResult::ok("Library", &path.display().to_string()),
        Err(e) => CheckResult::fail(
            "Library",
            &e.to_string(),
            "Pass a root directory or set ORGANIZER_ROOT",
        ),
    }
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        if result.success {
            println!(
                "{} {}: {}",
                "[OK]".green(),
                result.name.bold(),
                result.message
            );
        } else {
            println!(
                "{} {}: {}",
                "[FAIL]".red(),
                result.name.bold(),
                result.message
            );
            if let Some(ref hint) = result.hint {
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Check if all preflight checks passed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}
