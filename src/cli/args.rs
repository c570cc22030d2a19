//! Command line argument definitions.

use crate::core::batch::BatchStrategy;
use crate::core::renamer::RenameStrategy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Series Organizer - Rename TV episodes into a canonical layout with AI
#[derive(Parser, Debug)]
#[command(name = "series-organizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Config file (default: <config dir>/series_organizer/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rename episodes below a library directory
    Rename {
        /// Library root (default: ORGANIZER_ROOT or config)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        /// Subfolder of the root to process
        #[arg(short, long, value_name = "SUBFOLDER")]
        subfolder: Option<PathBuf>,

        /// Rename policy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// How directories are judged already organized
        #[arg(long, value_enum)]
        check: Option<CheckArg>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,

        /// Write a JSON report of the run
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Check whether the files in a directory are already organized
    Check {
        /// Directory to check
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// How the directory is judged
        #[arg(long, value_enum)]
        check: Option<CheckArg>,
    },

    /// Show how a single file would be handled
    Inspect {
        /// File to inspect
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

/// Rename policy.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// Rename in place to "Series SxxEyy.ext"
    Flat,
    /// Move into "Series/Season NN/" keeping the file name
    Nested,
}

impl From<StrategyArg> for RenameStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Flat => RenameStrategy::Flat,
            StrategyArg::Nested => RenameStrategy::Nested,
        }
    }
}

/// Batch conformance check.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckArg {
    /// Match every name against a pattern derived from the first file
    Pattern,
    /// Let the model judge the whole directory
    Model,
}

impl From<CheckArg> for BatchStrategy {
    fn from(arg: CheckArg) -> Self {
        match arg {
            CheckArg::Pattern => BatchStrategy::Pattern,
            CheckArg::Model => BatchStrategy::Model,
        }
    }
}
