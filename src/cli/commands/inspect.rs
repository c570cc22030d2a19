//! Inspect command implementation.
//!
//! Shows the classification, extracted metadata and planned destinations
//! for one file without changing anything.

use crate::core::classifier::Classifier;
use crate::core::extractor::MetadataExtractor;
use crate::core::planner::PathPlanner;
use crate::generators::filename::episode_filename;
use crate::models::config::Config;
use crate::models::media::Classification;
use crate::services;
use crate::utils::fs::dotted_extension;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Inspect a single file.
pub async fn inspect(config: &Config, path: &Path) -> Result<()> {
    let generator = services::pipeline(config)?;
    let classifier = Classifier::new(generator.clone());
    let extractor = MetadataExtractor::new(generator);
    let planner = PathPlanner::new(extractor.clone());

    let label = path.to_string_lossy();
    println!("{} {}", "[INSPECT]".bold().cyan(), label);

    let classification = classifier.classify(&label).await;
    println!("  {} {}", "Classification:".bold(), classification);
    if classification != Classification::Episode {
        return Ok(());
    }

    let details = extractor.details(&label).await?;
    println!("  {} {}", "Series:".bold(), details.series);
    println!("  {} {:02}", "Season:".bold(), details.season);
    println!("  {} {:02}", "Episode:".bold(), details.episode);
    println!(
        "  {} {}",
        "Flat name:".bold(),
        episode_filename(&details, &dotted_extension(path))
    );

    let placement = planner.plan(path).await?;
    println!("  {} {}", "Nested path:".bold(), placement.destination.display());
    if placement.already_correct {
        println!("  {}", "Already in place".green());
    }

    Ok(())
}
