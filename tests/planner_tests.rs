//! Integration tests for nested path planning and classification.
//!
//! Tests cover:
//! - Planned destinations for canonical names
//! - Suffix-based "already correct" detection
//! - Classification fallback on service failure

mod common;

use common::ScriptedService;
use series_organizer::core::classifier::Classifier;
use series_organizer::core::extractor::MetadataExtractor;
use series_organizer::core::planner::PathPlanner;
use series_organizer::models::media::Classification;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn planner(service: Arc<ScriptedService>) -> PathPlanner {
    PathPlanner::new(MetadataExtractor::new(service))
}

#[tokio::test]
async fn test_plan_path_for_canonical_name() {
    let planner = planner(Arc::new(ScriptedService::new()));
    let planned = planner.plan_path(Path::new("Show S02E20.mkv")).await.unwrap();
    assert_eq!(planned, PathBuf::from("Show/Season 02/Show S02E20.mkv"));
}

#[tokio::test]
async fn test_plan_path_keeps_original_file_name() {
    let planner = planner(Arc::new(ScriptedService::new()));
    let planned = planner
        .plan_path(Path::new("/tv/incoming/The.Expanse.S03E07.720p.mkv"))
        .await
        .unwrap();
    assert_eq!(
        planned,
        PathBuf::from("/tv/incoming/The Expanse/Season 03/The.Expanse.S03E07.720p.mkv")
    );
}

#[tokio::test]
async fn test_is_already_correct() {
    let planner = planner(Arc::new(ScriptedService::new()));
    assert!(planner
        .is_already_correct(Path::new("Show/Season 01/Show S01E01.mkv"))
        .await
        .unwrap());
    assert!(planner
        .is_already_correct(Path::new("/tv/Show/Season 01/Show S01E01.mkv"))
        .await
        .unwrap());
    assert!(!planner
        .is_already_correct(Path::new("Show S01E01.mkv"))
        .await
        .unwrap());
    assert!(!planner
        .is_already_correct(Path::new("Show/Season 02/Show S01E01.mkv"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_planning_uses_the_stem_only() {
    let service = Arc::new(ScriptedService::new());
    planner(service.clone())
        .plan(Path::new("/very/long/Parent Folder/Show S01E01.mkv"))
        .await
        .unwrap();
    assert_eq!(service.calls("series"), 1);
    assert_eq!(service.calls("season"), 1);
    assert_eq!(service.calls("episode"), 1);
}

#[tokio::test]
async fn test_planning_fails_without_metadata() {
    let planner = planner(Arc::new(ScriptedService::new()));
    assert!(planner.plan_path(Path::new("notes.txt")).await.is_err());
}

#[tokio::test]
async fn test_classify_falls_back_to_unrelated() {
    let classifier = Classifier::new(Arc::new(ScriptedService::down()));
    assert_eq!(classifier.classify(".DS_Store").await, Classification::Unrelated);
    assert_eq!(
        classifier.classify("Show S01E01.mkv").await,
        Classification::Unrelated
    );
}

#[tokio::test]
async fn test_classify_categories() {
    let classifier = Classifier::new(Arc::new(ScriptedService::new()));
    assert_eq!(classifier.classify("Show S01E01.mkv").await, Classification::Episode);
    assert_eq!(
        classifier.classify("Show/Show The Movie.mkv").await,
        Classification::Movie
    );
    assert_eq!(classifier.classify("Show/poster.jpg").await, Classification::Unrelated);
}
