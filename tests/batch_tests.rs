//! Integration tests for the batch conformance check.
//!
//! Tests cover:
//! - Vacuous truth for empty batches
//! - Pattern strategy on canonical and decorated names
//! - Model strategy answers and malformed answers
//! - Fail-closed behaviour when the service is unavailable

mod common;

use common::ScriptedService;
use series_organizer::core::batch::{BatchChecker, BatchStrategy};
use series_organizer::Error;
use std::path::PathBuf;
use std::sync::Arc;

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn checker(service: Arc<ScriptedService>, strategy: BatchStrategy) -> BatchChecker {
    BatchChecker::new(service, strategy)
}

#[tokio::test]
async fn test_empty_batch_conforms_without_service_calls() {
    for strategy in [BatchStrategy::Pattern, BatchStrategy::Model] {
        let service = Arc::new(ScriptedService::down());
        assert!(checker(service.clone(), strategy).check(&[]).await);
        assert_eq!(service.total_calls(), 0);
    }
}

#[tokio::test]
async fn test_pattern_accepts_canonical_stems() {
    let service = Arc::new(ScriptedService::new());
    let batch = paths(&["X S01E03", "X S01E04", "X S01E05"]);

    assert!(checker(service.clone(), BatchStrategy::Pattern).check(&batch).await);

    // Only the first file is consulted
    assert_eq!(service.calls("classify"), 1);
    assert_eq!(service.calls("series"), 1);
    assert_eq!(service.calls("season"), 1);
    assert_eq!(service.calls("episode"), 0);
}

#[tokio::test]
async fn test_pattern_accepts_canonical_files_with_extensions() {
    let service = Arc::new(ScriptedService::new());
    let batch = paths(&[
        "Breaking Bad/Season 01/Breaking Bad S01E01.mkv",
        "Breaking Bad/Season 01/Breaking Bad S01E02.mkv",
    ]);
    assert!(checker(service, BatchStrategy::Pattern).check(&batch).await);
}

#[tokio::test]
async fn test_pattern_rejects_release_annotations() {
    let service = Arc::new(ScriptedService::new());
    let batch = paths(&[
        "X.S01E03.1080p.WEB-DL.DDP5.1.x264-GRP.mkv",
        "X.S01E04.1080p.WEB-DL.DDP5.1.x264-GRP.mkv",
    ]);
    assert!(!checker(service, BatchStrategy::Pattern).check(&batch).await);
}

#[tokio::test]
async fn test_pattern_rejects_stray_files() {
    let service = Arc::new(ScriptedService::new());
    let batch = paths(&["X S01E01.mkv", "X S01E02.mkv", "output.txt"]);
    assert!(!checker(service, BatchStrategy::Pattern).check(&batch).await);
}

#[tokio::test]
async fn test_pattern_rejects_when_first_file_is_not_an_episode() {
    let service = Arc::new(ScriptedService::new());
    let batch = paths(&[".DS_Store", "X S01E01.mkv"]);

    assert!(!checker(service.clone(), BatchStrategy::Pattern).check(&batch).await);
    assert_eq!(service.calls("series"), 0);
}

#[tokio::test]
async fn test_model_strategy_uses_answer() {
    let yes = Arc::new(ScriptedService::new().with_batch_answer(true));
    let no = Arc::new(ScriptedService::new().with_batch_answer(false));
    let batch = paths(&["X S01E01.mkv", "X S01E02.mkv"]);

    assert!(checker(yes.clone(), BatchStrategy::Model).check(&batch).await);
    assert!(!checker(no, BatchStrategy::Model).check(&batch).await);
    assert_eq!(yes.calls("batch"), 1);
}

#[tokio::test]
async fn test_model_strategy_requires_matches_field() {
    let service = Arc::new(ScriptedService::new());
    let batch = paths(&["X S01E01.mkv"]);
    let checker = checker(service, BatchStrategy::Model);

    assert!(matches!(
        checker.check_model(&batch).await,
        Err(Error::Validation(_))
    ));
    assert!(!checker.check(&batch).await);
}

#[tokio::test]
async fn test_service_failure_fails_closed() {
    for strategy in [BatchStrategy::Pattern, BatchStrategy::Model] {
        let service = Arc::new(ScriptedService::down());
        let batch = paths(&["X S01E01.mkv", "X S01E02.mkv"]);
        assert!(!checker(service, strategy).check(&batch).await);
    }
}
