//! Folder name generator.

use super::filename::sanitize_filename;
use crate::models::media::Details;
use std::path::PathBuf;

/// Generate season folder name.
///
/// Format: `Season ${seasonNr2}`
pub fn season_folder(season: u8) -> String {
    format!("Season {:02}", season)
}

/// Generate series folder name.
pub fn series_folder(series: &str) -> String {
    sanitize_filename(series)
}

/// Relative location a file belongs at, keeping its own file name.
///
/// Format: `${series}/Season ${seasonNr2}/${fileName}`
pub fn canonical_suffix(details: &Details, file_name: &str) -> PathBuf {
    PathBuf::from(series_folder(&details.series))
        .join(season_folder(details.season))
        .join(file_name)
}
