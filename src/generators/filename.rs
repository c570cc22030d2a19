//! Filename generator.

use crate::models::media::Details;

/// Generate the canonical episode filename.
///
/// Format: `${series} S${seasonNr2}E${episodeNr2}${ext}`
///
/// `extension` is appended as given, so it should carry its leading dot
/// (or be empty for files without one).
pub fn episode_filename(details: &Details, extension: &str) -> String {
    format!("{}{}", episode_stem(details), extension)
}

/// Canonical episode name without extension.
pub fn episode_stem(details: &Details) -> String {
    format!(
        "{} S{:02}E{:02}",
        sanitize_filename(&details.series),
        details.season,
        details.episode
    )
}

/// Sanitize a string for use in filenames.
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
