//! File system utilities.
//!
//! The organizer only touches the disk through [`FileSystem`], so the
//! driver can be exercised against a temporary tree or a dry run.

use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Immediate entries of a directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirEntries {
    /// Regular files, sorted by name.
    pub files: Vec<PathBuf>,
    /// Subdirectories, sorted by name.
    pub dirs: Vec<PathBuf>,
}

/// File system capability used by the organizer.
pub trait FileSystem: Send + Sync {
    /// List the immediate entries of `dir`.
    fn read_dir(&self, dir: &Path) -> Result<DirEntries>;

    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Move a file from one location to another.
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
}

/// The real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, dir: &Path) -> Result<DirEntries> {
        ensure_directory(dir)?;

        let mut entries = DirEntries::default();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                entries.dirs.push(entry.into_path());
            } else if entry.file_type().is_file() {
                entries.files.push(entry.into_path());
            }
        }
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        create_dir_all(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        move_file(from, to)
    }
}

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Create a directory and all parent directories.
pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Move a file from one location to another.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    // Try rename first (fast, same filesystem)
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    // Fall back to copy + delete (cross filesystem)
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)?;
    Ok(())
}

/// Extensions kept when a file is renamed.
const MEDIA_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "flv", "webm", "m4v", "ts", "m2ts", "mpg", "mpeg", "rmvb",
    "srt", "ass", "ssa", "sub", "idx", "vtt",
];

/// Extension of a media or subtitle file, as written.
///
/// Anything else after the last dot (`Show.S01E01`, `Mr. Robot S01E01`)
/// is part of the name, not an extension.
fn media_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_string();
    MEDIA_EXTENSIONS
        .contains(&ext.to_lowercase().as_str())
        .then_some(ext)
}

/// Get the media extension including the leading dot, or "" if there is none.
pub fn dotted_extension(path: &Path) -> String {
    media_extension(path)
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

/// Get the file name without its media extension.
pub fn file_stem(path: &Path) -> String {
    let stem = match media_extension(path) {
        Some(_) => path.file_stem(),
        None => path.file_name(),
    };
    stem.map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension(Path::new("Show S01E01.mkv")), ".mkv");
        assert_eq!(dotted_extension(Path::new("dir/Show.S01E01.MP4")), ".MP4");
        assert_eq!(dotted_extension(Path::new("README")), "");
        assert_eq!(dotted_extension(Path::new("Show.S01E01")), "");
        assert_eq!(dotted_extension(Path::new("notes.txt")), "");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("a/b/Show S01E01.mkv")), "Show S01E01");
        assert_eq!(file_stem(Path::new(".DS_Store")), ".DS_Store");
        assert_eq!(file_stem(Path::new("Show.S01E01")), "Show.S01E01");
        assert_eq!(file_stem(Path::new("Mr. Robot S01E01")), "Mr. Robot S01E01");
        assert_eq!(file_stem(Path::new("Show S01E05.en.srt")), "Show S01E05.en");
    }

    #[test]
    fn test_read_dir_separates_files_and_dirs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.mkv"), "x").unwrap();
        fs::write(temp_dir.path().join("a.mkv"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("Season 01")).unwrap();
        fs::write(temp_dir.path().join("Season 01").join("nested.mkv"), "x").unwrap();

        let entries = OsFileSystem.read_dir(temp_dir.path()).unwrap();

        assert_eq!(
            entries.files,
            vec![temp_dir.path().join("a.mkv"), temp_dir.path().join("b.mkv")]
        );
        assert_eq!(entries.dirs, vec![temp_dir.path().join("Season 01")]);
    }

    #[test]
    fn test_read_dir_on_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.mkv");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            OsFileSystem.read_dir(&file),
            Err(crate::Error::NotADirectory(_))
        ));
    }

    #[test]
    fn test_move_file() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("old.mkv");
        let to = temp_dir.path().join("new.mkv");
        fs::write(&from, "content").unwrap();

        move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "content");
    }
}
