//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Category a path falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Movie,
    Episode,
    Unrelated,
}

impl Classification {
    /// Parse a model label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "movie" => Some(Classification::Movie),
            "episode" => Some(Classification::Episode),
            "unrelated" => Some(Classification::Unrelated),
            _ => None,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Movie => write!(f, "Movie"),
            Classification::Episode => write!(f, "Episode"),
            Classification::Unrelated => write!(f, "Unrelated"),
        }
    }
}

/// Extracted episode metadata.
///
/// `season` and `episode` are always in `1..=99` so they render as two
/// zero-padded digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    /// Series title, without year or release decoration.
    pub series: String,
    /// Season number.
    pub season: u8,
    /// Episode number.
    pub episode: u8,
}

/// Snapshot of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Directory path.
    pub path: PathBuf,
    /// Files directly inside the directory, sorted by name.
    pub files: Vec<PathBuf>,
    /// Subdirectories, sorted by name.
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// Number of files in this node and all descendants.
    pub fn total_files(&self) -> usize {
        self.files.len() + self.children.iter().map(|c| c.total_files()).sum::<usize>()
    }

    /// Number of directories including this one.
    pub fn total_dirs(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_dirs()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_from_label() {
        assert_eq!(Classification::from_label("Episode"), Some(Classification::Episode));
        assert_eq!(Classification::from_label(" movie "), Some(Classification::Movie));
        assert_eq!(Classification::from_label("UNRELATED"), Some(Classification::Unrelated));
        assert_eq!(Classification::from_label("Special"), None);
    }

    #[test]
    fn test_directory_node_totals() {
        let node = DirectoryNode {
            path: PathBuf::from("root"),
            files: vec![PathBuf::from("root/a.mkv")],
            children: vec![DirectoryNode {
                path: PathBuf::from("root/sub"),
                files: vec![PathBuf::from("root/sub/b.mkv"), PathBuf::from("root/sub/c.mkv")],
                children: vec![],
            }],
        };
        assert_eq!(node.total_files(), 3);
        assert_eq!(node.total_dirs(), 2);
    }
}
