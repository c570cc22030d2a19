//! Directory scanner module.
//!
//! Builds an immutable [`DirectoryNode`] snapshot of a directory tree.
//! Every file is listed; deciding what is an episode is left to the
//! classifier.

use crate::models::media::DirectoryNode;
use crate::utils::fs::FileSystem;
use crate::Result;
use std::path::Path;

/// Scan `path` recursively.
///
/// Subdirectories that cannot be read are logged and left out of the
/// snapshot; the root itself must be a readable directory.
pub fn scan_tree(fs: &dyn FileSystem, path: &Path) -> Result<DirectoryNode> {
    if !fs.exists(path) {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !fs.is_dir(path) {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }

    let node = scan_node(fs, path)?;

    tracing::info!(
        "Scanned {}: {} files in {} directories",
        path.display(),
        node.total_files(),
        node.total_dirs()
    );

    Ok(node)
}

fn scan_node(fs: &dyn FileSystem, path: &Path) -> Result<DirectoryNode> {
    let entries = fs.read_dir(path)?;

    let mut children = Vec::with_capacity(entries.dirs.len());
    for dir in &entries.dirs {
        match scan_node(fs, dir) {
            Ok(child) => children.push(child),
            Err(e) => tracing::warn!("Failed to scan {}: {}", dir.display(), e),
        }
    }

    Ok(DirectoryNode {
        path: path.to_path_buf(),
        files: entries.files,
        children,
    })
}
