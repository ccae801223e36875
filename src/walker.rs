//! Source tree traversal with directory pruning.

use crate::types::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Directory names never descended into. Matched before descent, so an
/// excluded subtree is never opened at all.
const EXCLUDED_DIRS: &[&str] = &[
    "__pycache__",
    "bower_components",
    "build",
    "coverage",
    "dist",
    "node_modules",
    "out",
    "target",
    "vendor",
    "venv",
];

/// File extensions handed to the reference extractor.
const SOURCE_EXTENSIONS: &[&str] = &["cjs", "cts", "js", "jsx", "mjs", "mts", "ts", "tsx"];

/// Walks a directory tree, yielding candidate source files.
///
/// The walk is lazy, finite, and non-restartable. Unreadable directories or
/// files are skipped with a warning and never abort the walk; symlinks are
/// followed with ancestor-loop detection so a link cycle is reported once
/// and skipped rather than looping forever.
pub struct SourceScanner {
    root: PathBuf,
}

impl SourceScanner {
    /// Create a scanner rooted at `root`. The root is canonicalized so every
    /// yielded path is absolute.
    pub fn new(root: &Path) -> Result<Self> {
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    /// The canonicalized scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Yield source files under the root, pruning excluded directories.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry))
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file() && has_source_extension(e.path()))
            .map(|e| e.into_path())
    }
}

/// Directories excluded from descent: dependency caches, build output, VCS
/// metadata, and anything dot-prefixed.
fn is_excluded(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}
