//! Canonical-name to evidence-path index.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Accumulates which files reference each canonical package name.
///
/// Append-only for the duration of the extraction phase, then handed by
/// shared reference to the report assembler. A path appears at most once
/// per name; names keep the order they were first recorded in.
#[derive(Debug, Default)]
pub struct OccurrenceIndex {
    entries: HashMap<String, BTreeSet<PathBuf>>,
    order: Vec<String>,
}

impl OccurrenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `file` into the set for `name`, creating the entry if absent.
    /// Idempotent under repeated identical calls. Returns true when the name
    /// was seen for the first time.
    pub fn record(&mut self, name: &str, file: &Path) -> bool {
        match self.entries.get_mut(name) {
            Some(files) => {
                files.insert(file.to_path_buf());
                false
            }
            None => {
                let mut files = BTreeSet::new();
                files.insert(file.to_path_buf());
                self.entries.insert(name.to_string(), files);
                self.order.push(name.to_string());
                true
            }
        }
    }

    /// Names in first-discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Files recorded for a name, sorted by path.
    pub fn files(&self, name: &str) -> Option<&BTreeSet<PathBuf>> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
