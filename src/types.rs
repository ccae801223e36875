//! Core types and errors for the dependency confusion scanner.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during scanning.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("parse error in {}: {}", .file.display(), .message)]
    ParseError { file: PathBuf, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// A raw module specifier lifted from one import/require site.
///
/// Produced once per static import, dynamic import, require call, or
/// re-export found in a file; consumed immediately by classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    /// The specifier text exactly as written in the source.
    pub text: String,
    /// The file the reference was found in.
    pub source_file: PathBuf,
}

/// Package ecosystems whose registries can be probed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    PyPi,
    RubyGems,
    Go,
    Maven,
    Docker,
    Crates,
}

impl Ecosystem {
    /// Infer the ecosystem from a candidate file's stem.
    ///
    /// Manifest-parsing collaborators emit one candidate file per ecosystem,
    /// named after it (`npm.potential`, `pip.potential`, ...).
    pub fn from_file_stem(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        // Collaborators may prefix the stem with the target name
        // ("acme-corp-npm.potential"); the ecosystem is the last dash segment.
        let tag = stem.rsplit('-').next().unwrap_or(stem);
        tag.parse().ok()
    }
}

impl std::str::FromStr for Ecosystem {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pip" | "pypi" => Ok(Self::PyPi),
            "gem" | "rubygems" => Ok(Self::RubyGems),
            "go" => Ok(Self::Go),
            "maven" => Ok(Self::Maven),
            "docker" => Ok(Self::Docker),
            "rust" | "crates" => Ok(Self::Crates),
            other => Err(ScanError::ConfigError(format!(
                "unknown ecosystem: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Npm => "npm",
            Self::PyPi => "pypi",
            Self::RubyGems => "rubygems",
            Self::Go => "go",
            Self::Maven => "maven",
            Self::Docker => "docker",
            Self::Crates => "crates.io",
        };
        f.write_str(name)
    }
}

/// Availability of a package name in its public registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The registry has no entry for the name. This is the vulnerability
    /// condition: anyone can register it and misconfigured tooling will
    /// pull it in.
    Available,
    /// The registry answered with something other than 404.
    Taken,
    /// The probe itself failed (transport, DNS, timeout).
    Error,
}

/// Outcome of probing one canonical name against its registry.
///
/// Exactly one per distinct name per run; immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    pub name: String,
    pub ecosystem: Ecosystem,
    pub status: ProbeStatus,
    /// Human-readable failure description for `Error` results.
    pub detail: Option<String>,
}

impl ProbeResult {
    pub fn is_available(&self) -> bool {
        self.status == ProbeStatus::Available
    }
}

/// Complete result of one scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Canonicalized root directory that was scanned.
    pub root: String,
    /// Source files walked and handed to the extractor.
    pub files_scanned: usize,
    /// Files that failed to parse and contributed zero references.
    pub parse_failures: usize,
    /// Raw references extracted before classification.
    pub references_found: usize,
    /// Distinct canonical names queued for probing.
    pub names_probed: usize,
    /// One entry per probed name, in discovery order.
    pub results: Vec<ProbeResult>,
    /// Scan duration in seconds.
    pub duration_secs: f64,
    /// Non-fatal errors encountered during the run.
    pub errors: Vec<String>,
}

impl ScanResult {
    /// Count of names the registry reported no entry for.
    pub fn available_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_available()).count()
    }
}
