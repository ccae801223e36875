//! confuscan - dependency confusion exposure scanner.
//!
//! This library detects source-tree references to package names that no
//! public registry knows about, the precondition for a dependency confusion
//! attack, by:
//! - Walking a source tree and parsing each file with a syntax-error-tolerant
//!   AST parser (never text search)
//! - Classifying each raw import/require specifier into a canonical package
//!   name, or rejecting it as a local reference
//! - Probing distinct names against their ecosystem's registry with bounded
//!   concurrency and a strict Available/Taken/Error taxonomy
//! - Joining probe outcomes back to file-level evidence
//!
//! # Example
//!
//! ```no_run
//! use confuscan::config::ScanConfig;
//! use confuscan::Scanner;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig {
//!         root: "/path/to/repo".into(),
//!         ..Default::default()
//!     };
//!     let scanner = Scanner::new(config).unwrap();
//!     let result = scanner.scan().await.unwrap();
//!     println!("{} unregistered names", result.available_count());
//! }
//! ```

pub mod config;
pub mod index;
pub mod parser;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod types;
pub mod walker;

pub use config::{Commands, Config, ScanConfig};
pub use index::OccurrenceIndex;
pub use scanner::Scanner;
pub use types::{
    Ecosystem, ProbeResult, ProbeStatus, RawReference, Result, ScanError, ScanResult,
};
