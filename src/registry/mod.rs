//! Public registry probing.
//!
//! Builds read-only existence-check URLs per ecosystem, issues them with
//! bounded concurrency, and caches outcomes so a name is probed at most
//! once per run.

mod cache;
pub mod prober;

pub use prober::RegistryProber;

use crate::types::Ecosystem;

/// Default registry base URLs. Overridable per ecosystem for private
/// mirrors and tests.
pub(crate) fn default_base_url(ecosystem: Ecosystem) -> &'static str {
    match ecosystem {
        Ecosystem::Npm => "https://registry.npmjs.org",
        Ecosystem::PyPi => "https://pypi.org",
        Ecosystem::RubyGems => "https://rubygems.org",
        Ecosystem::Go => "https://proxy.golang.org",
        Ecosystem::Maven => "https://repo1.maven.org/maven2",
        Ecosystem::Docker => "https://hub.docker.com",
        Ecosystem::Crates => "https://crates.io",
    }
}

/// Build the existence-check URL for one canonical name. Only the HTTP
/// status of the response is ever interpreted.
pub(crate) fn probe_url(base: &str, ecosystem: Ecosystem, name: &str) -> String {
    match ecosystem {
        Ecosystem::Npm => format!("{base}/{}", urlencoding::encode(name)),
        Ecosystem::PyPi => format!("{base}/pypi/{name}/json"),
        Ecosystem::RubyGems => format!("{base}/api/v1/gems/{name}.json"),
        Ecosystem::Go => format!("{base}/{name}/@v/list"),
        Ecosystem::Maven => {
            // group:artifact coordinates become a repository path
            let path = match name.split_once(':') {
                Some((group, artifact)) => {
                    format!("{}/{artifact}", group.replace('.', "/"))
                }
                None => name.to_string(),
            };
            format!("{base}/{path}/maven-metadata.xml")
        }
        Ecosystem::Docker => {
            // Official images live in the implicit library namespace.
            let repo = if name.contains('/') {
                name.to_string()
            } else {
                format!("library/{name}")
            };
            format!("{base}/v2/repositories/{repo}/")
        }
        Ecosystem::Crates => format!("{base}/api/v1/crates/{name}"),
    }
}
