//! Per-ecosystem naming rules: pure predicates and constant data.

use crate::types::Ecosystem;

/// How slashes in a raw identifier are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashPolicy {
    /// One slash below the package root is a deep import; the left segment
    /// is the candidate package. Two or more slashes mean a local path.
    DeepImport,
    /// Names never contain slashes.
    Forbid,
    /// Slashes are part of the name itself (Go module paths, Docker
    /// `namespace/name`, Maven coordinates rendered as paths).
    PathName,
}

/// Validation and normalization rules for one ecosystem.
///
/// Process-wide constant data; loaded once, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct NamingRules {
    pub max_len: usize,
    /// Whether `@scope/name` identifiers exist in this ecosystem.
    pub allows_scope: bool,
    pub slash_policy: SlashPolicy,
    /// Structural characters allowed beyond `[a-z0-9._-]` and separators.
    pub extra_chars: &'static [char],
    /// Runtime built-in module names that can never be registry packages.
    pub builtins: &'static [&'static str],
}

impl NamingRules {
    pub fn for_ecosystem(ecosystem: Ecosystem) -> Self {
        match ecosystem {
            Ecosystem::Npm => Self {
                max_len: 214,
                allows_scope: true,
                slash_policy: SlashPolicy::DeepImport,
                extra_chars: &[],
                builtins: NODE_BUILTINS,
            },
            Ecosystem::PyPi | Ecosystem::RubyGems => Self {
                max_len: 214,
                allows_scope: false,
                slash_policy: SlashPolicy::Forbid,
                extra_chars: &[],
                builtins: &[],
            },
            Ecosystem::Crates => Self {
                max_len: 64,
                allows_scope: false,
                slash_policy: SlashPolicy::Forbid,
                extra_chars: &[],
                builtins: &[],
            },
            Ecosystem::Go => Self {
                max_len: 255,
                allows_scope: false,
                slash_policy: SlashPolicy::PathName,
                extra_chars: &[],
                builtins: &[],
            },
            Ecosystem::Maven => Self {
                max_len: 255,
                allows_scope: false,
                slash_policy: SlashPolicy::PathName,
                // group:artifact coordinates
                extra_chars: &[':'],
                builtins: &[],
            },
            Ecosystem::Docker => Self {
                max_len: 255,
                allows_scope: false,
                slash_policy: SlashPolicy::PathName,
                extra_chars: &[],
                builtins: &[],
            },
        }
    }

    /// Exact-match check against the ecosystem's runtime built-ins,
    /// including namespaced variants (`node:fs`).
    pub fn is_runtime_builtin(&self, name: &str) -> bool {
        let base = name.strip_prefix("node:").unwrap_or(name);
        self.builtins.contains(&base)
    }

    /// Registry identifier charset: lowercase alphanumerics plus `._-`,
    /// `/` as a segment separator, `@` only in leading position, and a
    /// leading `@`-or-alphanumeric requirement. Uppercase is rejected
    /// outright; registries forbid it.
    pub fn has_valid_charset(&self, name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some('@') if self.allows_scope => {}
            Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
            _ => return false,
        }
        chars.all(|c| {
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || matches!(c, '.' | '_' | '-' | '/')
                || self.extra_chars.contains(&c)
        })
    }
}

/// Node.js built-in modules. References to these are runtime imports, never
/// registry packages.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builtins() {
        let rules = NamingRules::for_ecosystem(Ecosystem::Npm);
        assert!(rules.is_runtime_builtin("fs"));
        assert!(rules.is_runtime_builtin("node:fs"));
        assert!(rules.is_runtime_builtin("worker_threads"));
        assert!(!rules.is_runtime_builtin("lodash"));
    }

    #[test]
    fn test_builtins_do_not_leak_across_ecosystems() {
        let rules = NamingRules::for_ecosystem(Ecosystem::PyPi);
        // "os" is a Python stdlib name too, but candidate files for pip are
        // pre-filtered by the manifest collaborators.
        assert!(!rules.is_runtime_builtin("fs"));
    }

    #[test]
    fn test_builtin_table_is_sorted() {
        let mut sorted = NODE_BUILTINS.to_vec();
        sorted.sort_unstable();
        assert_eq!(NODE_BUILTINS, sorted.as_slice());
    }

    #[test]
    fn test_charset() {
        let npm = NamingRules::for_ecosystem(Ecosystem::Npm);
        assert!(npm.has_valid_charset("lodash"));
        assert!(npm.has_valid_charset("left-pad"));
        assert!(npm.has_valid_charset("@acme/tool"));
        assert!(npm.has_valid_charset("socket.io-client"));
        assert!(!npm.has_valid_charset("UPPER"));
        assert!(!npm.has_valid_charset("has space"));
        assert!(!npm.has_valid_charset("_private"));
        assert!(!npm.has_valid_charset("semv@r"));

        let pypi = NamingRules::for_ecosystem(Ecosystem::PyPi);
        assert!(pypi.has_valid_charset("requests"));
        assert!(!pypi.has_valid_charset("@acme/tool"));

        let maven = NamingRules::for_ecosystem(Ecosystem::Maven);
        assert!(maven.has_valid_charset("com.acme:core-lib"));
    }
}
