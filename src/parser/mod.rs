//! Reference extraction and name classification.
//!
//! Extraction is syntax-aware: files are parsed, not text-searched, and a
//! file that cannot be parsed contributes zero references. Classification
//! turns each raw specifier into a canonical registry-lookup name or
//! rejects it as a local reference.

pub mod ast_parser;
pub mod reserved;
pub mod rules;

pub use ast_parser::ReferenceExtractor;
pub use reserved::is_reserved_local_token;
pub use rules::{NamingRules, SlashPolicy};

/// Decide whether a raw specifier names a plausible external package.
///
/// Returns the canonical registry-lookup form, or `None` for local paths,
/// URLs, runtime built-ins, and anything that fails the ecosystem's naming
/// rules. First match wins; ambiguous input is always rejected, never
/// resolved to a best guess. Never panics.
pub fn classify(raw: &str, rules: &NamingRules) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Local and non-registry forms.
    if trimmed.starts_with('.') || trimmed.starts_with('/') {
        return None;
    }
    // Import-map specifiers resolve inside the project, never to a registry.
    if trimmed.starts_with('#') {
        return None;
    }
    if has_url_scheme(trimmed) || has_drive_prefix(trimmed) {
        return None;
    }
    if rules.is_runtime_builtin(trimmed) {
        return None;
    }

    // Identifier shape.
    if trimmed.len() > rules.max_len || !rules.has_valid_charset(trimmed) {
        return None;
    }

    // Scoped identifiers canonicalize to exactly @scope/name, however deep
    // the import path goes. A bare @scope has no package segment.
    if let Some(rest) = trimmed.strip_prefix('@') {
        if !rules.allows_scope {
            return None;
        }
        let mut parts = rest.splitn(3, '/');
        let scope = parts.next()?;
        let name = parts.next()?;
        if scope.is_empty() || name.is_empty() {
            return None;
        }
        return Some(format!("@{scope}/{name}"));
    }

    match rules.slash_policy {
        SlashPolicy::Forbid => {
            if trimmed.contains('/') {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        SlashPolicy::PathName => Some(trimmed.to_string()),
        SlashPolicy::DeepImport => {
            let slashes = trimmed.matches('/').count();
            match slashes {
                0 => Some(trimmed.to_string()),
                1 => {
                    // pkg/sub is a deep import into pkg -- unless the left
                    // segment is generic local-directory vocabulary, in which
                    // case the whole reference is a project path that omitted
                    // its leading ./
                    let head = trimmed.split('/').next()?;
                    if is_reserved_local_token(head) {
                        None
                    } else {
                        Some(head.to_string())
                    }
                }
                // Registries allow at most one path segment below a package
                // root; deeper paths are relative project paths.
                _ => None,
            }
        }
    }
}

fn has_url_scheme(name: &str) -> bool {
    name.starts_with("http://") || name.starts_with("https://") || name.starts_with("file://")
}

/// Windows drive prefixes ("C:\..." or "C:/...") pasted into specifiers.
fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ecosystem;

    fn npm() -> NamingRules {
        NamingRules::for_ecosystem(Ecosystem::Npm)
    }

    #[test]
    fn test_rejects_relative_and_absolute_paths() {
        let rules = npm();
        assert_eq!(classify("./local", &rules), None);
        assert_eq!(classify("../parent", &rules), None);
        assert_eq!(classify("/abs/path", &rules), None);
        assert_eq!(classify(".hidden", &rules), None);
    }

    #[test]
    fn test_rejects_urls_drives_and_import_maps() {
        let rules = npm();
        assert_eq!(classify("http://cdn.example/pkg.js", &rules), None);
        assert_eq!(classify("https://cdn.example/pkg.js", &rules), None);
        assert_eq!(classify("file:///opt/pkg", &rules), None);
        assert_eq!(classify("c:/projects/lib", &rules), None);
        assert_eq!(classify("#internal/config", &rules), None);
    }

    #[test]
    fn test_rejects_runtime_builtins() {
        let rules = npm();
        assert_eq!(classify("fs", &rules), None);
        assert_eq!(classify("node:path", &rules), None);
        assert_eq!(classify("fs-extra", &rules), Some("fs-extra".to_string()));
    }

    #[test]
    fn test_rejects_invalid_charset() {
        let rules = npm();
        assert_eq!(classify("UpperCase", &rules), None);
        assert_eq!(classify("spaced name", &rules), None);
        assert_eq!(classify("_private", &rules), None);
        assert_eq!(classify(&"x".repeat(300), &rules), None);
    }

    #[test]
    fn test_bare_names_pass_through() {
        let rules = npm();
        assert_eq!(classify("lodash", &rules), Some("lodash".to_string()));
        assert_eq!(classify("left-pad", &rules), Some("left-pad".to_string()));
    }

    #[test]
    fn test_scoped_canonicalization() {
        let rules = npm();
        assert_eq!(
            classify("@acme/tool", &rules),
            Some("@acme/tool".to_string())
        );
        assert_eq!(
            classify("@acme/tool/deep/path", &rules),
            Some("@acme/tool".to_string())
        );
        assert_eq!(classify("@acme", &rules), None);
        assert_eq!(classify("@/tool", &rules), None);
    }

    #[test]
    fn test_deep_import_vs_local_path() {
        let rules = npm();
        assert_eq!(classify("lodash/fp", &rules), Some("lodash".to_string()));
        assert_eq!(classify("src/utils", &rules), None);
        assert_eq!(classify("utils/helper", &rules), None);
        assert_eq!(classify("dist/index.js", &rules), None);
    }

    #[test]
    fn test_multi_slash_rejection() {
        let rules = npm();
        assert_eq!(classify("a/b/c", &rules), None);
        assert_eq!(classify("components/forms/input", &rules), None);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let rules = npm();
        for raw in ["lodash/fp", "@acme/tool/deep", "left-pad", "@scope/pkg"] {
            let canonical = classify(raw, &rules).unwrap();
            assert_eq!(classify(&canonical, &rules), Some(canonical.clone()));
        }
    }

    #[test]
    fn test_slash_forbidden_ecosystems() {
        let rules = NamingRules::for_ecosystem(Ecosystem::PyPi);
        assert_eq!(classify("requests", &rules), Some("requests".to_string()));
        assert_eq!(classify("requests/api", &rules), None);
    }

    #[test]
    fn test_path_name_ecosystems() {
        let go = NamingRules::for_ecosystem(Ecosystem::Go);
        assert_eq!(
            classify("github.com/acme/tool", &go),
            Some("github.com/acme/tool".to_string())
        );

        let docker = NamingRules::for_ecosystem(Ecosystem::Docker);
        assert_eq!(
            classify("acme/base-image", &docker),
            Some("acme/base-image".to_string())
        );

        let maven = NamingRules::for_ecosystem(Ecosystem::Maven);
        assert_eq!(
            classify("com.acme:core-lib", &maven),
            Some("com.acme:core-lib".to_string())
        );
    }
}
