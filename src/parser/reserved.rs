//! Reserved local-token vocabulary for deep-import classification.
//!
//! A reference like `utils/helper` is a project-local path that happened to
//! omit its leading `./`, not a deep import into a `utils` package. The
//! table below holds the directory, build-artifact, and generic-noun names
//! that disqualify a single leading segment from being read as a package
//! root. Kept as one sorted constant so it can be audited and tested on its
//! own instead of being scattered through the classifier.

/// Sorted ascending; membership checks binary-search it.
pub const RESERVED_LOCAL_TOKENS: &[&str] = &[
    "api",
    "app",
    "assets",
    "bin",
    "build",
    "common",
    "components",
    "config",
    "configs",
    "constants",
    "core",
    "data",
    "demo",
    "dist",
    "docs",
    "fixtures",
    "fonts",
    "helpers",
    "hooks",
    "i18n",
    "icons",
    "images",
    "img",
    "internal",
    "layouts",
    "lib",
    "locales",
    "middleware",
    "mocks",
    "models",
    "modules",
    "out",
    "packages",
    "pages",
    "plugins",
    "public",
    "routes",
    "scripts",
    "services",
    "shared",
    "spec",
    "specs",
    "src",
    "static",
    "store",
    "stores",
    "styles",
    "templates",
    "test",
    "tests",
    "types",
    "util",
    "utils",
    "vendor",
    "views",
];

/// Whether `token` is a generic local-directory name rather than a plausible
/// package root.
pub fn is_reserved_local_token(token: &str) -> bool {
    RESERVED_LOCAL_TOKENS.binary_search(&token).is_ok()
}
