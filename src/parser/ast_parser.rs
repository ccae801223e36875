//! Syntax-aware reference extraction using oxc_parser.

use crate::types::{RawReference, Result, ScanError};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast::visit::walk;
use oxc_ast::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;
use tracing::{debug, trace};

/// Extracts raw module specifiers from JavaScript/TypeScript sources.
///
/// Recognized sites: static import declarations, re-exports with a source
/// module, dynamic `import(...)`, and `require(...)` calls with a single
/// string-literal argument. Computed specifiers cannot be resolved
/// statically and are skipped. Parsing tolerates recoverable syntax errors;
/// a file the parser gives up on contributes zero references. There is no
/// text-matching fallback: a package name in a comment or an unrelated
/// string is not a reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse one file, yielding its raw references.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<RawReference>> {
        let content = std::fs::read_to_string(path)?;
        self.extract(&content, path)
    }

    /// Parse source content and collect module specifiers.
    pub fn extract(&self, content: &str, path: &Path) -> Result<Vec<RawReference>> {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path)
            .unwrap_or_else(|_| SourceType::default().with_module(true).with_jsx(true));

        let ret = Parser::new(&allocator, content, source_type).parse();

        if ret.panicked {
            return Err(ScanError::ParseError {
                file: path.to_path_buf(),
                message: "unrecoverable syntax error".to_string(),
            });
        }

        // Recoverable errors are common in checked-in generated code; keep
        // whatever the parser salvaged.
        if !ret.errors.is_empty() {
            trace!(
                "parse recovered from {} errors in {}",
                ret.errors.len(),
                path.display()
            );
        }

        let mut visitor = ReferenceVisitor::new(path);
        visitor.visit_program(&ret.program);

        debug!(
            "extracted {} references from {}",
            visitor.references.len(),
            path.display()
        );

        Ok(visitor.references)
    }
}

/// Visitor collecting module specifiers from import/require sites.
struct ReferenceVisitor {
    references: Vec<RawReference>,
    source_file: std::path::PathBuf,
}

impl ReferenceVisitor {
    fn new(source_file: &Path) -> Self {
        Self {
            references: Vec::new(),
            source_file: source_file.to_path_buf(),
        }
    }

    fn push(&mut self, specifier: &str) {
        self.references.push(RawReference {
            text: specifier.to_string(),
            source_file: self.source_file.clone(),
        });
    }
}

impl<'a> Visit<'a> for ReferenceVisitor {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.push(decl.source.value.as_str());
        walk::walk_import_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.push(decl.source.value.as_str());
        walk::walk_export_all_declaration(self, decl);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(ref source) = decl.source {
            self.push(source.value.as_str());
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_call_expression(&mut self, expr: &CallExpression<'a>) {
        // require('pkg') with exactly one string-literal argument
        if let Expression::Identifier(id) = &expr.callee {
            if id.name == "require" && expr.arguments.len() == 1 {
                if let Some(Argument::StringLiteral(lit)) = expr.arguments.first() {
                    self.push(lit.value.as_str());
                }
            }
        }
        walk::walk_call_expression(self, expr);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        // dynamic import('pkg'); computed sources are skipped
        if let Expression::StringLiteral(lit) = &expr.source {
            self.push(lit.value.as_str());
        }
        walk::walk_import_expression(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn extract(js: &str) -> Vec<String> {
        let extractor = ReferenceExtractor::new();
        extractor
            .extract(js, &PathBuf::from("test.ts"))
            .unwrap()
            .into_iter()
            .map(|r| r.text)
            .collect()
    }

    #[test]
    fn test_static_imports() {
        let refs = extract(
            r#"
            import lodash from 'lodash';
            import { useState } from 'react';
            import * as tool from '@acme/tool';
            "#,
        );
        assert_eq!(refs, vec!["lodash", "react", "@acme/tool"]);
    }

    #[test]
    fn test_require_calls() {
        let refs = extract(
            r#"
            const fs = require('fs');
            const pad = require('left-pad');
            "#,
        );
        assert_eq!(refs, vec!["fs", "left-pad"]);
    }

    #[test]
    fn test_require_needs_single_string_literal() {
        let refs = extract(
            r#"
            const a = require(someVariable);
            const b = require('pkg' + suffix);
            const c = require('one', 'two');
            "#,
        );
        assert!(refs.is_empty());
    }

    #[test]
    fn test_dynamic_import() {
        let refs = extract(
            r#"
            const load = async () => {
                await import('chart.js');
                await import(modulePath);
            };
            "#,
        );
        assert_eq!(refs, vec!["chart.js"]);
    }

    #[test]
    fn test_reexports() {
        let refs = extract(
            r#"
            export * from '@acme/core';
            export { helper } from './helpers';
            export const local = 1;
            "#,
        );
        assert_eq!(refs, vec!["@acme/core", "./helpers"]);
    }

    #[test]
    fn test_local_specifiers_are_still_raw() {
        // Extraction yields what the source says; classification decides
        // what is local.
        let refs = extract(r#"import x from './local';"#);
        assert_eq!(refs, vec!["./local"]);
    }

    #[test]
    fn test_strings_and_comments_are_not_references() {
        let refs = extract(
            r#"
            // import fake from 'commented-out';
            const msg = "please npm install missing-pkg";
            "#,
        );
        assert!(refs.is_empty());
    }

    #[test]
    fn test_malformed_file_contributes_nothing() {
        // Whether the parser salvages a partial tree or gives up entirely,
        // a malformed file must never invent references.
        let extractor = ReferenceExtractor::new();
        let out = extractor.extract("%%% not ( javascript [[[", &PathBuf::from("bad.js"));
        match out {
            Ok(refs) => assert!(refs.is_empty()),
            Err(ScanError::ParseError { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
