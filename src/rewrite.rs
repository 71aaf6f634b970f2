//! Import rewriting.
//!
//! Converts module-level import statements into local destructuring bindings
//! sourced from the Runtime Binding Table, so that after rewriting the code
//! contains no import statements for recognized modules - only plain `const`
//! declarations referencing parameters of the wrapping factory.

use oxc_allocator::{Allocator, Box as oxc_box};
use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_ast_visit::VisitMut;
use oxc_span::SPAN;

use crate::bindings::object_name_for_source;

// ═══════════════════════════════════════════════════════════════════════════════
// IMPORT REWRITER
// Replaces `import { a, b as c } from "src"` with `const { a, b: c } = obj;`
// ═══════════════════════════════════════════════════════════════════════════════

pub struct ImportRewriter<'a> {
    pub ast: AstBuilder<'a>,
}

impl<'a> ImportRewriter<'a> {
    pub fn new(allocator: &'a Allocator) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
        }
    }

    /// Build the replacement declaration for one import, or `None` when the
    /// import produced zero destructurable named properties. Default and
    /// namespace specifiers are never rewritten; an import carrying only
    /// those is left untouched rather than silently dropped.
    fn rewrite_import(&self, decl: &ImportDeclaration<'a>) -> Option<Statement<'a>> {
        let specifiers = decl.specifiers.as_ref()?;

        let mut properties = self.ast.vec();
        for specifier in specifiers {
            let ImportDeclarationSpecifier::ImportSpecifier(spec) = specifier else {
                continue;
            };

            let imported = match &spec.imported {
                ModuleExportName::IdentifierName(id) => id.name.to_string(),
                ModuleExportName::StringLiteral(s) => s.value.to_string(),
                _ => continue,
            };
            let local = spec.local.name.to_string();
            let shorthand = imported == local;

            let imported_atom = self.ast.allocator.alloc_str(&imported);
            let local_atom = self.ast.allocator.alloc_str(&local);
            let key = PropertyKey::StaticIdentifier(
                self.ast.alloc(self.ast.identifier_name(SPAN, imported_atom)),
            );
            let value = BindingPattern::BindingIdentifier(
                self.ast.alloc(self.ast.binding_identifier(SPAN, local_atom)),
            );
            properties.push(self.ast.binding_property(SPAN, key, value, shorthand, false));
        }

        if properties.is_empty() {
            return None;
        }

        let source = decl.source.value.to_string();
        let object_name = object_name_for_source(&source);
        tracing::debug!(%source, object = %object_name, "rewriting import to destructuring");

        let object_atom = self.ast.allocator.alloc_str(object_name);
        let pattern = BindingPattern::ObjectPattern(self.ast.alloc(self.ast.object_pattern(
            SPAN,
            properties,
            None::<oxc_box<BindingRestElement>>,
        )));
        let init = self.ast.expression_identifier(SPAN, object_atom);
        let declarator = self.ast.variable_declarator(
            SPAN,
            VariableDeclarationKind::Const,
            pattern,
            None::<oxc_box<TSTypeAnnotation>>,
            Some(init),
            false,
        );
        let mut declarations = self.ast.vec();
        declarations.push(declarator);
        let declaration = self.ast.variable_declaration(
            SPAN,
            VariableDeclarationKind::Const,
            declarations,
            false,
        );
        Some(Statement::VariableDeclaration(self.ast.alloc(declaration)))
    }
}

impl<'a> VisitMut<'a> for ImportRewriter<'a> {
    fn visit_statement(&mut self, stmt: &mut Statement<'a>) {
        // Imports only occur at module top level; nothing below statement
        // depth is touched by this pass.
        if let Statement::ImportDeclaration(import_decl) = stmt {
            if let Some(replacement) = self.rewrite_import(import_decl) {
                *stmt = replacement;
            }
        }
    }
}
