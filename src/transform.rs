//! Syntax transformation.
//!
//! Parses one source unit as a JSX/TSX module, rewrites its imports against
//! the Runtime Binding Table, lowers JSX to `React.createElement` calls and
//! reads the transformed text back out of the mutated tree. Parser
//! diagnostics surface as [`TransformError::Syntax`]; nothing is recovered
//! locally.

use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_ast_visit::VisitMut;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::TransformError;
use crate::jsx_lowerer::JsxLowerer;
use crate::rewrite::ImportRewriter;

/// Statements with no runtime semantics, dropped before codegen.
fn is_type_only_statement(stmt: &Statement) -> bool {
    matches!(
        stmt,
        Statement::TSTypeAliasDeclaration(_)
            | Statement::TSInterfaceDeclaration(_)
            | Statement::TSEnumDeclaration(_)
            | Statement::TSModuleDeclaration(_)
            | Statement::TSImportEqualsDeclaration(_)
    )
}

/// Transform one (export-neutralized) source unit into executable plain
/// JavaScript: no import statements for recognized modules, no JSX, no
/// type-only statements.
pub fn transform_source(source: &str) -> Result<String, TransformError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(true);

    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(TransformError::syntax(message));
    }

    let mut program = ret.program;
    program.body.retain(|stmt| !is_type_only_statement(stmt));

    let mut rewriter = ImportRewriter::new(&allocator);
    rewriter.visit_program(&mut program);

    let mut lowerer = JsxLowerer::new(&allocator);
    lowerer.visit_program(&mut program);

    Ok(Codegen::new().build(&program).code)
}
