//! Module syntax removal.
//!
//! The sandbox runs the output as a classic script, so `import`/`export`
//! declarations are cut from the printed text:
//!
//! | input                              | output                  |
//! |------------------------------------|-------------------------|
//! | `export const a = 1;`              | `const a = 1;`          |
//! | `export function f() {}`           | `function f() {}`       |
//! | `export default function f() {}`   | `function f() {}`       |
//! | `export default function () {}`    | `(function () {});`     |
//! | `export default expr;`             | `expr;`                 |
//! | `export { a, b as c };`            | removed                 |
//! | `export * from "m";`               | removed                 |
//! | `import { h } from "m";`           | removed                 |
//!
//! Edits are spliced by span so the rest of the text (comments, layout)
//! is untouched.

use oxc::allocator::Allocator;
use oxc::ast::ast::{ExportDefaultDeclarationKind, Statement};
use oxc::parser::Parser;
use oxc::span::{GetSpan, Span};

use super::emitted_source_type;
use crate::pipeline::{PostEmitTransform, TransformContext, TransformError};

#[derive(Debug, Clone, Copy, Default)]
pub struct StripModuleSyntax;

impl PostEmitTransform for StripModuleSyntax {
    fn name(&self) -> &'static str {
        "strip-module-syntax"
    }

    fn apply(&self, cx: &TransformContext<'_>, code: &str) -> Result<String, TransformError> {
        let allocator = Allocator::default();
        // module goal: import/export are only legal there
        let source_type = emitted_source_type(cx.options).with_module(true);
        let ret = Parser::new(&allocator, code, source_type).parse();
        if let Some(err) = ret.errors.first() {
            return Err(TransformError::new(self.name(), err.message.to_string()));
        }

        let mut edits: Vec<(Span, String)> = Vec::new();
        for stmt in &ret.program.body {
            let replacement = match stmt {
                Statement::ImportDeclaration(_) | Statement::ExportAllDeclaration(_) => {
                    String::new()
                }
                Statement::ExportNamedDeclaration(decl) => match &decl.declaration {
                    Some(declaration) => slice(code, declaration.span()).to_string(),
                    None => String::new(),
                },
                Statement::ExportDefaultDeclaration(decl) => {
                    default_export(code, &decl.declaration)
                }
                _ => continue,
            };
            edits.push((stmt.span(), replacement));
        }

        Ok(splice(code, &edits))
    }
}

/// Replacement text for `export default <kind>`.
fn default_export(code: &str, kind: &ExportDefaultDeclarationKind<'_>) -> String {
    let text = slice(code, kind.span());
    match kind {
        ExportDefaultDeclarationKind::FunctionDeclaration(func) if func.id.is_some() => {
            text.to_string()
        }
        ExportDefaultDeclarationKind::ClassDeclaration(class) if class.id.is_some() => {
            text.to_string()
        }
        // anonymous declarations are only valid as expressions
        ExportDefaultDeclarationKind::FunctionDeclaration(_)
        | ExportDefaultDeclarationKind::ClassDeclaration(_) => format!("({text});"),
        ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => String::new(),
        _ => format!("{text};"),
    }
}

#[inline]
fn slice(code: &str, span: Span) -> &str {
    &code[span.start as usize..span.end as usize]
}

/// Apply non-overlapping, ordered `(span, replacement)` edits to `code`.
/// A removal also eats the newline that ended the removed line.
fn splice(code: &str, edits: &[(Span, String)]) -> String {
    let mut out = String::with_capacity(code.len());
    let mut last = 0;
    for (span, replacement) in edits {
        out.push_str(&code[last..span.start as usize]);
        out.push_str(replacement);
        last = span.end as usize;
        if replacement.is_empty() && code[last..].starts_with('\n') {
            last += 1;
        }
    }
    out.push_str(&code[last..]);
    out
}
