//! Script compression with oxc.
//!
//! Identifiers are not mangled: the sandbox prelude and the user's code share
//! the global scope, and top-level names must stay reachable from it.

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::emitted_source_type;
use crate::pipeline::{PostEmitTransform, TransformContext, TransformError};

/// Minify a printed script, `None` when it does not parse.
pub fn minify_script(source: &str, source_type: SourceType) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: None,
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Minify;

impl PostEmitTransform for Minify {
    fn name(&self) -> &'static str {
        "minify"
    }

    fn apply(&self, cx: &TransformContext<'_>, code: &str) -> Result<String, TransformError> {
        minify_script(code, emitted_source_type(cx.options))
            .ok_or_else(|| TransformError::new(self.name(), "output does not parse"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerOptions;

    #[test]
    fn test_minify_script() {
        let source = "function greet(name) {\n  return 'hello ' + name;\n}\nconsole.log(greet('you'));\n";
        let minified = minify_script(source, SourceType::cjs()).unwrap();
        assert!(minified.len() < source.len());
        assert_eq!(minified.trim_end().lines().count(), 1);
        assert!(minified.contains("console.log"));
    }

    #[test]
    fn test_minify_rejects_invalid_script() {
        assert!(minify_script("let = ;", SourceType::cjs()).is_none());
    }

    #[test]
    fn test_minify_transform() {
        let options = CompilerOptions {
            minify: true,
            ..CompilerOptions::default()
        };
        let cx = TransformContext {
            options: &options,
            source_path: "index.tsx",
        };
        let out = Minify.apply(&cx, "var   answer   =   42;\nconsole.log( answer );\n").unwrap();
        assert!(out.contains("console.log"));
        assert!(out.len() < 40);
    }
}
