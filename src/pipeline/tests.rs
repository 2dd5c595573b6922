use oxc::allocator::Allocator;
use oxc::ast::ast::Program;
use oxc::codegen::Codegen;
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::*;

fn cx(options: &CompilerOptions) -> TransformContext<'_> {
    TransformContext {
        options,
        source_path: "index.tsx",
    }
}

#[test]
fn test_from_options_defaults() {
    let pipeline = TransformPipeline::from_options(&CompilerOptions::default());
    assert_eq!(pipeline.names(), vec!["component-syntax", "strip-module-syntax"]);
}

#[test]
fn test_from_options_variants() {
    let options = CompilerOptions {
        jsx: JsxMode::Preserve,
        module: ModuleKind::Es2015,
        minify: true,
        ..CompilerOptions::default()
    };
    assert_eq!(TransformPipeline::from_options(&options).names(), vec!["minify"]);

    let options = CompilerOptions {
        minify: true,
        ..CompilerOptions::default()
    };
    assert_eq!(
        TransformPipeline::from_options(&options).names(),
        vec!["component-syntax", "strip-module-syntax", "minify"]
    );
}

struct Append(&'static str);

impl PostEmitTransform for Append {
    fn name(&self) -> &'static str {
        self.0
    }

    fn apply(&self, _cx: &TransformContext<'_>, code: &str) -> Result<String, TransformError> {
        Ok(format!("{code}{}", self.0))
    }
}

struct Fail;

impl PostEmitTransform for Fail {
    fn name(&self) -> &'static str {
        "fail"
    }

    fn apply(&self, _cx: &TransformContext<'_>, _code: &str) -> Result<String, TransformError> {
        Err(TransformError::new("fail", "nope"))
    }
}

#[test]
fn test_post_emit_runs_in_order() {
    let options = CompilerOptions::default();
    let pipeline = TransformPipeline::new()
        .with_post_emit(Append("a"))
        .with_post_emit(Append("b"));
    let out = pipeline.run_post_emit(&cx(&options), "x".to_string()).unwrap();
    assert_eq!(out, "xab");
}

#[test]
fn test_post_emit_failure_stops_the_chain() {
    let options = CompilerOptions::default();
    let pipeline = TransformPipeline::new()
        .with_post_emit(Fail)
        .with_post_emit(Append("a"));
    let err = pipeline
        .run_post_emit(&cx(&options), "x".to_string())
        .unwrap_err();
    assert_eq!(err.to_string(), "transform `fail` failed: nope");
}

/// Drops every top-level statement after the first.
struct KeepFirst;

impl PreEmitTransform for KeepFirst {
    fn name(&self) -> &'static str {
        "keep-first"
    }

    fn apply<'a>(
        &self,
        _cx: &TransformContext<'_>,
        _allocator: &'a Allocator,
        program: &mut Program<'a>,
    ) -> Result<(), TransformError> {
        program.body.truncate(1);
        Ok(())
    }
}

#[test]
fn test_pre_emit_rewrites_program() {
    let options = CompilerOptions::default();
    let allocator = Allocator::default();
    let source = "const a = <b>1</b>;\nconst c = 2;\n";
    let mut program = Parser::new(&allocator, source, SourceType::tsx())
        .parse()
        .program;

    let pipeline = TransformPipeline::from_options(&options).with_pre_emit(KeepFirst);
    pipeline
        .run_pre_emit(&cx(&options), &allocator, &mut program)
        .unwrap();

    let code = Codegen::new().build(&program).code;
    assert!(code.contains("h(\"b\", null, \"1\")"), "{code}");
    assert!(!code.contains("const c"), "{code}");
}
