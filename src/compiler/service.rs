//! Compiler service: checks the edit buffer and emits the transpiled script.

use std::path::Path;

use oxc::allocator::Allocator;
use oxc::codegen::Codegen;
use oxc::semantic::SemanticBuilder;
use oxc::transformer::{TransformOptions, Transformer};
use rustc_hash::FxHashSet;
use thiserror::Error;

use super::host::{CompilerHost, OUTPUT_FILE, SOURCE_FILE, SourceFile};
use super::{Diagnostic, resolve};
use crate::config::CompilerOptions;
use crate::pipeline::{TransformContext, TransformError, TransformPipeline};

/// A pass that could not run to completion. Distinct from diagnostics,
/// which are a normal outcome.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("source file `{0}` could not be resolved")]
    SourceNotFound(String),

    #[error("unsupported target: {0}")]
    Target(String),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Outcome of one `emit` call.
#[derive(Debug, Default)]
pub struct EmitResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Nothing was written: diagnostics blocked the emit.
    pub emit_skipped: bool,
}

/// Type-check and emit the edit buffer through a host.
pub trait CompilerService: Send + Sync {
    fn emit(
        &self,
        host: &dyn CompilerHost,
        options: &CompilerOptions,
        pipeline: &TransformPipeline,
    ) -> Result<EmitResult, CompileError>;
}

/// `CompilerService` on top of the oxc toolchain.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcCompiler;

impl OxcCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Every problem that blocks emit: syntax, early errors, default
    /// library and module resolution.
    fn check<'a>(
        host: &dyn CompilerHost,
        allocator: &'a Allocator,
        options: &CompilerOptions,
        root: &SourceFile<'a>,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = convert(root.path, root.source_text, &root.errors);

        if root.errors.is_empty() {
            let ret = SemanticBuilder::new()
                .with_check_syntax_error(true)
                .build(&root.program);
            diagnostics.extend(convert(root.path, root.source_text, &ret.errors));
        }

        if !options.no_lib {
            let lib = host.default_lib_file_name(options);
            if !host.file_exists(&lib) {
                diagnostics.push(Diagnostic::error(
                    lib.clone(),
                    format!("File '{lib}' not found."),
                ));
            }
        }

        let mut visited = FxHashSet::default();
        for specifier in resolve::collect_specifiers(&root.program) {
            let Some(path) = resolve::resolve(host, options, &specifier.value) else {
                diagnostics.push(
                    Diagnostic::error(
                        root.path,
                        format!(
                            "Cannot find module '{}' or its corresponding type declarations.",
                            specifier.value
                        ),
                    )
                    .at_offset(root.source_text, specifier.offset as usize),
                );
                continue;
            };
            crate::debug!("compiler"; "resolved `{}` to {}", specifier.value, path);

            if !visited.insert(path.clone()) {
                continue;
            }
            // declarations are checked one level deep
            if let Some(file) = host.get_source_file(allocator, &path) {
                diagnostics.extend(convert(file.path, file.source_text, &file.errors));
            }
        }

        diagnostics
    }
}

impl CompilerService for OxcCompiler {
    fn emit(
        &self,
        host: &dyn CompilerHost,
        options: &CompilerOptions,
        pipeline: &TransformPipeline,
    ) -> Result<EmitResult, CompileError> {
        let allocator = Allocator::default();
        let mut root = host
            .get_source_file(&allocator, SOURCE_FILE)
            .ok_or_else(|| CompileError::SourceNotFound(SOURCE_FILE.to_string()))?;

        let diagnostics = Self::check(host, &allocator, options, &root);
        if !diagnostics.is_empty() {
            crate::debug!("compiler"; "{} diagnostic(s), emit skipped", diagnostics.len());
            return Ok(EmitResult {
                diagnostics,
                emit_skipped: true,
            });
        }

        let cx = TransformContext {
            options,
            source_path: root.path,
        };
        pipeline.run_pre_emit(&cx, &allocator, &mut root.program)?;

        // type erasure and syntax lowering; markup was handled above
        let mut lowering =
            TransformOptions::from_target(options.target.as_str()).map_err(CompileError::Target)?;
        lowering.jsx.jsx_plugin = false;
        lowering.jsx.display_name_plugin = false;
        lowering.jsx.jsx_self_plugin = false;
        lowering.jsx.jsx_source_plugin = false;

        let scoping = SemanticBuilder::new()
            .build(&root.program)
            .semantic
            .into_scoping();
        let ret = Transformer::new(&allocator, Path::new(root.path), &lowering)
            .build_with_scoping(scoping, &mut root.program);
        if !ret.errors.is_empty() {
            return Ok(EmitResult {
                diagnostics: convert(root.path, root.source_text, &ret.errors),
                emit_skipped: true,
            });
        }

        let code = Codegen::new().build(&root.program).code;
        let code = pipeline.run_post_emit(&cx, code)?;

        host.write_file(OUTPUT_FILE, &code);
        Ok(EmitResult::default())
    }
}

fn convert(file: &str, source: &str, errors: &[oxc::diagnostics::OxcDiagnostic]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|err| Diagnostic::from_oxc(file, source, err))
        .collect()
}
