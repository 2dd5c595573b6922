//! Source-to-source transform pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────┐   ┌────────────┐
//! │  pre-emit  │ → │ lower + print    │ → │ post-emit  │ → index.js
//! │  (AST)     │   │ (compiler)       │   │ (script)   │
//! └────────────┘   └──────────────────┘   └────────────┘
//! ```
//!
//! - Pre-emit transforms rewrite the parsed TSX program before type erasure.
//! - Post-emit transforms rewrite the printed script.
//!
//! Transforms run in insertion order and must be deterministic: the same
//! input always produces the same output.

pub mod transform;

use oxc::allocator::Allocator;
use oxc::ast::ast::Program;
use thiserror::Error;

use crate::config::{CompilerOptions, JsxMode, ModuleKind};

pub use transform::{ComponentSyntax, Minify, StripModuleSyntax};

// =============================================================================
// Types
// =============================================================================

/// Read-only inputs shared by every transform of one pass.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'o> {
    pub options: &'o CompilerOptions,
    /// Logical path of the file being compiled.
    pub source_path: &'o str,
}

/// A transform failed; the pass is aborted.
#[derive(Debug, Error)]
#[error("transform `{transform}` failed: {message}")]
pub struct TransformError {
    pub transform: &'static str,
    pub message: String,
}

impl TransformError {
    pub fn new(transform: &'static str, message: impl Into<String>) -> Self {
        Self {
            transform,
            message: message.into(),
        }
    }
}

/// Rewrites the parsed program before lowering.
pub trait PreEmitTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply<'a>(
        &self,
        cx: &TransformContext<'_>,
        allocator: &'a Allocator,
        program: &mut Program<'a>,
    ) -> Result<(), TransformError>;
}

/// Rewrites the printed script.
pub trait PostEmitTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, cx: &TransformContext<'_>, code: &str) -> Result<String, TransformError>;
}

// =============================================================================
// Pipeline
// =============================================================================

/// Ordered pre-emit and post-emit transform lists.
#[derive(Default)]
pub struct TransformPipeline {
    pre_emit: Vec<Box<dyn PreEmitTransform>>,
    post_emit: Vec<Box<dyn PostEmitTransform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The transforms implied by `options`.
    pub fn from_options(options: &CompilerOptions) -> Self {
        let mut pipeline = Self::new();
        if options.jsx != JsxMode::Preserve {
            pipeline = pipeline.with_pre_emit(ComponentSyntax);
        }
        if options.module == ModuleKind::None {
            pipeline = pipeline.with_post_emit(StripModuleSyntax);
        }
        if options.minify {
            pipeline = pipeline.with_post_emit(Minify);
        }
        pipeline
    }

    pub fn with_pre_emit(mut self, transform: impl PreEmitTransform + 'static) -> Self {
        self.pre_emit.push(Box::new(transform));
        self
    }

    pub fn with_post_emit(mut self, transform: impl PostEmitTransform + 'static) -> Self {
        self.post_emit.push(Box::new(transform));
        self
    }

    /// Names in execution order, pre-emit first.
    pub fn names(&self) -> Vec<&'static str> {
        self.pre_emit
            .iter()
            .map(|t| t.name())
            .chain(self.post_emit.iter().map(|t| t.name()))
            .collect()
    }

    pub fn run_pre_emit<'a>(
        &self,
        cx: &TransformContext<'_>,
        allocator: &'a Allocator,
        program: &mut Program<'a>,
    ) -> Result<(), TransformError> {
        for transform in &self.pre_emit {
            crate::debug!("pipeline"; "pre-emit {}", transform.name());
            transform.apply(cx, allocator, program)?;
        }
        Ok(())
    }

    pub fn run_post_emit(
        &self,
        cx: &TransformContext<'_>,
        code: String,
    ) -> Result<String, TransformError> {
        self.post_emit.iter().try_fold(code, |code, transform| {
            crate::debug!("pipeline"; "post-emit {}", transform.name());
            transform.apply(cx, &code)
        })
    }
}

#[cfg(test)]
mod tests;
