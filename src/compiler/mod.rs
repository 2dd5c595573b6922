//! In-process compilation of the edit buffer.
//!
//! - `host`: file contract backed by the library snapshot and the buffer
//! - `service`: checks and emits through the host (`OxcCompiler`)
//! - `resolve`: module specifier resolution
//! - `diagnostic`: compiler messages

mod buffer;
mod diagnostic;
pub mod host;
mod resolve;
mod service;

pub use buffer::EditBuffer;
pub use diagnostic::{Diagnostic, Severity};
pub use host::{CompilerHost, OUTPUT_FILE, PlaygroundHost, SOURCE_FILE, SourceFile};
pub use service::{CompileError, CompilerService, EmitResult, OxcCompiler};

use crate::config::CompilerOptions;
use crate::pipeline::TransformPipeline;

/// Result of one compilation pass.
///
/// When `diagnostics` is non-empty it takes priority and `emitted` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileResult {
    pub diagnostics: Vec<Diagnostic>,
    pub emitted: Option<String>,
}

impl CompileResult {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostics, one per line.
    pub fn messages(&self) -> String {
        self.diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Run one pass over the current buffer content.
pub fn compile(
    host: &PlaygroundHost,
    service: &dyn CompilerService,
    options: &CompilerOptions,
    pipeline: &TransformPipeline,
) -> Result<CompileResult, CompileError> {
    // a previous pass may have left output behind
    host.take_output();

    let result = service.emit(host, options, pipeline)?;
    let emitted = if result.emit_skipped || !result.diagnostics.is_empty() {
        None
    } else {
        host.take_output()
    };

    Ok(CompileResult {
        diagnostics: result.diagnostics,
        emitted,
    })
}
