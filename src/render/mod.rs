//! Result rendering: output pane text and sandbox document.
//!
//! ```text
//! CompileResult ─┬─ diagnostics ─▶ pane: messages      sandbox: cleared
//!                └─ script ──────▶ pane: script        sandbox: document
//! failure ───────────────────────▶ pane: error text    sandbox: cleared
//! ```

mod file;

pub use file::{FilePane, FileSandbox};

use anyhow::Result;

use crate::compiler::CompileResult;
use crate::config::SandboxConfig;
use crate::embed::sandbox::{SANDBOX_HTML, SandboxVars};

/// One-shot notification fired when a sandbox document has loaded.
pub type LoadedCallback = Box<dyn FnOnce() + Send>;

/// Read-only view of the last pass.
pub trait OutputPane: Send {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Isolated environment that executes the transpiled script.
pub trait ExecutionSandbox: Send {
    /// Replace the running document, calling `on_loaded` once it has loaded.
    fn load(&mut self, document: String, on_loaded: LoadedCallback) -> Result<()>;

    /// Tear the running document down.
    fn clear(&mut self) -> Result<()>;
}

/// What a completed pass showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The script is running in the sandbox.
    Emitted,
    /// `n` diagnostics are shown, the sandbox is empty.
    Diagnostics(usize),
    /// The pass failed; the error text is shown.
    Failed,
}

/// Renders pass results into a pane and a sandbox.
#[derive(Debug, Clone)]
pub struct Renderer {
    title: String,
    prelude: Vec<String>,
    strict: bool,
}

impl Renderer {
    pub fn new(sandbox: &SandboxConfig, strict: bool) -> Self {
        Self {
            title: sandbox.title.clone(),
            prelude: sandbox.prelude.clone(),
            strict,
        }
    }

    /// Sandbox document for `script`.
    pub fn document(&self, script: &str) -> String {
        SANDBOX_HTML.render(&SandboxVars {
            title: self.title.clone(),
            prelude: self.prelude.clone(),
            script: script.to_string(),
            strict: self.strict,
        })
    }

    pub fn render(
        &self,
        result: &CompileResult,
        pane: &mut dyn OutputPane,
        sandbox: &mut dyn ExecutionSandbox,
    ) -> Result<PassOutcome> {
        if result.has_diagnostics() {
            pane.set_text(&result.messages())?;
            sandbox.clear()?;
            return Ok(PassOutcome::Diagnostics(result.diagnostics.len()));
        }

        let script = result.emitted.as_deref().unwrap_or_default();
        pane.set_text(script)?;
        sandbox.load(
            self.document(script),
            Box::new(|| crate::debug!("sandbox"; "document loaded")),
        )?;
        Ok(PassOutcome::Emitted)
    }

    /// Show a pass failure.
    pub fn render_failure(
        &self,
        message: &str,
        pane: &mut dyn OutputPane,
        sandbox: &mut dyn ExecutionSandbox,
    ) -> Result<PassOutcome> {
        pane.set_text(message)?;
        sandbox.clear()?;
        Ok(PassOutcome::Failed)
    }
}
