//! `[sandbox]` section configuration.
//!
//! The sandbox document is written to `<out>/index.html`; the output pane to
//! `<out>/output.js`.
//!
//! # Example
//!
//! ```toml
//! [sandbox]
//! out = "out"
//! title = "tsplay"
//! prelude = ["https://unpkg.com/reactive-tsx/dist/reactive-tsx.umd.js"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Execution sandbox settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Output directory, relative to the project root.
    pub out: PathBuf,
    /// Document title.
    pub title: String,
    /// Scripts loaded before the compiled script (runtime globals).
    pub prelude: Vec<String>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            out: PathBuf::from("out"),
            title: "tsplay".to_string(),
            prelude: Vec::new(),
        }
    }
}
