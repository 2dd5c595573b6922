//! `[libs]` section configuration.
//!
//! Directories captured into the library snapshot at startup.
//!
//! # Example
//!
//! ```toml
//! [libs]
//! base = "."                                # keys are relative to this directory
//!
//! [[libs.roots]]
//! dir = "node_modules/typescript/lib"
//! filter = 'lib\.[\w\.]*\.d\.ts$'           # optional inclusion regex
//! ```

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::vfs::LibRoot;

/// One snapshot root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibRootConfig {
    /// Directory relative to `libs.base`.
    pub dir: PathBuf,
    /// Inclusion regex matched against the base-relative, `/`-separated path.
    #[serde(default)]
    pub filter: Option<String>,
}

impl LibRootConfig {
    fn new(dir: &str, filter: Option<&str>) -> Self {
        Self {
            dir: PathBuf::from(dir),
            filter: filter.map(str::to_string),
        }
    }
}

/// Snapshot population settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibsConfig {
    /// Base directory; snapshot keys are relative to it.
    pub base: PathBuf,
    pub roots: Vec<LibRootConfig>,
}

impl Default for LibsConfig {
    fn default() -> Self {
        Self {
            base: PathBuf::from("."),
            roots: vec![
                LibRootConfig::new("node_modules/reactive-tsx", None),
                LibRootConfig::new(
                    "node_modules/typescript/lib",
                    Some(r"lib\.[\w\.]*\.d\.ts$"),
                ),
                LibRootConfig::new("node_modules/csstype", Some(r"\.d\.ts$")),
            ],
        }
    }
}

impl LibsConfig {
    const FILTER: FieldPath = FieldPath::new("libs.roots.filter");

    /// Report filters that are not valid regular expressions.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for root in &self.roots {
            if let Some(filter) = &root.filter
                && let Err(err) = Regex::new(filter)
            {
                diag.error(
                    Self::FILTER,
                    format!("invalid filter for `{}`: {err}", root.dir.display()),
                );
            }
        }
    }

    /// Compile the configured roots. Invalid filters are rejected by `validate`.
    pub fn lib_roots(&self) -> Result<Vec<LibRoot>, regex::Error> {
        self.roots
            .iter()
            .map(|root| {
                let lib_root = LibRoot::new(&root.dir);
                match &root.filter {
                    Some(filter) => Ok(lib_root.with_filter(Regex::new(filter)?)),
                    None => Ok(lib_root),
                }
            })
            .collect()
    }
}
