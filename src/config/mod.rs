//! Playground configuration management for `playground.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── compiler   # [compiler], [compiler.paths]
//! │   ├── libs       # [libs], [[libs.roots]]
//! │   ├── sandbox    # [sandbox]
//! │   ├── scheduler  # [scheduler]
//! │   └── share      # [share]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # PlaygroundConfig (this file)
//! ```
//!
//! A missing config file is not an error: every section has defaults.

pub mod section;
pub mod types;

pub use section::{
    CompilerOptions, JsxMode, LibsConfig, ModuleKind, SandboxConfig, SchedulerConfig,
    ShareConfig, Target,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing playground.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub compiler: CompilerOptions,

    #[serde(default)]
    pub libs: LibsConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub share: ShareConfig,

    #[serde(default)]
    pub sandbox: SandboxConfig,
}

impl PlaygroundConfig {
    /// Load configuration from `path` (relative to the current directory).
    ///
    /// Falls back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = cwd.join(path);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            crate::debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.config_path = config_path;
        config.root = root;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate all sections, collecting every problem before failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.libs.validate(&mut diag);
        self.scheduler.validate(&mut diag);
        self.share.validate(&mut diag);
        diag.into_result()
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Absolute snapshot base directory.
    pub fn libs_base(&self) -> PathBuf {
        self.root_join(&self.libs.base)
    }

    /// Absolute sandbox output directory, optionally overridden from the CLI.
    pub fn out_dir(&self, cli_out: Option<&Path>) -> PathBuf {
        match cli_out {
            Some(out) => out.to_path_buf(),
            None => self.root_join(&self.sandbox.out),
        }
    }
}

/// Parse a config snippet for tests, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PlaygroundConfig {
    let (parsed, ignored) = PlaygroundConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            PlaygroundConfig::parse_with_ignored("[compiler]\njsx_pragma = \"h\"\n[extra]\nx = 1")
                .unwrap();
        assert_eq!(ignored, vec!["compiler.jsx_pragma", "extra"]);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = test_parse_config(
            "[scheduler]\nquiescence_ms = 0\n[share]\nbase_url = \"nope\"",
        );
        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.errors().len(), 2);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = PlaygroundConfig::load(&temp.path().join("playground.toml")).unwrap();
        assert_eq!(config.root, temp.path());
        assert_eq!(config.scheduler.quiescence_ms, 2000);
        assert_eq!(config.out_dir(None), temp.path().join("out"));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("playground.toml");
        fs::write(&path, "[sandbox]\nout = \"dist\"\n[libs]\nbase = \"vendor\"").unwrap();

        let config = PlaygroundConfig::load(&path).unwrap();
        assert_eq!(config.out_dir(None), temp.path().join("dist"));
        assert_eq!(config.libs_base(), temp.path().join("vendor"));
        assert_eq!(
            config.out_dir(Some(Path::new("/tmp/elsewhere"))),
            PathBuf::from("/tmp/elsewhere")
        );
    }
}
