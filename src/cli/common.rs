//! Helpers shared across CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::PlaygroundConfig;
use crate::render::{FilePane, FileSandbox};
use crate::session::{FileEditor, PermalinkLocation, SessionIo};
use crate::vfs::{self, SnapshotStore, VfsError};

/// Source file edited when none is given.
pub const DEFAULT_FILE: &str = "index.tsx";

/// Permalink mirror written next to the sandbox.
pub const PERMALINK_FILE: &str = "permalink.txt";

/// Resolve the source file: CLI paths are relative to the current
/// directory, the default is relative to the config root.
pub fn source_path(config: &PlaygroundConfig, file: Option<&Path>) -> PathBuf {
    match file {
        Some(file) => file.to_path_buf(),
        None => config.root_join(DEFAULT_FILE),
    }
}

/// Load the library snapshot described by `[libs]`.
///
/// A missing base directory only disables library lookups.
pub fn load_store(config: &PlaygroundConfig) -> Result<Arc<SnapshotStore>> {
    let roots = config
        .libs
        .lib_roots()
        .context("invalid [libs] filter")?;
    match vfs::load_snapshot(&config.libs_base(), &roots) {
        Ok(store) => {
            crate::debug!("libs"; "loaded {} files", store.len());
            Ok(Arc::new(store))
        }
        Err(VfsError::MissingBase(base)) => {
            crate::log!("warning"; "{} does not exist, compiling without libraries", base.display());
            Ok(Arc::new(SnapshotStore::default()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Wire a session to files: the source file as editor, `out_dir` for the
/// pane and sandbox, and a permalink mirrored into `out_dir`.
pub fn file_io(
    config: &PlaygroundConfig,
    source: &Path,
    out_dir: &Path,
    fragment: Option<String>,
) -> Result<SessionIo> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let base = config.share.base().context("invalid [share] base_url")?;
    let location = PermalinkLocation::new(base)
        .with_fragment(fragment)
        .with_mirror(out_dir.join(PERMALINK_FILE));

    Ok(SessionIo {
        editor: Box::new(FileEditor::new(source)),
        pane: Box::new(FilePane::new(out_dir)),
        sandbox: Box::new(FileSandbox::new(out_dir)),
        location: Box::new(location),
    })
}

/// Read a source file with a helpful error.
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn config_in(dir: &Path) -> PlaygroundConfig {
        let mut config = PlaygroundConfig::default();
        config.root = dir.to_path_buf();
        config
    }

    #[test]
    fn test_source_path() {
        let config = config_in(Path::new("/site"));
        assert_eq!(source_path(&config, None), PathBuf::from("/site/index.tsx"));
        assert_eq!(
            source_path(&config, Some(Path::new("app.tsx"))),
            PathBuf::from("app.tsx")
        );
    }

    #[test]
    fn test_load_store_without_base() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.libs.base = PathBuf::from("missing");
        let store = load_store(&config).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_io_creates_out_dir() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let out = dir.path().join("out");
        let mut io = file_io(&config, &dir.path().join("index.tsx"), &out, None).unwrap();
        assert!(out.is_dir());

        io.location.set_fragment("abc").unwrap();
        let mirrored = std::fs::read_to_string(out.join(PERMALINK_FILE)).unwrap();
        assert!(mirrored.trim_end().ends_with("#abc"), "{mirrored}");
    }
}
