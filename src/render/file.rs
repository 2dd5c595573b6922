//! Pane and sandbox backed by files in the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{ExecutionSandbox, LoadedCallback, OutputPane};

/// Writes the pane text to `<out>/output.js`.
#[derive(Debug, Clone)]
pub struct FilePane {
    path: PathBuf,
}

impl FilePane {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            path: out_dir.join("output.js"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputPane for FilePane {
    fn set_text(&mut self, text: &str) -> Result<()> {
        write_atomic(&self.path, text)
    }
}

/// Writes the sandbox document to `<out>/index.html`, ready to be opened
/// or served.
#[derive(Debug, Clone)]
pub struct FileSandbox {
    path: PathBuf,
}

impl FileSandbox {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            path: out_dir.join("index.html"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExecutionSandbox for FileSandbox {
    fn load(&mut self, document: String, on_loaded: LoadedCallback) -> Result<()> {
        write_atomic(&self.path, &document)?;
        on_loaded();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to clear {}", self.path.display()))
            }
        }
    }
}

/// Write through a sibling temp file so readers never see a partial file.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_pane() {
        let dir = TempDir::new().unwrap();
        let mut pane = FilePane::new(&dir.path().join("out"));
        pane.set_text("console.log(1);").unwrap();
        assert_eq!(fs::read_to_string(pane.path()).unwrap(), "console.log(1);");
    }

    #[test]
    fn test_file_sandbox_load_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut sandbox = FileSandbox::new(dir.path());
        let loaded = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&loaded);
        sandbox
            .load(
                "<html></html>".to_string(),
                Box::new(move || flag.store(true, Ordering::SeqCst)),
            )
            .unwrap();
        assert!(loaded.load(Ordering::SeqCst));
        assert_eq!(fs::read_to_string(sandbox.path()).unwrap(), "<html></html>");

        sandbox.clear().unwrap();
        assert!(!sandbox.path().exists());
        // clearing twice is fine
        sandbox.clear().unwrap();
    }
}
