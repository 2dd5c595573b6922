//! Editor and location backed by the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use url::Url;

use super::{Location, TextEditor};
use crate::share::permalink;

/// A source file on disk edited by an external editor.
#[derive(Debug, Clone)]
pub struct FileEditor {
    path: PathBuf,
}

impl FileEditor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextEditor for FileEditor {
    fn text(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// Holds the fragment of a permalink built on `base`, optionally mirrored
/// to a file.
#[derive(Debug, Clone)]
pub struct PermalinkLocation {
    base: Url,
    fragment: Option<String>,
    mirror: Option<PathBuf>,
}

impl PermalinkLocation {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            fragment: None,
            mirror: None,
        }
    }

    /// Start from an existing fragment, e.g. one given on the command line.
    pub fn with_fragment(mut self, fragment: Option<String>) -> Self {
        self.fragment = fragment;
        self
    }

    /// Also write the full permalink to `path` on every update.
    pub fn with_mirror(mut self, path: impl Into<PathBuf>) -> Self {
        self.mirror = Some(path.into());
        self
    }

    /// Full permalink for the current fragment.
    pub fn url(&self) -> Option<Url> {
        self.fragment
            .as_deref()
            .map(|fragment| permalink(&self.base, fragment))
    }
}

impl Location for PermalinkLocation {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) -> Result<()> {
        self.fragment = Some(fragment.to_string());
        let url = permalink(&self.base, fragment);
        crate::debug!("share"; "{}", url);

        if let Some(path) = &self.mirror {
            fs::write(path, format!("{url}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_editor() {
        let dir = TempDir::new().unwrap();
        let mut editor = FileEditor::new(dir.path().join("src/index.tsx"));
        assert_eq!(editor.text(), None);

        editor.set_text("const a = 1;").unwrap();
        assert_eq!(editor.text().as_deref(), Some("const a = 1;"));
    }

    #[test]
    fn test_permalink_location() {
        let dir = TempDir::new().unwrap();
        let mirror = dir.path().join("permalink.txt");
        let base = Url::parse("https://example.com/play/").unwrap();
        let mut location = PermalinkLocation::new(base).with_mirror(&mirror);
        assert_eq!(location.fragment(), None);
        assert!(location.url().is_none());

        location.set_fragment("abc").unwrap();
        assert_eq!(location.fragment().as_deref(), Some("abc"));
        assert_eq!(
            fs::read_to_string(&mirror).unwrap(),
            "https://example.com/play/#abc\n"
        );
    }
}
