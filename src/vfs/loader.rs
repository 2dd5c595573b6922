use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rayon::prelude::*;
use regex::Regex;

use super::{SnapshotStore, VfsError, VirtualFile, normalize_key};

/// A directory to capture into the snapshot.
#[derive(Debug, Clone)]
pub struct LibRoot {
    /// Directory, relative to the snapshot base.
    pub dir: PathBuf,
    /// Inclusion pattern matched against the base-relative key.
    /// `None` keeps every file.
    pub filter: Option<Regex>,
}

impl LibRoot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Regex) -> Self {
        self.filter = Some(filter);
        self
    }

    fn accepts(&self, key: &str) -> bool {
        self.filter.as_ref().is_none_or(|re| re.is_match(key))
    }
}

/// Enumerate every root and capture qualifying files keyed relative to `base`.
///
/// Roots that do not exist are skipped with a warning. Files that are not
/// valid UTF-8 are skipped.
pub fn load_snapshot(base: &Path, roots: &[LibRoot]) -> Result<SnapshotStore, VfsError> {
    if !base.is_dir() {
        return Err(VfsError::MissingBase(base.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for root in roots {
        let dir = base.join(&root.dir);
        if !dir.is_dir() {
            crate::log!("libs"; "skipping missing root {}", dir.display());
            continue;
        }

        for path in collect_files(&dir) {
            let Some(key) = relative_key(base, &path) else {
                continue;
            };
            if root.accepts(&key) {
                candidates.push((path, key));
            }
        }
    }

    let files = candidates
        .into_par_iter()
        .map(|(path, key)| read_virtual_file(path, key))
        .collect::<Result<Vec<_>, _>>()?;

    let store = SnapshotStore::from_files(files.into_iter().flatten().collect());
    crate::debug!("libs"; "snapshot: {} files", store.len());
    Ok(store)
}

fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect()
}

fn relative_key(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    Some(normalize_key(&relative.to_string_lossy()))
}

fn read_virtual_file(path: PathBuf, key: String) -> Result<Option<VirtualFile>, VfsError> {
    let bytes = fs::read(&path).map_err(|err| VfsError::Io(path.clone(), err))?;
    match String::from_utf8(bytes) {
        Ok(content) => {
            crate::debug!("libs"; "file: {}", key);
            Ok(Some(VirtualFile {
                path: key,
                content: content.into(),
            }))
        }
        Err(_) => {
            crate::debug!("libs"; "skip non-utf8: {}", key);
            Ok(None)
        }
    }
}
