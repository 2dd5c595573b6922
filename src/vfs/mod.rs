//! Library snapshot store: an immutable virtual file system.
//!
//! The store is populated once at startup from a fixed set of library roots
//! (standard library declarations, ambient type declarations, runtime typings)
//! and never changes afterwards. The compiler host reads from it instead of
//! touching the real filesystem.
//!
//! - [`store`]: the read-only `path -> content` mapping
//! - [`loader`]: recursive root enumeration with per-root inclusion filters

mod loader;
mod store;

pub use loader::{LibRoot, load_snapshot};
pub use store::{SnapshotStore, VirtualFile};

use std::path::PathBuf;
use thiserror::Error;

/// Snapshot population errors.
#[derive(Debug, Error)]
pub enum VfsError {
    #[error("failed to read library file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("library base directory `{0}` does not exist")]
    MissingBase(PathBuf),
}

/// Normalize a relative path to the canonical `/`-separated key form.
pub fn normalize_key(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(
            normalize_key(r"node_modules\typescript\lib\lib.es6.d.ts"),
            "node_modules/typescript/lib/lib.es6.d.ts"
        );
        assert_eq!(normalize_key("already/fine.d.ts"), "already/fine.d.ts");
    }
}
