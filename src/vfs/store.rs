use std::sync::Arc;

use rustc_hash::FxHashMap;

/// A file captured into the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    pub path: String,
    pub content: Arc<str>,
}

/// Read-only `path -> content` mapping.
///
/// Keys are relative, `/`-separated and matched exactly (case-sensitive, no
/// globbing). There is no mutating API: a store is built once and shared
/// behind an `Arc` for the lifetime of the process.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    files: FxHashMap<String, Arc<str>>,
}

impl SnapshotStore {
    /// Build a store from `(path, content)` pairs. Later duplicates win.
    pub fn from_entries<P, C>(entries: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<Arc<str>>,
    {
        let files = entries
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        Self { files }
    }

    pub(super) fn from_files(files: Vec<VirtualFile>) -> Self {
        Self::from_entries(files.into_iter().map(|f| (f.path, f.content)))
    }

    /// Exact-match lookup.
    #[inline]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|content| &**content)
    }

    /// Shared handle to the content (cheap clone).
    #[inline]
    pub fn get_shared(&self, path: &str) -> Option<Arc<str>> {
        self.files.get(path).cloned()
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All files sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries: Vec<_> = self
            .files
            .iter()
            .map(|(path, content)| (path.as_str(), &**content))
            .collect();
        entries.sort_unstable_by_key(|(path, _)| *path);
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SnapshotStore {
        SnapshotStore::from_entries([
            ("node_modules/typescript/lib/lib.es6.d.ts", "interface Array<T> {}"),
            ("node_modules/reactive-tsx/lib/index.d.ts", "export declare function run(): void"),
        ])
    }

    #[test]
    fn test_exact_lookup() {
        let store = store();
        assert_eq!(
            store.get("node_modules/typescript/lib/lib.es6.d.ts"),
            Some("interface Array<T> {}")
        );
        assert!(store.contains("node_modules/reactive-tsx/lib/index.d.ts"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_lookup_is_case_sensitive_and_unglobbed() {
        let store = store();
        assert!(store.get("node_modules/TypeScript/lib/lib.es6.d.ts").is_none());
        assert!(store.get("node_modules/typescript/lib/*.d.ts").is_none());
        assert!(store.get("/node_modules/typescript/lib/lib.es6.d.ts").is_none());
    }

    #[test]
    fn test_iter_sorted() {
        let store = store();
        let paths: Vec<_> = store.iter().map(|(path, _)| path).collect();
        assert_eq!(
            paths,
            vec![
                "node_modules/reactive-tsx/lib/index.d.ts",
                "node_modules/typescript/lib/lib.es6.d.ts",
            ]
        );
    }
}
