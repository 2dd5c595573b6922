//! Compiler host: the file contract the compiler service resolves through.
//!
//! `PlaygroundHost` answers every query from the immutable library snapshot
//! plus the live edit buffer. Nothing touches the real filesystem, and the
//! only "write" that survives is the transpiled output of the edit buffer.

use std::sync::Arc;

use oxc::allocator::Allocator;
use oxc::ast::ast::Program;
use oxc::diagnostics::OxcDiagnostic;
use oxc::parser::Parser;
use oxc::span::SourceType;
use parking_lot::Mutex;

use super::EditBuffer;
use crate::config::{CompilerOptions, Target};
use crate::vfs::SnapshotStore;

/// Logical path of the edit buffer.
pub const SOURCE_FILE: &str = "index.tsx";
/// Logical path of the transpiled output.
pub const OUTPUT_FILE: &str = "index.js";

/// A freshly parsed file.
pub struct SourceFile<'a> {
    pub path: &'a str,
    pub source_text: &'a str,
    pub program: Program<'a>,
    /// Syntax errors.
    pub errors: Vec<OxcDiagnostic>,
}

/// File resolution and output capture used by a compiler service.
pub trait CompilerHost {
    fn file_exists(&self, path: &str) -> bool;

    fn read_file(&self, path: &str) -> Option<Arc<str>>;

    /// Parse the file at `path` into `allocator`, `None` when it does not resolve.
    fn get_source_file<'a>(&self, allocator: &'a Allocator, path: &str) -> Option<SourceFile<'a>>;

    fn default_lib_file_name(&self, options: &CompilerOptions) -> String;

    fn write_file(&self, path: &str, data: &str);

    fn current_directory(&self) -> &str {
        "/"
    }

    fn canonical_file_name<'p>(&self, path: &'p str) -> &'p str {
        path
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        true
    }

    fn new_line(&self) -> &str {
        "\n"
    }
}

/// Host backed by the library snapshot and the live edit buffer.
pub struct PlaygroundHost {
    store: Arc<SnapshotStore>,
    buffer: EditBuffer,
    /// Single capture slot for `OUTPUT_FILE`.
    output: Mutex<Option<String>>,
}

impl PlaygroundHost {
    pub fn new(store: Arc<SnapshotStore>, buffer: EditBuffer) -> Self {
        Self {
            store,
            buffer,
            output: Mutex::new(None),
        }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Take the captured output, leaving the slot empty for the next pass.
    pub fn take_output(&self) -> Option<String> {
        self.output.lock().take()
    }
}

impl CompilerHost for PlaygroundHost {
    fn file_exists(&self, path: &str) -> bool {
        let path = normalize(path);
        let exists = self.store.contains(path) || path == SOURCE_FILE;
        crate::debug!("host"; "fileExists {} {}", path, exists);
        exists
    }

    fn read_file(&self, path: &str) -> Option<Arc<str>> {
        let path = normalize(path);
        let content = match self.store.get_shared(path) {
            Some(content) => Some(content),
            None if path == SOURCE_FILE => Some(Arc::from(self.buffer.get().as_str())),
            None => None,
        };
        crate::debug!("host"; "readFile {} {}", path, content.is_some());
        content
    }

    fn get_source_file<'a>(&self, allocator: &'a Allocator, path: &str) -> Option<SourceFile<'a>> {
        let path = normalize(path);
        let text = if let Some(content) = self.store.get_shared(path) {
            crate::debug!("host"; "getSourceFile {} hit", path);
            content
        } else if path == SOURCE_FILE {
            crate::debug!("host"; "getSourceFile {} buffer", path);
            Arc::from(self.buffer.get().as_str())
        } else {
            crate::debug!("host"; "getSourceFile {} not found", path);
            return None;
        };

        let path = allocator.alloc_str(path);
        let source_text = allocator.alloc_str(&text);
        let source_type = SourceType::from_path(&*path).unwrap_or_else(|_| SourceType::tsx());
        let ret = Parser::new(allocator, source_text, source_type).parse();

        Some(SourceFile {
            path,
            source_text,
            program: ret.program,
            errors: ret.errors,
        })
    }

    fn default_lib_file_name(&self, options: &CompilerOptions) -> String {
        let root = options.lib_root.trim_end_matches('/');
        format!("{root}/{}", default_lib_name(options.target))
    }

    fn write_file(&self, path: &str, data: &str) {
        let path = normalize(path);
        crate::debug!("host"; "writeFile {}", path);
        if path == OUTPUT_FILE {
            *self.output.lock() = Some(data.to_string());
        }
    }
}

/// Strip one leading separator: the host root is `/`.
#[inline]
fn normalize(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Default library file for a target, following the TypeScript lib layout.
pub fn default_lib_name(target: Target) -> &'static str {
    match target {
        Target::Es5 => "lib.d.ts",
        Target::Es2015 => "lib.es6.d.ts",
        Target::Es2016 => "lib.es2016.full.d.ts",
        Target::Es2017 => "lib.es2017.full.d.ts",
        Target::Es2018 => "lib.es2018.full.d.ts",
        Target::Es2019 => "lib.es2019.full.d.ts",
        Target::Es2020 => "lib.es2020.full.d.ts",
        Target::Es2021 => "lib.es2021.full.d.ts",
        Target::Es2022 => "lib.es2022.full.d.ts",
        Target::Es2023 => "lib.es2023.full.d.ts",
        Target::Es2024 => "lib.es2024.full.d.ts",
        Target::EsNext => "lib.esnext.full.d.ts",
    }
}
