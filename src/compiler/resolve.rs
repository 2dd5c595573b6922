//! Module specifier resolution against the compiler host.
//!
//! The virtual root doubles as `baseUrl`. Lookup order for a bare specifier:
//! `[compiler.paths]` mappings, then `node_modules/<spec>`, then
//! `node_modules/@types/<spec>`.

use oxc::ast::ast::{Program, Statement};

use super::CompilerHost;
use crate::config::CompilerOptions;

const EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts"];

/// An import/export specifier found in a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub value: String,
    /// Byte offset of the string literal.
    pub offset: u32,
}

/// Every module specifier referenced at the top level of `program`.
pub fn collect_specifiers(program: &Program<'_>) -> Vec<Specifier> {
    program
        .body
        .iter()
        .filter_map(|stmt| {
            let source = match stmt {
                Statement::ImportDeclaration(decl) => &decl.source,
                Statement::ExportAllDeclaration(decl) => &decl.source,
                Statement::ExportNamedDeclaration(decl) => decl.source.as_ref()?,
                _ => return None,
            };
            Some(Specifier {
                value: source.value.to_string(),
                offset: source.span.start,
            })
        })
        .collect()
}

/// Resolve `specifier` to a host path, `None` when nothing matches.
pub fn resolve(host: &dyn CompilerHost, options: &CompilerOptions, specifier: &str) -> Option<String> {
    if let Some(relative) = relative_base(specifier) {
        return probe(host, &relative);
    }

    for candidate in mapped_candidates(options, specifier) {
        if let Some(found) = probe(host, &candidate) {
            return Some(found);
        }
    }

    probe(host, &format!("node_modules/{specifier}"))
        .or_else(|| probe(host, &format!("node_modules/@types/{}", types_name(specifier))))
}

/// Relative specifiers are taken from the root, the only directory a
/// single-file program has.
fn relative_base(specifier: &str) -> Option<String> {
    if specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/') {
        let mut parts: Vec<&str> = Vec::new();
        for part in specifier.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                part => parts.push(part),
            }
        }
        Some(parts.join("/"))
    } else {
        None
    }
}

/// Substitutions from `[compiler.paths]`, exact keys first, then `prefix*`.
fn mapped_candidates(options: &CompilerOptions, specifier: &str) -> Vec<String> {
    if let Some(targets) = options.paths.get(specifier) {
        return targets.clone();
    }

    options
        .paths
        .iter()
        .filter_map(|(pattern, targets)| {
            let prefix = pattern.strip_suffix('*')?;
            let rest = specifier.strip_prefix(prefix)?;
            Some(targets.iter().map(move |target| target.replacen('*', rest, 1)))
        })
        .flatten()
        .collect()
}

/// `@scope/name` is published as `@types/scope__name`.
fn types_name(specifier: &str) -> String {
    match specifier.strip_prefix('@') {
        Some(scoped) => scoped.replacen('/', "__", 1),
        None => specifier.to_string(),
    }
}

/// Try `base` as a file, with each extension, as a package, then as a directory.
fn probe(host: &dyn CompilerHost, base: &str) -> Option<String> {
    let base = base.trim_start_matches('/').trim_end_matches('/');

    if EXTENSIONS.iter().any(|ext| base.ends_with(ext)) && host.file_exists(base) {
        return Some(base.to_string());
    }
    for ext in EXTENSIONS {
        let candidate = format!("{base}{ext}");
        if host.file_exists(&candidate) {
            return Some(candidate);
        }
    }

    if let Some(types) = package_types(host, base) {
        let entry = format!("{base}/{}", types.trim_start_matches("./"));
        if host.file_exists(&entry) {
            return Some(entry);
        }
        let entry = entry.trim_end_matches(".js");
        for ext in EXTENSIONS {
            let candidate = format!("{entry}{ext}");
            if host.file_exists(&candidate) {
                return Some(candidate);
            }
        }
    }

    EXTENSIONS
        .iter()
        .map(|ext| format!("{base}/index{ext}"))
        .find(|candidate| host.file_exists(candidate))
}

/// `types` (or legacy `typings`) field of `<base>/package.json`.
fn package_types(host: &dyn CompilerHost, base: &str) -> Option<String> {
    let manifest = host.read_file(&format!("{base}/package.json"))?;
    let value: serde_json::Value = serde_json::from_str(&manifest).ok()?;
    value
        .get("types")
        .or_else(|| value.get("typings"))
        .and_then(|field| field.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use oxc::allocator::Allocator;
    use oxc::parser::Parser;
    use oxc::span::SourceType;

    use super::*;
    use crate::compiler::{EditBuffer, PlaygroundHost};
    use crate::vfs::SnapshotStore;

    fn host() -> PlaygroundHost {
        let store = SnapshotStore::from_entries([
            ("node_modules/reactive-tsx/lib/index.d.ts", "export {}"),
            ("node_modules/reactive-tsx/lib/mono.d.ts", "export {}"),
            ("node_modules/csstype/package.json", r#"{"name":"csstype","types":"index.d.ts"}"#),
            ("node_modules/csstype/index.d.ts", "export {}"),
            ("node_modules/@types/lodash/index.d.ts", "export {}"),
            ("node_modules/@types/babel__core/index.d.ts", "export {}"),
            ("node_modules/legacy/package.json", r#"{"typings":"./dist/main.js"}"#),
            ("node_modules/legacy/dist/main.d.ts", "export {}"),
            ("shared/util.ts", "export const x = 1"),
        ]);
        PlaygroundHost::new(Arc::new(store), EditBuffer::new(""))
    }

    #[test]
    fn test_collect_specifiers() {
        let allocator = Allocator::default();
        let source = "import { h } from 'reactive-tsx';\nimport type { X } from './x';\nexport * from 'a';\nexport { y } from \"b\";\nexport const z = 1;";
        let ret = Parser::new(&allocator, source, SourceType::tsx()).parse();

        let specs = collect_specifiers(&ret.program);
        let values: Vec<_> = specs.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["reactive-tsx", "./x", "a", "b"]);
        assert_eq!(specs[0].offset as usize, source.find("'reactive-tsx'").unwrap());
    }

    #[test]
    fn test_resolve_through_paths() {
        let host = host();
        let options = CompilerOptions::default();
        assert_eq!(
            resolve(&host, &options, "reactive-tsx").as_deref(),
            Some("node_modules/reactive-tsx/lib/index.d.ts")
        );
        assert_eq!(
            resolve(&host, &options, "reactive-tsx/lib/mono").as_deref(),
            Some("node_modules/reactive-tsx/lib/mono.d.ts")
        );
    }

    #[test]
    fn test_resolve_wildcard_paths() {
        let host = host();
        let mut options = CompilerOptions::default();
        options
            .paths
            .insert("~/*".to_string(), vec!["shared/*".to_string()]);
        assert_eq!(
            resolve(&host, &options, "~/util").as_deref(),
            Some("shared/util.ts")
        );
    }

    #[test]
    fn test_resolve_node_modules() {
        let host = host();
        let options = CompilerOptions::default();
        assert_eq!(
            resolve(&host, &options, "csstype").as_deref(),
            Some("node_modules/csstype/index.d.ts")
        );
        assert_eq!(
            resolve(&host, &options, "lodash").as_deref(),
            Some("node_modules/@types/lodash/index.d.ts")
        );
        assert_eq!(
            resolve(&host, &options, "@babel/core").as_deref(),
            Some("node_modules/@types/babel__core/index.d.ts")
        );
        assert_eq!(
            resolve(&host, &options, "legacy").as_deref(),
            Some("node_modules/legacy/dist/main.d.ts")
        );
        assert!(resolve(&host, &options, "left-pad").is_none());
    }

    #[test]
    fn test_resolve_relative() {
        let host = host();
        let options = CompilerOptions::default();
        assert_eq!(
            resolve(&host, &options, "./shared/util").as_deref(),
            Some("shared/util.ts")
        );
        assert_eq!(
            resolve(&host, &options, "../shared/util.ts").as_deref(),
            Some("shared/util.ts")
        );
        assert!(resolve(&host, &options, "./missing").is_none());
    }
}
