//! `[compiler]` section configuration.
//!
//! Fixed, process-wide compiler configuration. Every compilation pass uses
//! the same options.
//!
//! # Example
//!
//! ```toml
//! [compiler]
//! target = "es2015"          # es5, es2015 .. es2024, esnext
//! module = "none"            # "none" strips module syntax, "es2015" keeps it
//! jsx = "classic"            # classic | automatic | preserve
//! jsx_factory = "h"
//! jsx_fragment = "Fragment"
//! strict = true
//!
//! [compiler.paths]
//! "reactive-tsx" = ["node_modules/reactive-tsx/lib/index"]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language level of the emitted script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    Es2024,
    EsNext,
}

impl Target {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es5 => "es5",
            Self::Es2015 => "es2015",
            Self::Es2016 => "es2016",
            Self::Es2017 => "es2017",
            Self::Es2018 => "es2018",
            Self::Es2019 => "es2019",
            Self::Es2020 => "es2020",
            Self::Es2021 => "es2021",
            Self::Es2022 => "es2022",
            Self::Es2023 => "es2023",
            Self::Es2024 => "es2024",
            Self::EsNext => "esnext",
        }
    }
}

/// Module scheme of the emitted script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Plain script: import/export syntax is stripped after emit.
    None,
    /// ES module syntax is kept.
    Es2015,
}

/// How component markup is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsxMode {
    /// `<div/>` becomes `factory("div", null)`.
    Classic,
    /// `<div/>` becomes `_jsx("div", {})` imported from `jsx_import_source`.
    Automatic,
    /// Markup is left as is.
    Preserve,
}

/// Compiler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    pub target: Target,
    pub module: ModuleKind,
    pub jsx: JsxMode,
    /// Classic runtime element factory.
    pub jsx_factory: String,
    /// Classic runtime fragment factory.
    pub jsx_fragment: String,
    /// Automatic runtime import source.
    pub jsx_import_source: String,
    /// Emit `"use strict"` and report strict-mode early errors.
    pub strict: bool,
    /// Compress the emitted script.
    pub minify: bool,
    /// Do not require the default library to resolve.
    pub no_lib: bool,
    /// Virtual directory holding the default `lib.*.d.ts` files.
    pub lib_root: String,
    /// Module specifier mappings, resolved from the virtual root.
    pub paths: BTreeMap<String, Vec<String>>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        let paths = BTreeMap::from([
            (
                "reactive-tsx".to_string(),
                vec!["node_modules/reactive-tsx/lib/index".to_string()],
            ),
            (
                "reactive-tsx/lib/mono".to_string(),
                vec!["node_modules/reactive-tsx/lib/mono".to_string()],
            ),
        ]);
        Self {
            target: Target::Es2015,
            module: ModuleKind::None,
            jsx: JsxMode::Classic,
            jsx_factory: "h".to_string(),
            jsx_fragment: "Fragment".to_string(),
            jsx_import_source: "reactive-tsx".to_string(),
            strict: true,
            minify: false,
            no_lib: false,
            lib_root: "node_modules/typescript/lib".to_string(),
            paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_compiler_defaults() {
        let config = test_parse_config("");
        let compiler = &config.compiler;
        assert_eq!(compiler.target, Target::Es2015);
        assert_eq!(compiler.module, ModuleKind::None);
        assert_eq!(compiler.jsx, JsxMode::Classic);
        assert_eq!(compiler.jsx_factory, "h");
        assert!(compiler.strict);
        assert!(compiler.paths.contains_key("reactive-tsx"));
    }

    #[test]
    fn test_compiler_config() {
        let config = test_parse_config(
            "[compiler]\ntarget = \"esnext\"\nmodule = \"es2015\"\njsx = \"preserve\"\n\
             [compiler.paths]\n\"ui\" = [\"vendor/ui/index\"]",
        );
        let compiler = &config.compiler;
        assert_eq!(compiler.target, Target::EsNext);
        assert_eq!(compiler.module, ModuleKind::Es2015);
        assert_eq!(compiler.jsx, JsxMode::Preserve);
        assert_eq!(compiler.paths["ui"], vec!["vendor/ui/index".to_string()]);
        assert!(!compiler.paths.contains_key("reactive-tsx"));
    }

    #[test]
    fn test_unknown_target_rejected() {
        let parsed = crate::config::PlaygroundConfig::from_str("[compiler]\ntarget = \"es3\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_target_names() {
        assert_eq!(Target::Es5.as_str(), "es5");
        assert_eq!(Target::EsNext.as_str(), "esnext");
    }
}
