//! Built-in transforms.
//!
//! # Modules
//!
//! - `jsx`: Compiles component markup into factory calls (pre-emit)
//! - `module`: Strips import/export syntax from the script (post-emit)
//! - `minify`: Compresses the script (post-emit)

mod jsx;
mod minify;
mod module;

pub use jsx::ComponentSyntax;
pub use minify::{Minify, minify_script};
pub use module::StripModuleSyntax;

use oxc::span::SourceType;

use crate::config::{CompilerOptions, JsxMode, ModuleKind};

/// Source type used to re-parse printed output.
pub(crate) fn emitted_source_type(options: &CompilerOptions) -> SourceType {
    SourceType::mjs()
        .with_jsx(options.jsx == JsxMode::Preserve)
        .with_script(options.module == ModuleKind::None)
}
