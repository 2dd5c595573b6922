//! Component markup compilation.
//!
//! Runs the oxc JSX plugin alone over the typed program. The program is
//! flagged as JavaScript for the duration of the pass so TypeScript erasure
//! stays with the lowering step.

use std::path::Path;

use oxc::allocator::Allocator;
use oxc::ast::ast::Program;
use oxc::semantic::SemanticBuilder;
use oxc::transformer::{JsxOptions, JsxRuntime, TransformOptions, Transformer};

use crate::config::{CompilerOptions, JsxMode};
use crate::pipeline::{PreEmitTransform, TransformContext, TransformError};

/// `<div class="a">{x}</div>` becomes `h("div", { class: "a" }, x)`
/// (classic) or a `jsx()` call imported from the configured import source
/// (automatic).
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentSyntax;

impl ComponentSyntax {
    fn jsx_options(options: &CompilerOptions) -> Option<JsxOptions> {
        let runtime = match options.jsx {
            JsxMode::Preserve => return None,
            JsxMode::Classic => JsxOptions {
                runtime: JsxRuntime::Classic,
                pragma: Some(options.jsx_factory.clone()),
                pragma_frag: Some(options.jsx_fragment.clone()),
                ..JsxOptions::default()
            },
            JsxMode::Automatic => JsxOptions {
                runtime: JsxRuntime::Automatic,
                import_source: Some(options.jsx_import_source.clone()),
                ..JsxOptions::default()
            },
        };
        Some(JsxOptions {
            jsx_plugin: true,
            display_name_plugin: false,
            jsx_self_plugin: false,
            jsx_source_plugin: false,
            development: false,
            ..runtime
        })
    }
}

impl PreEmitTransform for ComponentSyntax {
    fn name(&self) -> &'static str {
        "component-syntax"
    }

    fn apply<'a>(
        &self,
        cx: &TransformContext<'_>,
        allocator: &'a Allocator,
        program: &mut Program<'a>,
    ) -> Result<(), TransformError> {
        let Some(jsx) = Self::jsx_options(cx.options) else {
            return Ok(());
        };
        let options = TransformOptions {
            jsx,
            ..TransformOptions::default()
        };

        let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();

        let source_type = program.source_type;
        program.source_type = source_type.with_javascript(true);
        let ret = Transformer::new(allocator, Path::new(cx.source_path), &options)
            .build_with_scoping(scoping, program);
        program.source_type = source_type;

        match ret.errors.first() {
            Some(err) => Err(TransformError::new(self.name(), err.message.to_string())),
            None => Ok(()),
        }
    }
}
