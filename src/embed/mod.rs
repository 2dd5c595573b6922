//! Embedded static resources.
//!
//! - `template` - Template types for typed variable injection
//! - `sandbox` - The document the transpiled script runs in
//!
//! # Usage
//!
//! ```ignore
//! use embed::sandbox::{SANDBOX_HTML, SandboxVars};
//!
//! let html = SANDBOX_HTML.render(&SandboxVars {
//!     title: "tsplay".into(),
//!     prelude: Vec::new(),
//!     script: "console.log(1);".into(),
//!     strict: true,
//! });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod sandbox {
    use super::{Template, TemplateVars};

    /// Variables for the sandbox document.
    pub struct SandboxVars {
        pub title: String,
        /// Scripts loaded before the user's code, in order.
        pub prelude: Vec<String>,
        pub script: String,
        pub strict: bool,
    }

    impl TemplateVars for SandboxVars {
        fn apply(&self, content: &str) -> String {
            let prelude = self
                .prelude
                .iter()
                .map(|src| format!("<script src=\"{}\"></script>", escape_attr(src)))
                .collect::<Vec<_>>()
                .join("\n");
            let body = if self.strict {
                format!("\"use strict\";\n{}", escape_script(&self.script))
            } else {
                escape_script(&self.script)
            };
            // user code goes in last so its text is never scanned for markers
            content
                .replace("__TSPLAY_TITLE__", &escape_text(&self.title))
                .replace("__TSPLAY_PRELUDE__", &prelude)
                .replace("__TSPLAY_SCRIPT__", &body)
        }
    }

    /// Sandbox document: prelude scripts, then the transpiled script wrapped
    /// in a self-invoking function.
    pub const SANDBOX_HTML: Template<SandboxVars> =
        Template::new(include_str!("sandbox/index.html"));

    /// `</script` would end the inline element early.
    pub fn escape_script(script: &str) -> String {
        script.replace("</script", "<\\/script")
    }

    fn escape_text(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    fn escape_attr(value: &str) -> String {
        escape_text(value).replace('"', "&quot;")
    }
}

#[cfg(test)]
mod tests {
    use super::sandbox::*;

    #[test]
    fn test_sandbox_document() {
        let html = SANDBOX_HTML.render(&SandboxVars {
            title: "a <b> & c".into(),
            prelude: vec!["vendor/reactive-tsx.js".into()],
            script: "console.log('__TSPLAY_TITLE__');".into(),
            strict: true,
        });

        assert!(html.contains("<title>a &lt;b&gt; &amp; c</title>"));
        assert!(html.contains("<script src=\"vendor/reactive-tsx.js\"></script>"));
        assert!(html.contains("(function () {\n\"use strict\";\nconsole.log('__TSPLAY_TITLE__');\n})();"));
        assert!(!html.contains("__TSPLAY_SCRIPT__"));
    }

    #[test]
    fn test_sloppy_mode_has_no_directive() {
        let html = SANDBOX_HTML.render(&SandboxVars {
            title: "t".into(),
            prelude: Vec::new(),
            script: "x = 1;".into(),
            strict: false,
        });
        assert!(!html.contains("use strict"));
        assert!(html.contains("(function () {\nx = 1;\n})();"));
    }

    #[test]
    fn test_script_close_tag_is_escaped() {
        let html = SANDBOX_HTML.render(&SandboxVars {
            title: "t".into(),
            prelude: Vec::new(),
            script: "const s = '</script><b>';".into(),
            strict: false,
        });
        assert!(html.contains("const s = '<\\/script><b>';"));
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
