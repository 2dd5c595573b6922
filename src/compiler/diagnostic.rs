//! Compiler diagnostics, decoupled from the oxc diagnostic type.

use std::fmt;

use oxc::diagnostics::{OxcDiagnostic, Severity as OxcSeverity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A message reported for one file of the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub message: String,
    /// 1-based `(line, column)` of the primary label.
    pub position: Option<(u32, u32)>,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            position: None,
            severity: Severity::Error,
        }
    }

    /// Attach the position of byte `offset` within `source`.
    pub fn at_offset(mut self, source: &str, offset: usize) -> Self {
        self.position = Some(line_col(source, offset));
        self
    }

    /// Convert an oxc diagnostic reported against `source`.
    pub fn from_oxc(file: &str, source: &str, diagnostic: &OxcDiagnostic) -> Self {
        let severity = match diagnostic.severity {
            OxcSeverity::Error => Severity::Error,
            _ => Severity::Warning,
        };
        let offset = diagnostic
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|label| label.offset());

        let mut converted = Self {
            file: file.to_string(),
            message: diagnostic.message.to_string(),
            position: None,
            severity,
        };
        if let Some(offset) = offset {
            converted = converted.at_offset(source, offset);
        }
        converted
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match self.position {
            Some((line, column)) => write!(
                f,
                "{}({line},{column}): {kind}: {}",
                self.file, self.message
            ),
            None => write!(f, "{}: {kind}: {}", self.file, self.message),
        }
    }
}

/// 1-based line and column (in chars) of a byte offset.
fn line_col(source: &str, offset: usize) -> (u32, u32) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (
        u32::try_from(line).unwrap_or(u32::MAX),
        u32::try_from(column).unwrap_or(u32::MAX),
    )
}
