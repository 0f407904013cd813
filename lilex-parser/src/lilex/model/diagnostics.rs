//! Diagnostics
//!
//!     Nothing short of unusable input stops a parse. Blocks that cannot become entries,
//!     duplicate names, alias collisions and dangling references are reported as
//!     [Diagnostic]s next to the lexicon, each pointing at the source line that caused it.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning,
    Information,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
        }
    }
}

/// Stable machine-readable identifier of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    MissingHeading,
    EmptyName,
    EmptyBody,
    DuplicateEntry,
    AliasConflict,
    UnresolvedReference,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::MissingHeading => "missing-heading",
            DiagnosticCode::EmptyName => "empty-name",
            DiagnosticCode::EmptyBody => "empty-body",
            DiagnosticCode::DuplicateEntry => "duplicate-entry",
            DiagnosticCode::AliasConflict => "alias-conflict",
            DiagnosticCode::UnresolvedReference => "unresolved-reference",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: DiagnosticCode,
    /// 1-based source line
    pub line: usize,
    /// The other side of a conflict
    pub related_line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: DiagnosticSeverity,
        code: DiagnosticCode,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            line,
            related_line: None,
            message: message.into(),
        }
    }

    pub fn warning(code: DiagnosticCode, line: usize, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, code, line, message)
    }

    pub fn info(code: DiagnosticCode, line: usize, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Information, code, line, message)
    }

    pub fn with_related_line(mut self, line: usize) -> Self {
        self.related_line = Some(line);
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == DiagnosticSeverity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] line {}: {}",
            self.severity, self.code, self.line, self.message
        )
    }
}
