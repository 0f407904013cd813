//! Error types
//!
//!     Two tiers. [ParseError] aborts the whole parse; it is only returned for input that has
//!     no usable lexicon in it at all. [ExtractError] rejects a single block; the pipeline turns
//!     it into a warning [Diagnostic] and carries on with the next block.

use thiserror::Error;

use crate::lilex::model::{Diagnostic, DiagnosticCode};

/// Unrecoverable input problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,

    #[error("input is not valid UTF-8 text (valid up to byte {valid_up_to})")]
    NotText { valid_up_to: usize },

    #[error("no entries found in input")]
    NoEntries,
}

/// A block that cannot become an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("text block has no entry heading")]
    MissingHeading { line: usize },

    #[error("entry heading has an empty name")]
    EmptyName { line: usize },

    #[error("entry {name:?} has no body")]
    EmptyBody { name: String, line: usize },
}

impl ExtractError {
    pub fn line(&self) -> usize {
        match self {
            ExtractError::MissingHeading { line }
            | ExtractError::EmptyName { line }
            | ExtractError::EmptyBody { line, .. } => *line,
        }
    }

    pub fn code(&self) -> DiagnosticCode {
        match self {
            ExtractError::MissingHeading { .. } => DiagnosticCode::MissingHeading,
            ExtractError::EmptyName { .. } => DiagnosticCode::EmptyName,
            ExtractError::EmptyBody { .. } => DiagnosticCode::EmptyBody,
        }
    }
}

impl From<ExtractError> for Diagnostic {
    fn from(error: ExtractError) -> Self {
        Diagnostic::warning(error.code(), error.line(), error.to_string())
    }
}
