//! Lexicon loading utilities
//!
//! This module provides `LexiconLoader` - a utility for loading lexicon text from files or
//! strings and running the parser on it. This is used by both the CLI and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use lilex_parser::lilex::loader::LexiconLoader;
//!
//! // From file
//! let parsed = LexiconLoader::from_path("lexicon.txt")?.parse()?;
//!
//! // From string
//! let parsed = LexiconLoader::from_string(":block: A still life.\n").parse()?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::lilex::error::ParseError;
use crate::lilex::pipeline::{LexiconParser, Parsed};

/// Error that can occur when loading lexicons
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Holds lexicon source text and parses it on demand.
pub struct LexiconLoader {
    source: Vec<u8>,
}

impl LexiconLoader {
    /// Load from a file path. The contents are only checked to be text when parsed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(LexiconLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        LexiconLoader {
            source: source.into().into_bytes(),
        }
    }

    /// Parse with the default format rules.
    pub fn parse(&self) -> Result<Parsed, LoaderError> {
        self.parse_with(&LexiconParser::default())
    }

    pub fn parse_with(&self, parser: &LexiconParser) -> Result<Parsed, LoaderError> {
        Ok(parser.parse_bytes(&self.source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let parsed = LexiconLoader::from_string(":block: A still life.\n")
            .parse()
            .expect("parses");
        assert!(parsed.lexicon.contains("block"));
    }

    #[test]
    fn test_missing_file() {
        let result = LexiconLoader::from_path("/nonexistent/lexicon.txt");
        match result {
            Err(LoaderError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/lexicon.txt"))
            }
            _ => panic!("expected an io error"),
        }
    }

    #[test]
    fn test_parse_error_is_wrapped() {
        let result = LexiconLoader::from_string("").parse();
        assert!(matches!(result, Err(LoaderError::Parse(ParseError::Empty))));
    }
}
