//! Format trait definition
//!
//! Every output (and input) representation of a [Lexicon] implements [Format].

use crate::error::FormatError;
use lilex_parser::Lexicon;

/// Trait for lexicon formats
///
/// Implementors convert between a string representation and a [Lexicon]. Formats can
/// support parsing, serialization, or both.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "json", "js")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    /// Read a lexicon back from this format's representation.
    fn parse(&self, _source: &str) -> Result<Lexicon, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _lexicon: &Lexicon) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
