//! JSON format
//!
//! Pretty-printed with two-space indentation. Maps serialize in key order, so the output
//! for a given lexicon is stable.

use crate::error::FormatError;
use crate::format::Format;
use lilex_parser::Lexicon;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Lexicon as pretty-printed JSON"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Lexicon, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, lexicon: &Lexicon) -> Result<String, FormatError> {
        serde_json::to_string_pretty(lexicon)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
