//! JavaScript module format
//!
//! Wraps the JSON rendering in an ES module so the lexicon can be imported directly:
//!
//!     // Generated on 2026-01-02T03:04:05+00:00
//!     export default { ... };

use chrono::{DateTime, Utc};

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::json::JsonFormat;
use lilex_parser::Lexicon;

/// Serialize-only ES module output. The timestamp is the current time unless pinned.
#[derive(Debug, Clone, Default)]
pub struct JsModuleFormat {
    timestamp: Option<DateTime<Utc>>,
}

impl JsModuleFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed generation time instead of the clock.
    pub fn with_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(timestamp),
        }
    }
}

impl Format for JsModuleFormat {
    fn name(&self) -> &str {
        "js"
    }

    fn description(&self) -> &str {
        "Lexicon as an ES module exporting the JSON object"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, lexicon: &Lexicon) -> Result<String, FormatError> {
        let json = JsonFormat.serialize(lexicon)?;
        let timestamp = self.timestamp.unwrap_or_else(Utc::now);
        Ok(format!(
            "// Generated on {}\nexport default {};\n",
            timestamp.to_rfc3339(),
            json
        ))
    }
}
