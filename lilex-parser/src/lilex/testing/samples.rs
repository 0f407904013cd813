//! Access to the curated sample lexicons under `docs/samples/`.

use std::fs;
use std::path::PathBuf;

use crate::lilex::pipeline::{LexiconParser, Parsed};

const SAMPLES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/docs/samples");

/// Entry point for sample files.
pub struct Samples;

impl Samples {
    pub fn minimal() -> SampleLoader {
        Self::named("minimal")
    }

    pub fn excerpt() -> SampleLoader {
        Self::named("lexicon-excerpt")
    }

    pub fn conflicts() -> SampleLoader {
        Self::named("conflicts")
    }

    pub fn malformed() -> SampleLoader {
        Self::named("malformed")
    }

    /// A sample by file stem, e.g. `"minimal"` for `docs/samples/minimal.txt`.
    pub fn named(name: &str) -> SampleLoader {
        SampleLoader {
            name: name.to_string(),
        }
    }

    pub fn dir() -> PathBuf {
        PathBuf::from(SAMPLES_DIR)
    }
}

/// A sample file, loaded on demand. Panics if the file is missing or fails to parse.
#[derive(Debug, Clone)]
pub struct SampleLoader {
    name: String,
}

impl SampleLoader {
    pub fn path(&self) -> PathBuf {
        Samples::dir().join(format!("{}.txt", self.name))
    }

    pub fn source(&self) -> String {
        let path = self.path();
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read sample {}: {}", path.display(), e))
    }

    pub fn parse(&self) -> Parsed {
        self.parse_with(&LexiconParser::default())
    }

    pub fn parse_with(&self, parser: &LexiconParser) -> Parsed {
        parser
            .parse(&self.source())
            .unwrap_or_else(|e| panic!("Failed to parse sample {}: {}", self.name, e))
    }
}
