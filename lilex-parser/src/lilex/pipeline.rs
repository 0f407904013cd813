//! Parsing pipeline
//!
//!     [LexiconParser] runs the three stages over a source text:
//!
//!         text --segment--> RawBlock* --extract--> Entry* --assemble--> Lexicon
//!
//!     Blocks are processed strictly in document order, so the result (including which of two
//!     duplicate entries survives) is fully determined by the text and the rules. Rejected
//!     blocks and conflicts end up in [Parsed::diagnostics]; only input without any entry
//!     blocks fails the parse.

use once_cell::sync::Lazy;

use crate::lilex::assembling::LexiconAssembler;
use crate::lilex::error::ParseError;
use crate::lilex::extraction::EntryExtractor;
use crate::lilex::model::{Diagnostic, Lexicon};
use crate::lilex::rules::{FormatRules, RuleSet, RulesError};
use crate::lilex::segmenting::Segmenter;

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::compile(&FormatRules::default()).expect("default format rules must compile")
});

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub lexicon: Lexicon,
    /// Sorted by source line
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// A parser with compiled format rules. Immutable; can be shared and reused.
#[derive(Debug, Clone)]
pub struct LexiconParser {
    rules: RuleSet,
}

impl Default for LexiconParser {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl LexiconParser {
    pub fn new(rules: &FormatRules) -> Result<Self, RulesError> {
        Ok(Self {
            rules: RuleSet::compile(rules)?,
        })
    }

    pub fn parse(&self, source: &str) -> Result<Parsed, ParseError> {
        if source.trim_start_matches('\u{feff}').trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let extractor = EntryExtractor::new(&self.rules);
        let mut assembler = LexiconAssembler::new();
        let mut diagnostics = Vec::new();
        let mut blocks = 0usize;

        for block in Segmenter::new(source, &self.rules) {
            blocks += 1;
            match extractor.extract(&block) {
                Ok(entry) => match extractor.synonym_target(&entry) {
                    Some(target) => assembler.push_synonym(entry, target),
                    None => assembler.push(entry),
                },
                Err(error) => {
                    tracing::debug!(line = error.line(), "skipping block: {error}");
                    diagnostics.push(Diagnostic::from(error));
                }
            }
        }

        if blocks == 0 {
            return Err(ParseError::NoEntries);
        }

        let (lexicon, conflicts) = assembler.finish();
        diagnostics.extend(conflicts);
        diagnostics.sort_by_key(|d| d.line);

        tracing::debug!(
            blocks,
            entries = lexicon.len(),
            diagnostics = diagnostics.len(),
            "parsed lexicon"
        );
        Ok(Parsed {
            lexicon,
            diagnostics,
        })
    }

    /// Parse raw bytes, which must be UTF-8. A leading byte order mark is ignored.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Parsed, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|e| ParseError::NotText {
            valid_up_to: e.valid_up_to(),
        })?;
        self.parse(text)
    }
}

/// Parse a lexicon with the default format rules.
pub fn parse_lexicon(source: &str) -> Result<Parsed, ParseError> {
    LexiconParser::default().parse(source)
}
