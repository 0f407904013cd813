//! # lilex
//!
//! A parser for the Life Lexicon plain-text format.
//!
//! File Layout
//!
//! The parser is a strict linear pipeline of three stages, each living in its own module so
//! that every extraction rule can be tested in isolation. The contract is a single global
//! input (the lexicon text plus the format rules) and a single global output (the
//! [`Lexicon`](lilex::model::Lexicon) and its diagnostics).
//!
//! src/lilex
//!   ├── rules         Format conventions (delimiters, labels), compiled once
//!   ├── lexing        logos tokenizer shared by the extraction rules
//!   ├── segmenting    Source text → RawBlock sequence
//!   ├── extraction    RawBlock → Entry
//!   ├── assembling    Entry sequence → Lexicon + conflict diagnostics
//!   ├── pipeline      LexiconParser façade tying the stages together
//!   └── loader        Source loading from strings or files
//!
//! For testing guidelines, see the [testing module](lilex::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod lilex;

pub use lilex::error::{ExtractError, ParseError};
pub use lilex::loader::{LexiconLoader, LoaderError};
pub use lilex::model::{
    Diagnostic, DiagnosticCode, DiagnosticSeverity, Diagram, Entry, Lexicon, UnresolvedReference,
};
pub use lilex::pipeline::{parse_lexicon, LexiconParser, Parsed};
pub use lilex::rules::{FormatRules, RulesError};
