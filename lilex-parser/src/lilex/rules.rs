//! Format rules
//!
//!     The lexicon is a hand-authored text file, and the conventions it follows (how an entry
//!     heading looks, what a separator rule is, which labels introduce aliases) are not a
//!     published grammar but habits of its editors. None of the pipeline stages hard-code
//!     them. They read a [RuleSet], compiled once from the plain-data [FormatRules].
//!
//! Defaults
//!
//!     [FormatRules::default] encodes the ASCII release of the Life Lexicon:
//!
//!         :glider: (c/4 diagonally, p4) The smallest, most common and first
//!                 discovered {spaceship}.
//!                 .O.
//!                 ..O
//!                 OOO
//!
//!     - an entry starts at a line beginning with its name between colons,
//!     - a parenthesised group right after the heading holds the entry's attributes,
//!     - inline cross-references are written between braces,
//!     - indented lines made of `.` and `O` are pattern diagrams, as long as some row shows a
//!       live `O` cell (a lone `...` line is an ellipsis),
//!     - an entry whose whole body is `= {target}` is a synonym of the target,
//!     - lines of dashes separate the letter sections and the bibliography.
//!
//!     The same defaults ship in `lilex-config` as `defaults/lilex.default.toml`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lilex::lexing::BRACKET_CHARS;

pub const DEFAULT_HEADING_PATTERN: &str = r"^:(?P<name>[^:\n]*):(?:[ \t]+|$)";

/// Plain-data description of the lexicon's text conventions.
///
/// This is the shape read from configuration files. It is validated and compiled into a
/// [RuleSet] before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatRules {
    /// Regex matched against each line; a match starts a new entry. Must define a `name`
    /// capture group. Text after the match is part of the entry body.
    pub heading_pattern: String,
    /// Character a separator rule is made of.
    pub separator_char: String,
    pub separator_min_len: usize,
    /// Blank-line runs end a block.
    pub split_on_blank_lines: bool,
    /// A headless run of lines whose first line is indented continues the previous block.
    pub merge_indented_continuations: bool,
    /// Open and close characters of an inline reference, e.g. `{}`.
    pub reference_delimiters: String,
    pub strip_reference_delimiters: bool,
    /// Open and close characters of the leading attribute group, e.g. `()`.
    pub attribute_delimiters: String,
    pub leading_attributes: bool,
    pub attribute_separators: String,
    pub category_labels: Vec<String>,
    pub category_separators: String,
    pub alias_labels: Vec<String>,
    pub alias_separators: String,
    /// Cell characters of pattern diagrams.
    pub diagram_chars: String,
    /// Diagram characters that draw dead cells. A diagram needs at least one other cell.
    pub dead_cell_chars: String,
    /// Marker opening a synonym body such as `= {aircraft carrier}`. Empty disables synonyms.
    pub synonym_prefix: String,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            heading_pattern: DEFAULT_HEADING_PATTERN.to_string(),
            separator_char: "-".to_string(),
            separator_min_len: 20,
            split_on_blank_lines: true,
            merge_indented_continuations: true,
            reference_delimiters: "{}".to_string(),
            strip_reference_delimiters: false,
            attribute_delimiters: "()".to_string(),
            leading_attributes: true,
            attribute_separators: ",;".to_string(),
            category_labels: vec![
                "Categories".to_string(),
                "Category".to_string(),
                "Tags".to_string(),
            ],
            category_separators: ",/".to_string(),
            alias_labels: vec![
                "Also known as".to_string(),
                "Also called".to_string(),
                "AKA".to_string(),
            ],
            alias_separators: ",;".to_string(),
            diagram_chars: ".O*".to_string(),
            dead_cell_chars: ".".to_string(),
            synonym_prefix: "=".to_string(),
        }
    }
}

/// Errors found while compiling [FormatRules].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid heading pattern: {0}")]
    InvalidHeadingPattern(String),

    #[error("heading pattern must define a `name` capture group")]
    MissingNameGroup,

    #[error("{field} must be exactly one character, got {value:?}")]
    NotASingleChar { field: &'static str, value: String },

    #[error("{field} must be two distinct bracket characters out of ()[]{{}}<>, got {value:?}")]
    InvalidDelimiters { field: &'static str, value: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// An open/close bracket pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    pub open: char,
    pub close: char,
}

impl BracketPair {
    fn parse(field: &'static str, value: &str) -> Result<Self, RulesError> {
        let invalid = || RulesError::InvalidDelimiters {
            field,
            value: value.to_string(),
        };
        let mut chars = value.chars();
        let (open, close) = match (chars.next(), chars.next(), chars.next()) {
            (Some(open), Some(close), None) => (open, close),
            _ => return Err(invalid()),
        };
        if open == close || !BRACKET_CHARS.contains(open) || !BRACKET_CHARS.contains(close) {
            return Err(invalid());
        }
        Ok(Self { open, close })
    }
}

/// A heading line split into the entry name and the text that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    pub name: &'a str,
    pub rest: &'a str,
}

/// Compiled, validated format rules shared by all pipeline stages.
#[derive(Debug, Clone)]
pub struct RuleSet {
    heading: Regex,
    separator_char: char,
    separator_min_len: usize,
    split_on_blank_lines: bool,
    merge_indented_continuations: bool,
    reference: BracketPair,
    strip_reference_delimiters: bool,
    attributes: Option<BracketPair>,
    attribute_separators: Vec<char>,
    category_labels: Vec<String>,
    category_separators: Vec<char>,
    alias_labels: Vec<String>,
    alias_separators: Vec<char>,
    diagram_chars: Vec<char>,
    dead_cell_chars: Vec<char>,
    synonym_prefix: Option<String>,
}

impl RuleSet {
    pub fn compile(rules: &FormatRules) -> Result<Self, RulesError> {
        let heading = Regex::new(&rules.heading_pattern)
            .map_err(|e| RulesError::InvalidHeadingPattern(e.to_string()))?;
        if !heading.capture_names().any(|name| name == Some("name")) {
            return Err(RulesError::MissingNameGroup);
        }

        let mut separator = rules.separator_char.chars();
        let separator_char = match (separator.next(), separator.next()) {
            (Some(c), None) if !c.is_whitespace() => c,
            _ => {
                return Err(RulesError::NotASingleChar {
                    field: "separator_char",
                    value: rules.separator_char.clone(),
                })
            }
        };

        let attributes = if rules.leading_attributes {
            Some(BracketPair::parse(
                "attribute_delimiters",
                &rules.attribute_delimiters,
            )?)
        } else {
            None
        };

        if rules.diagram_chars.trim().is_empty() {
            return Err(RulesError::Empty {
                field: "diagram_chars",
            });
        }

        Ok(Self {
            heading,
            separator_char,
            separator_min_len: rules.separator_min_len.max(1),
            split_on_blank_lines: rules.split_on_blank_lines,
            merge_indented_continuations: rules.merge_indented_continuations,
            reference: BracketPair::parse("reference_delimiters", &rules.reference_delimiters)?,
            strip_reference_delimiters: rules.strip_reference_delimiters,
            attributes,
            attribute_separators: rules.attribute_separators.chars().collect(),
            category_labels: clean_labels(&rules.category_labels),
            category_separators: rules.category_separators.chars().collect(),
            alias_labels: clean_labels(&rules.alias_labels),
            alias_separators: rules.alias_separators.chars().collect(),
            diagram_chars: rules.diagram_chars.chars().filter(|c| !c.is_whitespace()).collect(),
            dead_cell_chars: rules.dead_cell_chars.chars().filter(|c| !c.is_whitespace()).collect(),
            synonym_prefix: Some(rules.synonym_prefix.trim())
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_string),
        })
    }

    /// Split a heading line into name and remainder, if the line is a heading at all.
    pub fn match_heading<'a>(&self, line: &'a str) -> Option<Heading<'a>> {
        let captures = self.heading.captures(line)?;
        let name = captures.name("name")?.as_str();
        let end = captures.get(0).map_or(0, |m| m.end());
        Some(Heading {
            name,
            rest: &line[end..],
        })
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.heading.is_match(line)
    }

    /// A separator rule: only the separator character, repeated at least the minimum length.
    pub fn is_separator(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let mut count = 0usize;
        for c in trimmed.chars() {
            if c != self.separator_char {
                return false;
            }
            count += 1;
        }
        count >= self.separator_min_len
    }

    /// An indented line made only of diagram cell characters.
    pub fn is_diagram_row(&self, line: &str) -> bool {
        let row = line.trim();
        !row.is_empty()
            && line.starts_with(char::is_whitespace)
            && row.chars().all(|c| self.diagram_chars.contains(&c))
    }

    /// A diagram row drawing at least one live cell.
    pub fn has_live_cell(&self, row: &str) -> bool {
        row.chars()
            .any(|c| self.diagram_chars.contains(&c) && !self.dead_cell_chars.contains(&c))
    }

    /// If `line` starts with one of the category labels, the text after the label.
    pub fn category_field<'a>(&self, line: &'a str) -> Option<&'a str> {
        strip_label(line, &self.category_labels)
    }

    /// If `line` starts with one of the alias labels, the text after the label.
    pub fn alias_field<'a>(&self, line: &'a str) -> Option<&'a str> {
        strip_label(line, &self.alias_labels)
    }

    pub fn split_on_blank_lines(&self) -> bool {
        self.split_on_blank_lines
    }

    pub fn merge_indented_continuations(&self) -> bool {
        self.merge_indented_continuations
    }

    pub fn reference(&self) -> BracketPair {
        self.reference
    }

    pub fn strip_reference_delimiters(&self) -> bool {
        self.strip_reference_delimiters
    }

    pub fn attributes(&self) -> Option<BracketPair> {
        self.attributes
    }

    pub fn attribute_separators(&self) -> &[char] {
        &self.attribute_separators
    }

    pub fn category_separators(&self) -> &[char] {
        &self.category_separators
    }

    pub fn alias_separators(&self) -> &[char] {
        &self.alias_separators
    }

    pub fn synonym_prefix(&self) -> Option<&str> {
        self.synonym_prefix.as_deref()
    }
}

fn clean_labels(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|label| label.trim().trim_end_matches(':').trim_end().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Match a label at the start of a line, case-insensitively.
///
/// The label must be followed by `:`, whitespace or the end of the line, so `Category` does not
/// match `Categories: ...`. An optional colon after the label is consumed.
fn strip_label<'a>(line: &'a str, labels: &[String]) -> Option<&'a str> {
    let text = line.trim_start();
    labels.iter().find_map(|label| {
        let head = text.get(..label.len())?;
        if !head.eq_ignore_ascii_case(label) {
            return None;
        }
        let after = &text[label.len()..];
        match after.chars().next() {
            None => Some(after),
            Some(':') => Some(after[1..].trim_start()),
            Some(c) if c.is_whitespace() => Some(after.trim_start()),
            Some(_) => None,
        }
    })
}
