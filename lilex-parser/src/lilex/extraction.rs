//! Entry extraction
//!
//!     Turns one [RawBlock] into an [Entry]. The block is read top to bottom:
//!
//!         :glider: (c/4 diagonally, p4) The smallest {spaceship}.    <- heading, attributes
//!                 Also known as: gosper glider                        <- header fields
//!                 .O.                                                  <- diagram
//!                 ..O
//!                 OOO
//!                 It is often seen crashing into a {block}.           <- description
//!
//!     1. The heading line gives the name. Its remainder may open with an attribute group,
//!        whose items become categories (see [header]).
//!     2. Lines directly after the heading that start with an alias or category label are
//!        header fields. They are removed from the description.
//!     3. Remaining lines are the body. Diagram rows are collected into diagrams, the rest is
//!        scanned once for references and collapsed into the description (see [body]).
//!
//!     A block is rejected with an [ExtractError] when it has no heading, the name is empty,
//!     or there is nothing left after the heading.
//!
//!     An entry whose whole body is the synonym prefix and one reference, as in
//!     `:carrier: = {aircraft carrier}`, is a synonym. [EntryExtractor::synonym_target] names
//!     the entry it points at, and the assembler turns it into an alias of that entry.

mod body;
mod header;

use crate::lilex::error::ExtractError;
use crate::lilex::model::Entry;
use crate::lilex::normalization::{collapse_whitespace, normalize_name};
use crate::lilex::rules::RuleSet;
use crate::lilex::segmenting::RawBlock;

/// Extracts entries from raw blocks using a compiled rule set.
#[derive(Debug, Clone, Copy)]
pub struct EntryExtractor<'r> {
    rules: &'r RuleSet,
}

impl<'r> EntryExtractor<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    pub fn extract(&self, block: &RawBlock<'_>) -> Result<Entry, ExtractError> {
        let line = block.start_line;
        let lines: Vec<&str> = block.text.lines().collect();
        let heading = lines
            .first()
            .and_then(|first| self.rules.match_heading(first))
            .ok_or(ExtractError::MissingHeading { line })?;

        let display_name = collapse_whitespace(heading.name);
        let name = normalize_name(&display_name);
        if name.is_empty() {
            return Err(ExtractError::EmptyName { line });
        }

        let mut header = header::parse_header(heading.rest, &lines, self.rules);
        header.aliases.remove(&name);
        let body = body::parse_body(header.rest, &lines[header.body_start..], self.rules);

        if body.description.is_empty()
            && body.diagrams.is_empty()
            && header.aliases.is_empty()
            && header.categories.is_empty()
        {
            return Err(ExtractError::EmptyBody {
                name: display_name,
                line,
            });
        }

        Ok(Entry {
            name,
            display_name,
            aliases: header.aliases,
            description: body.description,
            categories: header.categories,
            references: body.references,
            diagrams: body.diagrams,
            source_line: line,
        })
    }

    /// The target of a synonym entry, or `None` for an ordinary entry.
    pub fn synonym_target(&self, entry: &Entry) -> Option<String> {
        let prefix = self.rules.synonym_prefix()?;
        if !(entry.categories.is_empty() && entry.aliases.is_empty() && entry.diagrams.is_empty()) {
            return None;
        }
        let [target] = entry.references.as_slice() else {
            return None;
        };
        let reference = if self.rules.strip_reference_delimiters() {
            target.clone()
        } else {
            let pair = self.rules.reference();
            format!("{}{}{}", pair.open, target, pair.close)
        };
        let rest = entry.description.strip_prefix(prefix)?.trim_start();
        (rest == reference).then(|| target.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lilex::rules::FormatRules;

    fn rules() -> RuleSet {
        RuleSet::compile(&FormatRules::default()).expect("default rules compile")
    }

    fn block(start_line: usize, text: &str) -> RawBlock<'_> {
        RawBlock {
            start_line,
            span: 0..text.len(),
            text,
        }
    }

    #[test]
    fn test_extracts_full_entry() {
        let rules = rules();
        let text = ":Glider: (c/4 diagonally, p4) The smallest {spaceship}.\n\
                    \tAlso known as: {Gosper glider}, glider.\n\
                    \t.O.\n\
                    \t..O\n\
                    \tOOO\n\
                    \tOften crashes into a {block}.";
        let entry = EntryExtractor::new(&rules)
            .extract(&block(40, text))
            .expect("extracts");

        assert_eq!(entry.name, "glider");
        assert_eq!(entry.display_name, "Glider");
        assert_eq!(entry.source_line, 40);
        assert_eq!(
            entry.description,
            "The smallest {spaceship}. Often crashes into a {block}."
        );
        assert_eq!(entry.references, vec!["spaceship", "block"]);
        assert_eq!(
            entry.categories.iter().collect::<Vec<_>>(),
            vec!["c/4 diagonally", "p4"]
        );
        // the alias equal to the entry's own name is dropped
        assert_eq!(entry.aliases.iter().collect::<Vec<_>>(), vec!["gosper glider"]);
        assert_eq!(entry.diagrams.len(), 1);
    }

    #[test]
    fn test_name_whitespace_is_collapsed() {
        let rules = rules();
        let entry = EntryExtractor::new(&rules)
            .extract(&block(1, ":  Gosper   glider gun : The first gun."))
            .expect("extracts");
        assert_eq!(entry.display_name, "Gosper glider gun");
        assert_eq!(entry.name, "gosper glider gun");
    }

    #[test]
    fn test_missing_heading() {
        let rules = rules();
        let result = EntryExtractor::new(&rules).extract(&block(5, "stray text\nmore"));
        assert_eq!(result, Err(ExtractError::MissingHeading { line: 5 }));
    }

    #[test]
    fn test_empty_name() {
        let rules = rules();
        let result = EntryExtractor::new(&rules).extract(&block(7, ": : text"));
        assert_eq!(result, Err(ExtractError::EmptyName { line: 7 }));
    }

    #[test]
    fn test_empty_body() {
        let rules = rules();
        let result = EntryExtractor::new(&rules).extract(&block(9, ":gamma:"));
        assert_eq!(
            result,
            Err(ExtractError::EmptyBody {
                name: "gamma".into(),
                line: 9
            })
        );
    }

    #[test]
    fn test_attributes_alone_are_a_body() {
        let rules = rules();
        let entry = EntryExtractor::new(&rules)
            .extract(&block(1, ":beehive: (p1)"))
            .expect("extracts");
        assert_eq!(entry.description, "");
        assert!(entry.categories.contains("p1"));
    }

    #[test]
    fn test_diagram_only_entry() {
        let rules = rules();
        let entry = EntryExtractor::new(&rules)
            .extract(&block(1, ":block:\n\tOO\n\tOO"))
            .expect("extracts");
        assert_eq!(entry.description, "");
        assert_eq!(entry.diagrams[0].rows, vec!["OO", "OO"]);
    }

    #[test]
    fn test_crlf_block() {
        let rules = rules();
        let entry = EntryExtractor::new(&rules)
            .extract(&block(1, ":a: first\r\n\tsecond {b}\r\n\tOO"))
            .expect("extracts");
        assert_eq!(entry.description, "first second {b}");
        assert_eq!(entry.references, vec!["b"]);
        assert_eq!(entry.diagrams[0].rows, vec!["OO"]);
    }

    #[test]
    fn test_wrapped_attribute_group() {
        let rules = rules();
        let entry = EntryExtractor::new(&rules)
            .extract(&block(1, ":x: (c/4 diagonally,\n\tp4) The smallest."))
            .expect("extracts");
        assert_eq!(
            entry.categories.iter().collect::<Vec<_>>(),
            vec!["c/4 diagonally", "p4"]
        );
        assert_eq!(entry.description, "The smallest.");
    }

    #[test]
    fn test_synonym_target() {
        let rules = rules();
        let extractor = EntryExtractor::new(&rules);
        let synonym = extractor
            .extract(&block(3, ":carrier: = {aircraft\n\tcarrier}"))
            .expect("extracts");
        assert_eq!(
            extractor.synonym_target(&synonym),
            Some("aircraft carrier".to_string())
        );

        for text in [
            ":carrier: = {aircraft carrier} and more",
            ":carrier: (p1) = {aircraft carrier}",
            ":carrier: See {aircraft carrier}",
            ":carrier: = {ship} or {boat}",
        ] {
            let entry = extractor.extract(&block(1, text)).expect("extracts");
            assert_eq!(extractor.synonym_target(&entry), None, "{text}");
        }
    }

    #[test]
    fn test_synonyms_disabled() {
        let rules = RuleSet::compile(&FormatRules {
            synonym_prefix: String::new(),
            ..FormatRules::default()
        })
        .expect("compiles");
        let extractor = EntryExtractor::new(&rules);
        let entry = extractor
            .extract(&block(1, ":carrier: = {aircraft carrier}"))
            .expect("extracts");
        assert_eq!(extractor.synonym_target(&entry), None);
    }
}
