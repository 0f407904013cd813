//! Property-based tests for the parsing pipeline
//!
//! Documents are generated from a small, valid subset of the lexicon format:
//! one heading line per entry, a description that starts with "Pattern" so it is never
//! mistaken for a header label, and optional references between braces.

use std::collections::BTreeSet;

use lilex_parser::lilex::model::DiagnosticCode;
use lilex_parser::{parse_lexicon, Lexicon};
use proptest::prelude::*;

/// Generate a set of distinct entry names
fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,8}", 1..12).prop_map(|set| set.into_iter().collect())
}

/// Generate description words
fn words_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,10}", 0..6).prop_map(|words| words.join(" "))
}

fn render(entries: &[(String, String, Vec<String>)]) -> String {
    let mut source = String::from("A generated lexicon\n\n");
    for (name, words, references) in entries {
        source.push_str(&format!(":{name}: Pattern {words}"));
        for reference in references {
            source.push_str(&format!(" see {{{reference}}}"));
        }
        source.push_str(".\n\n");
    }
    source
}

/// Entries with references to other generated names or to unknown names
fn document_strategy() -> impl Strategy<Value = Vec<(String, String, Vec<String>)>> {
    names_strategy().prop_flat_map(|names| {
        let pool: Vec<String> = names
            .iter()
            .cloned()
            .chain(["Unknown Pattern".to_string(), "ghost".to_string()])
            .collect();
        let count = names.len();
        (
            Just(names),
            prop::collection::vec(words_strategy(), count),
            prop::collection::vec(prop::collection::vec(prop::sample::select(pool), 0..4), count),
        )
            .prop_map(|(names, words, references)| {
                names
                    .into_iter()
                    .zip(words)
                    .zip(references)
                    .map(|((name, words), references)| (name, words, references))
                    .collect()
            })
    })
}

fn is_known(lexicon: &Lexicon, reference: &str) -> bool {
    lexicon.contains(reference)
}

mod lexicon_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_one_entry_per_block(document in document_strategy()) {
            let source = render(&document);
            let parsed = parse_lexicon(&source).expect("parses");

            prop_assert_eq!(parsed.lexicon.len(), document.len());
            prop_assert_eq!(parsed.warnings().count(), 0);
            for (index, (name, _, _)) in document.iter().enumerate() {
                let entry = parsed.lexicon.get(name).expect("entry present");
                prop_assert_eq!(&entry.name, name);
                prop_assert!(!entry.name.is_empty());
                // front matter takes two lines, every entry two more
                prop_assert_eq!(entry.source_line, 3 + 2 * index);
            }
        }

        #[test]
        fn test_parsing_twice_is_identical(document in document_strategy()) {
            let source = render(&document);
            let first = parse_lexicon(&source).expect("parses");
            let second = parse_lexicon(&source).expect("parses");
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_references_resolve_or_are_listed(document in document_strategy()) {
            let source = render(&document);
            let lexicon = parse_lexicon(&source).expect("parses").lexicon;

            for entry in lexicon.entries() {
                let listed: BTreeSet<&str> = lexicon
                    .unresolved()
                    .iter()
                    .filter(|u| u.entry == entry.name)
                    .map(|u| u.reference.as_str())
                    .collect();
                for reference in &entry.references {
                    prop_assert!(is_known(&lexicon, reference) != listed.contains(reference.as_str()));
                }
            }
        }

        #[test]
        fn test_duplicate_name_later_wins(name in "[a-z]{1,8}", first in words_strategy(), second in words_strategy()) {
            let source = format!(":{name}: Pattern one {first}.\n\n:{}: Pattern two {second}.\n", name.to_uppercase());
            let parsed = parse_lexicon(&source).expect("parses");

            prop_assert_eq!(parsed.lexicon.len(), 1);
            let entry = parsed.lexicon.get(&name).expect("entry present");
            prop_assert_eq!(entry.source_line, 3);
            prop_assert!(entry.description.starts_with("Pattern two"));

            let conflicts: Vec<_> = parsed
                .diagnostics
                .iter()
                .filter(|d| d.code == DiagnosticCode::DuplicateEntry)
                .map(|d| (d.line, d.related_line))
                .collect();
            prop_assert_eq!(conflicts, vec![(3, Some(1))]);
        }

        #[test]
        fn test_alias_resolves_to_its_entry(names in names_strategy(), alias in "[a-z]{1,8}") {
            let alias = format!("alias {alias}");
            let source = format!(
                ":{}: Pattern with an alias.\n\tAlso known as: {alias}\n\n{}",
                names[0],
                names[1..]
                    .iter()
                    .map(|name| format!(":{name}: Pattern.\n\n"))
                    .collect::<String>()
            );
            let parsed = parse_lexicon(&source).expect("parses");

            prop_assert_eq!(parsed.lexicon.get(&alias), parsed.lexicon.get(&names[0]));
            prop_assert!(parsed.lexicon.get(&alias).is_some());
        }
    }
}
