//! Fluent assertions over a [Lexicon] and its entries.
//!
//! Lookups go through [Lexicon::get], so names may be given in any case and aliases work.

use crate::lilex::model::{Entry, Lexicon};

/// Create an assertion builder for a lexicon
pub fn assert_lexicon(lexicon: &Lexicon) -> LexiconAssertion<'_> {
    LexiconAssertion { lexicon }
}

pub struct LexiconAssertion<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> LexiconAssertion<'a> {
    pub fn entry_count(self, expected: usize) -> Self {
        let actual = self.lexicon.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} entries, found {}: {:?}",
            expected,
            actual,
            self.lexicon.names().collect::<Vec<_>>()
        );
        self
    }

    pub fn has_entry(self, name: &str) -> Self {
        assert!(
            self.lexicon.get(name).is_some(),
            "Expected entry '{}', lexicon has {:?}",
            name,
            self.lexicon.names().collect::<Vec<_>>()
        );
        self
    }

    pub fn lacks_entry(self, name: &str) -> Self {
        assert!(
            self.lexicon.get(name).is_none(),
            "Expected no entry '{}'",
            name
        );
        self
    }

    /// Run assertions against one entry
    pub fn entry<F>(self, name: &str, check: F) -> Self
    where
        F: FnOnce(EntryAssertion<'a>) -> EntryAssertion<'a>,
    {
        let entry = self.lexicon.get(name).unwrap_or_else(|| {
            panic!(
                "Expected entry '{}', lexicon has {:?}",
                name,
                self.lexicon.names().collect::<Vec<_>>()
            )
        });
        check(EntryAssertion {
            entry,
            context: format!("entry '{}'", name),
        });
        self
    }

    /// `name` resolves (directly or as an alias) to the entry keyed `target`
    pub fn resolves(self, name: &str, target: &str) -> Self {
        assert_eq!(
            self.lexicon.canonical_name(name),
            Some(target),
            "Expected '{}' to resolve to '{}'",
            name,
            target
        );
        self
    }

    /// The unresolved list, as `(entry, reference)` pairs in order
    pub fn unresolved(self, expected: &[(&str, &str)]) -> Self {
        let actual: Vec<(&str, &str)> = self
            .lexicon
            .unresolved()
            .iter()
            .map(|u| (u.entry.as_str(), u.reference.as_str()))
            .collect();
        assert_eq!(actual, expected, "Unexpected unresolved references");
        self
    }

    pub fn no_unresolved(self) -> Self {
        self.unresolved(&[])
    }
}

pub struct EntryAssertion<'a> {
    entry: &'a Entry,
    context: String,
}

impl<'a> EntryAssertion<'a> {
    pub fn entry(&self) -> &'a Entry {
        self.entry
    }

    pub fn display_name(self, expected: &str) -> Self {
        assert_eq!(
            self.entry.display_name, expected,
            "{}: unexpected display name",
            self.context
        );
        self
    }

    pub fn description(self, expected: &str) -> Self {
        assert_eq!(
            self.entry.description, expected,
            "{}: unexpected description",
            self.context
        );
        self
    }

    pub fn description_starts_with(self, prefix: &str) -> Self {
        assert!(
            self.entry.description.starts_with(prefix),
            "{}: Expected description to start with '{}', but got '{}'",
            self.context,
            prefix,
            self.entry.description
        );
        self
    }

    pub fn description_contains(self, substring: &str) -> Self {
        assert!(
            self.entry.description.contains(substring),
            "{}: Expected description to contain '{}', but got '{}'",
            self.context,
            substring,
            self.entry.description
        );
        self
    }

    pub fn references(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.entry.references, expected,
            "{}: unexpected references",
            self.context
        );
        self
    }

    /// Categories, compared as a sorted list
    pub fn categories(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.entry.categories.iter().map(String::as_str).collect();
        let mut expected = expected.to_vec();
        expected.sort_unstable();
        assert_eq!(actual, expected, "{}: unexpected categories", self.context);
        self
    }

    /// Aliases, compared as a sorted list
    pub fn aliases(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.entry.aliases.iter().map(String::as_str).collect();
        let mut expected = expected.to_vec();
        expected.sort_unstable();
        assert_eq!(actual, expected, "{}: unexpected aliases", self.context);
        self
    }

    pub fn diagram_count(self, expected: usize) -> Self {
        assert_eq!(
            self.entry.diagrams.len(),
            expected,
            "{}: unexpected number of diagrams",
            self.context
        );
        self
    }

    pub fn diagram(self, index: usize, rows: &[&str]) -> Self {
        let diagram = self.entry.diagrams.get(index).unwrap_or_else(|| {
            panic!(
                "{}: Expected diagram {}, found {}",
                self.context,
                index,
                self.entry.diagrams.len()
            )
        });
        assert_eq!(diagram.rows, rows, "{}: diagram {}", self.context, index);
        self
    }

    pub fn source_line(self, expected: usize) -> Self {
        assert_eq!(
            self.entry.source_line, expected,
            "{}: unexpected source line",
            self.context
        );
        self
    }
}
