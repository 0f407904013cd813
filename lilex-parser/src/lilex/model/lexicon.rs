use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::Entry;
use crate::lilex::normalization::normalize_name;

/// A reference that names no entry or alias of the lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedReference {
    /// Key of the referring entry
    pub entry: String,
    /// The reference as written
    pub reference: String,
    /// Source line of the referring entry
    pub line: usize,
}

/// The assembled lexicon.
///
/// Built once by the assembler and read-only afterwards. All lookups accept names in any
/// case and spacing and follow aliases to their entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    entries: BTreeMap<String, Entry>,
    aliases: BTreeMap<String, String>,
    unresolved: Vec<UnresolvedReference>,
}

impl Lexicon {
    pub(crate) fn from_parts(
        entries: BTreeMap<String, Entry>,
        aliases: BTreeMap<String, String>,
        unresolved: Vec<UnresolvedReference>,
    ) -> Self {
        Self {
            entries,
            aliases,
            unresolved,
        }
    }

    /// Look up an entry by name or alias.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        let key = self.canonical_name(name)?;
        self.entries.get(key)
    }

    /// The entry key a name or alias resolves to.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        let key = normalize_name(name);
        if let Some((key, _)) = self.entries.get_key_value(&key) {
            return Some(key.as_str());
        }
        self.aliases.get(&key).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Alias key to entry key.
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    /// Entries whose description references `name` (directly or through an alias).
    pub fn referrers(&self, name: &str) -> Vec<&Entry> {
        let Some(target) = self.canonical_name(name) else {
            return Vec::new();
        };
        self.entries
            .values()
            .filter(|entry| {
                entry
                    .references
                    .iter()
                    .any(|reference| self.canonical_name(reference) == Some(target))
            })
            .collect()
    }

    pub fn in_category<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a Entry> + 'a {
        let category = normalize_name(category);
        self.entries
            .values()
            .filter(move |entry| entry.categories.contains(&category))
    }
}
