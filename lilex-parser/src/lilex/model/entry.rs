use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A pattern picture, one string per row of cell characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagram {
    pub rows: Vec<String>,
}

impl Diagram {
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// One lexicon entry.
///
/// `name` is the lookup key (whitespace collapsed, lowercased). `display_name` keeps the
/// heading as written. Sets serialize sorted, so two entries built from the same text in any
/// order compare and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub display_name: String,
    pub aliases: BTreeSet<String>,
    pub description: String,
    pub categories: BTreeSet<String>,
    /// Referenced names as written, in order of first appearance
    pub references: Vec<String>,
    pub diagrams: Vec<Diagram>,
    pub source_line: usize,
}

impl Entry {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(&crate::lilex::normalization::normalize_name(category))
    }
}
