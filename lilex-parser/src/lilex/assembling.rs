//! Lexicon assembly
//!
//!     Entries arrive in document order and are placed in three passes:
//!
//!     1. Entries by name. A later entry with the same name replaces the earlier one.
//!     2. Aliases, in document order. They come from the alias fields of entries and from
//!        synonym entries such as `:carrier: = {aircraft carrier}`. An alias never shadows a
//!        real entry, and the first claim keeps it. A synonym whose target is not an entry is
//!        kept as an ordinary entry.
//!     3. References, checked against entries and aliases. Misses are kept in the lexicon's
//!        unresolved list.
//!
//!     Every replacement or dropped alias is reported as a diagnostic pointing at both
//!     source lines. Since aliases and references are only looked at once all entries are
//!     placed, the result does not depend on where in the document a referenced entry sits.

use std::collections::{BTreeMap, BTreeSet};

use crate::lilex::model::{Diagnostic, DiagnosticCode, Entry, Lexicon, UnresolvedReference};
use crate::lilex::normalization::normalize_name;

/// A synonym entry waiting for its target to be placed.
#[derive(Debug)]
struct Synonym {
    entry: Entry,
    target: String,
}

/// One name claimed as an alias of `owner`.
#[derive(Debug)]
struct Claim {
    line: usize,
    alias: String,
    owner: String,
    /// Claimed by a synonym entry rather than an alias field of the owner
    synonym: bool,
}

/// Collects extracted entries and builds the final [Lexicon].
#[derive(Debug, Default)]
pub struct LexiconAssembler {
    entries: BTreeMap<String, Entry>,
    synonyms: Vec<Synonym>,
    diagnostics: Vec<Diagnostic>,
}

impl LexiconAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Of two entries with the same name, the one further down the document wins.
    pub fn push(&mut self, entry: Entry) {
        let Some(previous) = self.entries.get(&entry.name).map(|e| e.source_line) else {
            self.entries.insert(entry.name.clone(), entry);
            return;
        };
        let (kept, replaced) = if entry.source_line >= previous {
            (entry.source_line, previous)
        } else {
            (previous, entry.source_line)
        };
        tracing::debug!(name = %entry.display_name, line = kept, previous = replaced, "duplicate entry");
        self.diagnostics.push(
            Diagnostic::warning(
                DiagnosticCode::DuplicateEntry,
                kept,
                format!(
                    "entry {:?} redefined; replaces the definition at line {}",
                    entry.display_name, replaced
                ),
            )
            .with_related_line(replaced),
        );
        if kept == entry.source_line {
            self.entries.insert(entry.name.clone(), entry);
        }
    }

    /// Add a synonym entry pointing at `target`, to be folded into the target's aliases.
    pub fn push_synonym(&mut self, entry: Entry, target: impl Into<String>) {
        self.synonyms.push(Synonym {
            entry,
            target: target.into(),
        });
    }

    pub fn finish(mut self) -> (Lexicon, Vec<Diagnostic>) {
        let claims = self.collect_claims();
        let aliases = self.place_aliases(claims);
        let unresolved = self.resolve_references(&aliases);
        (
            Lexicon::from_parts(self.entries, aliases, unresolved),
            self.diagnostics,
        )
    }

    /// Entry keys sorted by source line.
    fn document_order(&self) -> Vec<String> {
        let mut keys: Vec<(usize, &String)> = self
            .entries
            .values()
            .map(|entry| (entry.source_line, &entry.name))
            .collect();
        keys.sort();
        keys.into_iter().map(|(_, key)| key.clone()).collect()
    }

    /// Every alias claim, sorted by the line making it. Synonyms without a target entry are
    /// placed as entries first.
    fn collect_claims(&mut self) -> Vec<Claim> {
        let mut claims = Vec::new();
        for synonym in std::mem::take(&mut self.synonyms) {
            let target = normalize_name(&synonym.target);
            if target != synonym.entry.name && self.entries.contains_key(&target) {
                claims.push(Claim {
                    line: synonym.entry.source_line,
                    alias: synonym.entry.name,
                    owner: target,
                    synonym: true,
                });
            } else {
                tracing::debug!(
                    name = %synonym.entry.display_name,
                    target = %synonym.target,
                    "synonym target is not an entry; keeping it as an entry"
                );
                self.push(synonym.entry);
            }
        }
        for entry in self.entries.values() {
            claims.extend(entry.aliases.iter().map(|alias| Claim {
                line: entry.source_line,
                alias: alias.clone(),
                owner: entry.name.clone(),
                synonym: false,
            }));
        }
        claims.sort_by_key(|claim| claim.line);
        claims
    }

    fn place_aliases(&mut self, claims: Vec<Claim>) -> BTreeMap<String, String> {
        let mut aliases: BTreeMap<String, String> = BTreeMap::new();
        let mut dropped: Vec<(String, String)> = Vec::new();
        let mut added: Vec<(String, String)> = Vec::new();

        for claim in claims {
            if claim.alias == claim.owner {
                continue;
            }
            let owner_name = self
                .entries
                .get(&claim.owner)
                .map_or(claim.owner.as_str(), |e| e.display_name.as_str());
            if let Some(target) = self.entries.get(&claim.alias) {
                self.diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::AliasConflict,
                        claim.line,
                        format!(
                            "alias {:?} of {:?} is the name of another entry; alias dropped",
                            claim.alias, owner_name
                        ),
                    )
                    .with_related_line(target.source_line),
                );
                if !claim.synonym {
                    dropped.push((claim.owner, claim.alias));
                }
                continue;
            }
            match aliases.get(&claim.alias) {
                Some(owner) if *owner == claim.owner => {}
                Some(owner) => {
                    let mut diagnostic = Diagnostic::warning(
                        DiagnosticCode::AliasConflict,
                        claim.line,
                        format!(
                            "alias {:?} of {:?} is already claimed by {:?}; alias dropped",
                            claim.alias, owner_name, owner
                        ),
                    );
                    if let Some(owner_line) = self.entries.get(owner).map(|e| e.source_line) {
                        diagnostic = diagnostic.with_related_line(owner_line);
                    }
                    self.diagnostics.push(diagnostic);
                    if !claim.synonym {
                        dropped.push((claim.owner, claim.alias));
                    }
                }
                None => {
                    aliases.insert(claim.alias.clone(), claim.owner.clone());
                    if claim.synonym {
                        added.push((claim.owner, claim.alias));
                    }
                }
            }
        }

        // Entries list exactly the aliases the lexicon resolves to them.
        for (key, alias) in dropped {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.aliases.remove(&alias);
            }
        }
        for (key, alias) in added {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.aliases.insert(alias);
            }
        }
        aliases
    }

    fn resolve_references(&mut self, aliases: &BTreeMap<String, String>) -> Vec<UnresolvedReference> {
        let mut unresolved = Vec::new();
        for key in self.document_order() {
            let Some(entry) = self.entries.get(&key) else {
                continue;
            };
            let mut missing = BTreeSet::new();
            for reference in &entry.references {
                let target = normalize_name(reference);
                if self.entries.contains_key(&target) || aliases.contains_key(&target) {
                    continue;
                }
                if !missing.insert(target) {
                    continue;
                }
                self.diagnostics.push(Diagnostic::info(
                    DiagnosticCode::UnresolvedReference,
                    entry.source_line,
                    format!(
                        "{:?} references unknown entry {:?}",
                        entry.display_name, reference
                    ),
                ));
                unresolved.push(UnresolvedReference {
                    entry: entry.name.clone(),
                    reference: reference.clone(),
                    line: entry.source_line,
                });
            }
        }
        unresolved
    }
}

/// Assemble entries given in document order.
pub fn assemble(entries: impl IntoIterator<Item = Entry>) -> (Lexicon, Vec<Diagnostic>) {
    let mut assembler = LexiconAssembler::new();
    for entry in entries {
        assembler.push(entry);
    }
    assembler.finish()
}
