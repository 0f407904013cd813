//! Testing utilities for lexicon assertions
//!
//!     The lexicon format is a convention, not a grammar, and small details (a tab instead of
//!     spaces, a missing blank line) change how a block is read. Test content made up inline
//!     drifts from the real document quickly. Tests therefore follow two rules:
//!
//!         1. Use the curated sample files under `docs/samples/` (via [Samples])
//!         2. Check results with the fluent [assert_lexicon] API
//!
//! Rule 1: Use Samples for Test Content
//!
//!     ```rust,ignore
//!     use lilex_parser::lilex::testing::Samples;
//!
//!     let parsed = Samples::excerpt().parse();
//!     let source = Samples::named("conflicts").source();
//!     ```
//!
//!     Available samples:
//!
//!         - `minimal`: two entries and one reference
//!         - `lexicon-excerpt`: front matter, sections, diagrams, aliases and the bibliography
//!         - `conflicts`: duplicate names and alias collisions
//!         - `malformed`: blocks the extractor rejects, between valid ones
//!
//!     Small unit tests of a single stage may still use short inline strings.
//!
//! Rule 2: Use assert_lexicon for Verification
//!
//!     ```rust,ignore
//!     use lilex_parser::lilex::testing::assert_lexicon;
//!
//!     assert_lexicon(&parsed.lexicon)
//!         .entry_count(2)
//!         .entry("glider", |entry| {
//!             entry
//!                 .display_name("GLIDER")
//!                 .references(&["BLOCK"])
//!                 .description_contains("spaceship")
//!         })
//!         .no_unresolved();
//!     ```

mod assertions;
mod samples;

pub use assertions::{assert_lexicon, EntryAssertion, LexiconAssertion};
pub use samples::{SampleLoader, Samples};
