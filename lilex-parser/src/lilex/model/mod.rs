//! Lexicon data model
//!
//!     - [Entry]: one named record, the output of extraction.
//!     - [Lexicon]: the assembled, read-only name to entry mapping.
//!     - [Diagnostic]: recoverable problems and conflicts found along the way.

pub mod diagnostics;
pub mod entry;
pub mod lexicon;

pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSeverity};
pub use entry::{Diagram, Entry};
pub use lexicon::{Lexicon, UnresolvedReference};
