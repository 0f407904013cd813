//! Output formats for parsed lexicons
//!
//!     This crate turns a [Lexicon](lilex_parser::Lexicon) into text and, where the format
//!     allows, back. It is a pure library: no printing, no environment, no files. The CLI
//!     decides where the output goes.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for all formats (parsing and/or serialization)
//!     - FormatRegistry: lookup of formats by name
//!     - Format implementations: `json` (both directions) and `js` (ES module, output only)
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── json.rs
//!     │   └── js.rs
//!     └── lib.rs

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
