//! Section parsing: paginated legal text in, addressable [`Section`]
//! records out.
//!
//! A "section header" is a line opening with a dot-separated numeric id
//! (`5`, `5.1`, `5.1.1`), optionally followed by a title or by body text on
//! the same line. The parser runs a single forward scan with one open
//! accumulator, then a two-pass name back-fill so that sections whose
//! header carried no inline title inherit one from another span of the same
//! id.
//!
//! ```text
//! pages (lines) ──► scan ──► Section* ──► back-fill names ──► Section*
//! ```
//!
//! Everything here is pure and synchronous; persistence and retrieval live
//! in [`crate::stores`].
//!
//! [`Section`]: crate::types::Section

mod heading;
mod parser;

pub use parser::parse;
