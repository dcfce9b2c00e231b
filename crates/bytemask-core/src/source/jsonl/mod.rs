//! JSON Lines row source.
//!
//! Each non-blank line is an object with optional `mask`, `payload` (hex) and
//! `endian` keys; a missing key or a JSON `null` is a null value. Line
//! handling lives in `reader`, row decoding in `parser`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::JsonLinesSource;
