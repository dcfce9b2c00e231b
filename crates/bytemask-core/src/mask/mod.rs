//! Mask string parsing.
//!
//! A mask is a comma-separated list of `name:start-end` tokens describing
//! inclusive byte ranges. The module follows the same split as the byte
//! decoders:
//! - `layout`: separator characters
//! - `reader`: tokenizing and trimming
//! - `parser`: validation into [`FieldSpec`]s
//! - `error`: actionable errors quoting the failing substring

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::ParseError;
pub use parser::{FieldSpec, parse_mask};
