//! Byte range to integer decoding.
//!
//! Decoding never fails: short payloads and out-of-range offsets degrade to
//! partial or zero values. Limits live in `layout`, bounds clipping in
//! `reader`, byte assembly in `decoder`.

pub mod decoder;
pub mod endianness;
pub mod layout;
pub mod reader;

pub use decoder::decode_field;
pub use endianness::Endianness;
