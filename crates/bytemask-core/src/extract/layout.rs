/// Widest field that fits the 64-bit result; wider ranges are truncated.
pub const MAX_FIELD_BYTES: usize = 8;
pub const BITS_PER_BYTE: u32 = 8;

pub const BIG_ENDIAN_TOKEN: &str = "big";
pub const LITTLE_ENDIAN_TOKEN: &str = "little";
