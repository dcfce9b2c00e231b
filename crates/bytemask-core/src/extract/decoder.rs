use super::endianness::Endianness;
use super::layout;
use super::reader::PayloadReader;

/// Decode the inclusive byte range `start..=end` of `payload` into an `i64`.
///
/// Bytes are consumed from the lowest offset upward. Consumption stops at
/// `end`, at the end of the payload, or after 8 bytes, whichever comes
/// first; a range with no bytes in the payload decodes to `0`. With 8
/// big-endian bytes and the top bit set the result is negative.
///
/// # Examples
/// ```
/// use bytemask_core::{Endianness, decode_field};
///
/// let payload = [0x01, 0x02];
/// assert_eq!(decode_field(&payload, 0, 1, Endianness::Big), 0x0102);
/// assert_eq!(decode_field(&payload, 0, 1, Endianness::Little), 0x0201);
/// assert_eq!(decode_field(&payload, 5, 6, Endianness::Big), 0);
/// ```
pub fn decode_field(payload: &[u8], start: usize, end: usize, endianness: Endianness) -> i64 {
    let bytes = PayloadReader::new(payload).window(start, end);
    let value = match endianness {
        Endianness::Big => bytes
            .iter()
            .fold(0u64, |acc, &byte| (acc << layout::BITS_PER_BYTE) | u64::from(byte)),
        Endianness::Little => bytes
            .iter()
            .zip(0u32..)
            .fold(0u64, |acc, (&byte, index)| {
                acc | (u64::from(byte) << (index * layout::BITS_PER_BYTE))
            }),
    };
    value as i64
}

#[cfg(test)]
mod tests {
    use super::decode_field;
    use crate::extract::Endianness;

    #[test]
    fn big_endian_two_bytes() {
        assert_eq!(decode_field(&[0x01, 0x02], 0, 1, Endianness::Big), 258);
    }

    #[test]
    fn little_endian_two_bytes() {
        assert_eq!(decode_field(&[0x01, 0x02], 0, 1, Endianness::Little), 513);
    }

    #[test]
    fn single_byte_ignores_endianness() {
        let payload = [0xAB, 0xCD];
        assert_eq!(decode_field(&payload, 1, 1, Endianness::Big), 0xCD);
        assert_eq!(decode_field(&payload, 1, 1, Endianness::Little), 0xCD);
    }

    #[test]
    fn start_past_payload_is_zero() {
        let payload = [0xFF, 0xFF];
        assert_eq!(decode_field(&payload, 2, 3, Endianness::Big), 0);
        assert_eq!(decode_field(&payload, 100, 200, Endianness::Little), 0);
    }

    #[test]
    fn reversed_range_is_zero() {
        assert_eq!(decode_field(&[1, 2, 3], 2, 1, Endianness::Big), 0);
    }

    #[test]
    fn empty_payload_is_zero() {
        assert_eq!(decode_field(&[], 0, 3, Endianness::Big), 0);
    }

    #[test]
    fn truncated_range_uses_available_bytes() {
        let payload = [0x12, 0x34, 0x56];
        assert_eq!(decode_field(&payload, 1, 4, Endianness::Big), 0x3456);
        assert_eq!(decode_field(&payload, 1, 4, Endianness::Little), 0x5634);
    }

    #[test]
    fn ten_byte_range_uses_first_eight() {
        let payload = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        assert_eq!(
            decode_field(&payload, 0, 9, Endianness::Big),
            0x0102_0304_0506_0708
        );
        assert_eq!(
            decode_field(&payload, 0, 9, Endianness::Little),
            0x0807_0605_0403_0201
        );
    }

    #[test]
    fn eight_big_endian_bytes_may_be_negative() {
        let payload = [0xFF; 8];
        assert_eq!(decode_field(&payload, 0, 7, Endianness::Big), -1);
        let payload = [0x80, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode_field(&payload, 0, 7, Endianness::Big), i64::MIN);
    }

    #[test]
    fn eight_little_endian_bytes_may_be_negative() {
        let payload = [0, 0, 0, 0, 0, 0, 0, 0x80];
        assert_eq!(decode_field(&payload, 0, 7, Endianness::Little), i64::MIN);
    }
}
