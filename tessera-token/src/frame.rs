//! Fixed-width binary framing and text transport encoding.
//!
//! Every token for a given scheme has the same binary length, so the encoded
//! text length is constant too. Length checks run before any base64 decoding
//! or cryptography.

use base64::{Engine, engine::general_purpose::URL_SAFE};
use chrono::{DateTime, Utc};

/// Width of the embedded timestamp (big-endian seconds since the Unix epoch).
pub const TIMESTAMP_LEN: usize = 4;

/// Pack the whole-second part of `at` into four big-endian bytes.
///
/// Instants past 2106-02-07 wrap around; 32-bit timestamps are part of the
/// wire format.
#[inline]
pub fn encode_timestamp(at: DateTime<Utc>) -> [u8; TIMESTAMP_LEN] {
    (at.timestamp() as u32).to_be_bytes()
}

/// Inverse of [`encode_timestamp`].
#[inline]
pub fn decode_timestamp(bytes: [u8; TIMESTAMP_LEN]) -> DateTime<Utc> {
    DateTime::from_timestamp(i64::from(u32::from_be_bytes(bytes)), 0).unwrap_or_default()
}

/// Length of the padded base64 text for a frame of `frame_len` bytes.
#[inline]
pub const fn encoded_len(frame_len: usize) -> usize {
    frame_len.div_ceil(3) * 4
}

/// Encode a binary frame as padded URL-safe base64.
pub fn encode(frame: &[u8]) -> String {
    URL_SAFE.encode(frame)
}

/// Decode token text into a frame of exactly `frame_len` bytes.
///
/// Returns `None` for wrong lengths, characters outside the URL-safe alphabet,
/// bad padding, or non-canonical trailing bits.
pub fn decode(token: &str, frame_len: usize) -> Option<Vec<u8>> {
    if token.len() != encoded_len(frame_len) {
        return None;
    }

    let frame = URL_SAFE.decode(token).ok()?;
    (frame.len() == frame_len).then_some(frame)
}

/// Copy a fixed-width field out of `buf` at `offset`.
#[inline]
pub fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Option<[u8; N]> {
    buf.get(offset..offset.checked_add(N)?)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_big_endian_seconds() {
        let at = DateTime::from_timestamp(0x0102_0304, 999_000_000).unwrap();
        assert_eq!(encode_timestamp(at), [1, 2, 3, 4]);
        assert_eq!(
            decode_timestamp([1, 2, 3, 4]),
            DateTime::from_timestamp(0x0102_0304, 0).unwrap()
        );
    }

    #[test]
    fn test_timestamp_upper_bound() {
        let at = DateTime::from_timestamp(i64::from(u32::MAX), 0).unwrap();
        assert_eq!(encode_timestamp(at), [0xff; 4]);
        assert_eq!(decode_timestamp([0xff; 4]), at);
    }

    #[test]
    fn test_encoded_len_matches_wire_constants() {
        // 4-byte timestamp + 16-byte truncated MAC
        assert_eq!(encoded_len(20), 28);
        // 12-byte nonce + 4-byte ciphertext + 16-byte GCM tag
        assert_eq!(encoded_len(32), 44);
    }

    #[test]
    fn test_encode_keeps_padding() {
        let text = encode(&[0u8; 20]);
        assert_eq!(text.len(), 28);
        assert!(text.ends_with('='));
        assert_eq!(decode(&text, 20), Some(vec![0u8; 20]));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let text = encode(&[7u8; 20]);
        assert!(decode(&text, 32).is_none());
        assert!(decode(&format!("A{text}"), 20).is_none());
        assert!(decode(&text[1..], 20).is_none());
        assert!(decode("", 20).is_none());
    }

    #[test]
    fn test_decode_rejects_foreign_alphabet() {
        let text = encode(&[0xfb; 20]);
        let standard = text.replace('-', "+").replace('_', "/");
        assert_ne!(standard, text);
        assert!(decode(&standard, 20).is_none());
    }

    #[test]
    fn test_decode_rejects_non_canonical_trailing_bits() {
        // 20 bytes leave two unused bits in the last symbol before '='.
        let mut text = encode(&[0u8; 20]).into_bytes();
        text[26] = b'B';
        let text = String::from_utf8(text).unwrap();
        assert!(decode(&text, 20).is_none());
    }

    #[test]
    fn test_read_array_bounds() {
        let buf = [1u8, 2, 3, 4, 5];
        assert_eq!(read_array::<4>(&buf, 0), Some([1, 2, 3, 4]));
        assert_eq!(read_array::<4>(&buf, 1), Some([2, 3, 4, 5]));
        assert_eq!(read_array::<4>(&buf, 2), None);
        assert_eq!(read_array::<4>(&buf, usize::MAX), None);
    }
}
