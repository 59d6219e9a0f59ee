//! Truncated HMAC-SHA256 signing.
//!
//! Frame layout: `timestamp (4) || tag (16)`, where the tag is the first 16
//! bytes of `HMAC-SHA256(key, timestamp || identity)`.

use super::TokenScheme;
use crate::error::{Result, TokenError};
use crate::frame::{TIMESTAMP_LEN, read_array};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of the truncated authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Keyed MAC over the timestamp and identity.
///
/// The timestamp travels in the clear. Deterministic: the same key, timestamp
/// and identity always produce the same token.
#[derive(Clone)]
pub struct HmacScheme {
    keyed: HmacSha256,
}

impl HmacScheme {
    /// Create a scheme from a non-empty key of any length.
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(TokenError::invalid_key("HMAC key must not be empty"));
        }

        let keyed = HmacSha256::new_from_slice(key)
            .map_err(|e| TokenError::invalid_key(format!("HMAC key rejected: {e}")))?;
        Ok(Self { keyed })
    }

    fn tag(&self, timestamp: &[u8; TIMESTAMP_LEN], identity: &[u8]) -> [u8; TAG_LEN] {
        let mut mac = self.keyed.clone();
        mac.update(timestamp);
        mac.update(identity);
        let full = mac.finalize().into_bytes();

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&full[..TAG_LEN]);
        tag
    }
}

impl TokenScheme for HmacScheme {
    fn name(&self) -> &'static str {
        "hmac-sha256"
    }

    fn frame_len(&self) -> usize {
        TIMESTAMP_LEN + TAG_LEN
    }

    fn seal(&self, timestamp: [u8; TIMESTAMP_LEN], identity: &[u8]) -> Result<Vec<u8>> {
        let mut frame = Vec::with_capacity(self.frame_len());
        frame.extend_from_slice(&timestamp);
        frame.extend_from_slice(&self.tag(&timestamp, identity));
        Ok(frame)
    }

    fn open(&self, frame: &[u8], identity: &[u8]) -> Option<[u8; TIMESTAMP_LEN]> {
        if frame.len() != self.frame_len() {
            return None;
        }

        let timestamp: [u8; TIMESTAMP_LEN] = read_array(frame, 0)?;
        let embedded: [u8; TAG_LEN] = read_array(frame, TIMESTAMP_LEN)?;
        let expected = self.tag(&timestamp, identity);

        bool::from(expected[..].ct_eq(&embedded[..])).then_some(timestamp)
    }
}

impl fmt::Debug for HmacScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacScheme")
            .field("tag_len", &TAG_LEN)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: [u8; TIMESTAMP_LEN] = [0x65, 0x53, 0xf1, 0x00];

    #[test]
    fn test_frame_layout() {
        let scheme = HmacScheme::new(b"yay for dumbledore").unwrap();
        let frame = scheme.seal(TS, b"woo").unwrap();

        assert_eq!(frame.len(), 20);
        assert_eq!(frame[..TIMESTAMP_LEN], TS);
        assert_eq!(scheme.open(&frame, b"woo"), Some(TS));
    }

    #[test]
    fn test_tag_is_truncated_hmac() {
        let scheme = HmacScheme::new(b"key").unwrap();
        let frame = scheme.seal(TS, b"id").unwrap();

        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(&TS);
        mac.update(b"id");
        let full = mac.finalize().into_bytes();

        assert_eq!(frame[TIMESTAMP_LEN..], full[..TAG_LEN]);
    }

    #[test]
    fn test_deterministic() {
        let scheme = HmacScheme::new(b"key").unwrap();
        assert_eq!(scheme.seal(TS, b"id").unwrap(), scheme.seal(TS, b"id").unwrap());
    }

    #[test]
    fn test_rejects_empty_key() {
        assert!(matches!(
            HmacScheme::new(b""),
            Err(TokenError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_open_rejects_forgeries() {
        let scheme = HmacScheme::new(b"key").unwrap();
        let frame = scheme.seal(TS, b"id").unwrap();

        assert_eq!(scheme.open(&frame, b"id2"), None);
        assert_eq!(HmacScheme::new(b"other").unwrap().open(&frame, b"id"), None);

        // Moving the timestamp without re-signing
        let mut shifted = frame.clone();
        shifted[3] = shifted[3].wrapping_add(1);
        assert_eq!(scheme.open(&shifted, b"id"), None);
    }

    #[test]
    fn test_open_survives_any_length() {
        let scheme = HmacScheme::new(b"key").unwrap();
        for len in 0..48 {
            assert_eq!(scheme.open(&vec![0u8; len], b"id"), None);
        }
    }
}
