//! Authentication schemes that seal a timestamp to an identity.
//!
//! Both schemes sit behind [`TokenScheme`] and are interchangeable from the
//! codec's point of view, but their wire formats are not compatible with each
//! other. Pick one per deployment.

mod aead;
mod hmac;

pub use self::aead::{AeadScheme, NONCE_LEN};
pub use self::hmac::{HmacScheme, TAG_LEN};

use crate::error::Result;
use crate::frame::TIMESTAMP_LEN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A keyed primitive that binds a timestamp to an identity.
pub trait TokenScheme: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Binary length of every frame this scheme produces.
    fn frame_len(&self) -> usize;

    /// Produce a frame carrying `timestamp`, authenticated against `identity`.
    ///
    /// Only fails when the secure random source fails.
    fn seal(&self, timestamp: [u8; TIMESTAMP_LEN], identity: &[u8]) -> Result<Vec<u8>>;

    /// Recover the timestamp from a frame, or `None` if the frame does not
    /// authenticate for `identity` under this key.
    ///
    /// Must not panic on frames of any length.
    fn open(&self, frame: &[u8], identity: &[u8]) -> Option<[u8; TIMESTAMP_LEN]>;
}

/// Scheme selector used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// AES-GCM with a random 96-bit nonce; identity is associated data.
    #[default]
    Aead,
    /// HMAC-SHA256 over timestamp and identity, truncated to 128 bits.
    Hmac,
}

impl SchemeKind {
    /// Parse a scheme name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "aead" | "aes-gcm" | "aesgcm" => Some(Self::Aead),
            "hmac" | "hmac-sha256" => Some(Self::Hmac),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aead => "aead",
            Self::Hmac => "hmac",
        }
    }

    /// Instantiate the scheme with `key`.
    pub fn build(self, key: &[u8]) -> Result<Arc<dyn TokenScheme>> {
        Ok(match self {
            Self::Aead => Arc::new(AeadScheme::new(key)?),
            Self::Hmac => Arc::new(HmacScheme::new(key)?),
        })
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
