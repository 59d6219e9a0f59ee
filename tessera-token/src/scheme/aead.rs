//! AES-GCM sealing.
//!
//! Frame layout: `nonce (12) || ciphertext (4) || tag (16)`.

use super::TokenScheme;
use crate::error::{Result, TokenError};
use crate::frame::{TIMESTAMP_LEN, read_array};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use rand::RngCore;
use rand::rngs::OsRng;
use std::fmt;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Length of the GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Length of the GCM authentication tag in bytes.
const GCM_TAG_LEN: usize = 16;

enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    fn encrypt(
        &self,
        nonce: &Nonce<U12>,
        payload: Payload<'_, '_>,
    ) -> aes_gcm::aead::Result<Vec<u8>> {
        match self {
            Self::Aes128(c) => c.encrypt(nonce, payload),
            Self::Aes192(c) => c.encrypt(nonce, payload),
            Self::Aes256(c) => c.encrypt(nonce, payload),
        }
    }

    fn decrypt(
        &self,
        nonce: &Nonce<U12>,
        payload: Payload<'_, '_>,
    ) -> aes_gcm::aead::Result<Vec<u8>> {
        match self {
            Self::Aes128(c) => c.decrypt(nonce, payload),
            Self::Aes192(c) => c.decrypt(nonce, payload),
            Self::Aes256(c) => c.decrypt(nonce, payload),
        }
    }

    fn key_bits(&self) -> u32 {
        match self {
            Self::Aes128(_) => 128,
            Self::Aes192(_) => 192,
            Self::Aes256(_) => 256,
        }
    }
}

/// Authenticated encryption of the timestamp with AES-GCM.
///
/// The identity is passed as associated data: it is authenticated but never
/// encrypted or embedded in the token. Each token draws a fresh nonce from the
/// operating system's CSPRNG.
pub struct AeadScheme {
    cipher: Cipher,
}

impl AeadScheme {
    /// Create a scheme from a 16, 24 or 32 byte AES key.
    pub fn new(key: &[u8]) -> Result<Self> {
        let invalid = || {
            TokenError::invalid_key(format!(
                "AES key must be 16, 24 or 32 bytes, got {}",
                key.len()
            ))
        };
        let cipher = match key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new_from_slice(key).map_err(|_| invalid())?),
            24 => Cipher::Aes192(Aes192Gcm::new_from_slice(key).map_err(|_| invalid())?),
            32 => Cipher::Aes256(Aes256Gcm::new_from_slice(key).map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        Ok(Self { cipher })
    }
}

impl TokenScheme for AeadScheme {
    fn name(&self) -> &'static str {
        "aes-gcm"
    }

    fn frame_len(&self) -> usize {
        NONCE_LEN + TIMESTAMP_LEN + GCM_TAG_LEN
    }

    fn seal(&self, timestamp: [u8; TIMESTAMP_LEN], identity: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|e| TokenError::EncodingFailure(format!("secure random source failed: {e}")))?;

        let sealed = self
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &timestamp,
                    aad: identity,
                },
            )
            .map_err(|_| TokenError::EncodingFailure("AES-GCM seal failed".to_string()))?;

        let mut frame = Vec::with_capacity(self.frame_len());
        frame.extend_from_slice(&nonce);
        frame.extend_from_slice(&sealed);
        Ok(frame)
    }

    fn open(&self, frame: &[u8], identity: &[u8]) -> Option<[u8; TIMESTAMP_LEN]> {
        if frame.len() != self.frame_len() {
            return None;
        }

        let nonce: [u8; NONCE_LEN] = read_array(frame, 0)?;
        let plain = self
            .cipher
            .decrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: &frame[NONCE_LEN..],
                    aad: identity,
                },
            )
            .ok()?;

        read_array(&plain, 0)
    }
}

impl fmt::Debug for AeadScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AeadScheme")
            .field("key_bits", &self.cipher.key_bits())
            .field("key", &"<redacted>")
            .finish()
    }
}
