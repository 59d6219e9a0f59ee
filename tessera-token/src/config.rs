use crate::clock::Clock;
use crate::codec::{Codec, DEFAULT_MAX_AGE};
use crate::error::{Result, TokenError};
use crate::scheme::SchemeKind;
use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE},
};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Token codec configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Raw key material (16/24/32 bytes for AEAD, any non-empty length for HMAC)
    pub key: Vec<u8>,

    /// Sealing scheme
    #[serde(default)]
    pub scheme: SchemeKind,

    /// Maximum token age
    #[serde(default = "default_max_age", with = "duration_secs")]
    pub max_age: Duration,
}

fn default_max_age() -> Duration {
    DEFAULT_MAX_AGE
}

/// Serde helper storing a `Duration` as whole seconds.
pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

impl CodecConfig {
    /// Create a new configuration with the default scheme and max age
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            scheme: SchemeKind::default(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Generate random key material from the OS CSPRNG
    pub fn generate_key(len: usize) -> Result<Vec<u8>> {
        let mut key = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut key)
            .map_err(|e| TokenError::EncodingFailure(format!("secure random source failed: {e}")))?;
        Ok(key)
    }

    /// Load configuration from `{PREFIX}_KEY`, `{PREFIX}_SCHEME` and
    /// `{PREFIX}_MAX_AGE_SECS`.
    ///
    /// The key is base64 (URL-safe or standard alphabet, padded). Scheme and
    /// max age fall back to their defaults when unset.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let var = |name: &str| env::var(format!("{prefix}_{name}")).ok();

        let encoded = var("KEY")
            .ok_or_else(|| TokenError::config(format!("{prefix}_KEY is not set")))?;
        let mut config = Self::new(decode_key(&encoded)?);

        if let Some(scheme) = var("SCHEME") {
            config.scheme = SchemeKind::parse(&scheme)
                .ok_or_else(|| TokenError::config(format!("unknown scheme '{scheme}'")))?;
        }

        if let Some(secs) = var("MAX_AGE_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| TokenError::config(format!("{prefix}_MAX_AGE_SECS: {e}")))?;
            config.max_age = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the sealing scheme
    pub fn with_scheme(mut self, scheme: SchemeKind) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the maximum token age
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Build a codec using the system clock
    pub fn build(&self) -> Result<Codec> {
        Ok(Codec::with_scheme(self.scheme.build(&self.key)?).with_max_age(self.max_age))
    }

    /// Build a codec with an injected clock
    pub fn build_with_clock(&self, clock: Arc<dyn Clock>) -> Result<Codec> {
        Ok(self.build()?.with_clock(clock))
    }
}

/// Decode base64 key material, accepting either alphabet.
pub fn decode_key(encoded: &str) -> Result<Vec<u8>> {
    let encoded = encoded.trim();
    URL_SAFE
        .decode(encoded)
        .or_else(|_| STANDARD.decode(encoded))
        .map_err(|e| TokenError::config(format!("key is not valid base64: {e}")))
}

impl fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecConfig")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("scheme", &self.scheme)
            .field("max_age", &self.max_age)
            .finish()
    }
}
