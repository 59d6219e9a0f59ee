use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TokenError};
use crate::frame;
use crate::scheme::{AeadScheme, HmacScheme, TokenScheme};
use chrono::TimeDelta;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Default maximum token age: 10 minutes.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Issues and verifies identity-bound, time-limited tokens.
///
/// A codec owns its key (inside the scheme), a clock, and a maximum age. It
/// holds no per-token state, so `generate` and `validate` can be called from
/// any number of threads at once. Cloning is cheap and shares the key.
///
/// ```rust
/// use tessera_token::Codec;
///
/// let codec = Codec::new(b"ayellowsubmarine").unwrap();
/// let token = codec.generate("session-1").unwrap();
///
/// assert_eq!(token.len(), 44);
/// assert!(codec.validate("session-1", &token).is_ok());
/// assert!(codec.validate("session-2", &token).is_err());
/// ```
#[derive(Clone)]
pub struct Codec {
    scheme: Arc<dyn TokenScheme>,
    clock: Arc<dyn Clock>,
    max_age: Duration,
}

impl Codec {
    /// Create an AES-GCM codec. The key must be 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        Ok(Self::with_scheme(Arc::new(AeadScheme::new(key)?)))
    }

    /// Create a truncated HMAC-SHA256 codec from a non-empty key.
    pub fn hmac(key: &[u8]) -> Result<Self> {
        Ok(Self::with_scheme(Arc::new(HmacScheme::new(key)?)))
    }

    /// Create a codec around an already keyed scheme.
    pub fn with_scheme(scheme: Arc<dyn TokenScheme>) -> Self {
        Self {
            scheme,
            clock: Arc::new(SystemClock),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the maximum token age.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Adjust the maximum token age after construction.
    ///
    /// Applies to tokens already issued: age is checked at validation time.
    pub fn set_max_age(&mut self, max_age: Duration) {
        self.max_age = max_age;
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn scheme(&self) -> &dyn TokenScheme {
        self.scheme.as_ref()
    }

    /// Length of every token string this codec produces.
    pub fn token_len(&self) -> usize {
        frame::encoded_len(self.scheme.frame_len())
    }

    /// Issue a token for `identity`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EncodingFailure`] if the secure random source
    /// fails (AES-GCM only).
    pub fn generate(&self, identity: &str) -> Result<String> {
        let timestamp = frame::encode_timestamp(self.clock.now());
        let sealed = self.scheme.seal(timestamp, identity.as_bytes())?;
        let token = frame::encode(&sealed);

        trace!(scheme = self.scheme.name(), "Generated token");
        Ok(token)
    }

    /// Check that `token` was issued for `identity` and is not older than the
    /// maximum age.
    ///
    /// Tokens stamped in the future are accepted; only staleness is bounded.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] for every kind of failure.
    pub fn validate(&self, identity: &str, token: &str) -> Result<()> {
        let Some(sealed) = frame::decode(token, self.scheme.frame_len()) else {
            debug!(stage = "decode", "Rejected token");
            return Err(TokenError::InvalidToken);
        };

        let Some(timestamp) = self.scheme.open(&sealed, identity.as_bytes()) else {
            debug!(stage = "authenticate", "Rejected token");
            return Err(TokenError::InvalidToken);
        };

        let issued_at = frame::decode_timestamp(timestamp);
        let age = self.clock.now().signed_duration_since(issued_at);

        // Durations beyond TimeDelta's range never expire.
        if let Ok(max_age) = TimeDelta::from_std(self.max_age) {
            if age > max_age {
                debug!(stage = "freshness", age_secs = age.num_seconds(), "Rejected token");
                return Err(TokenError::InvalidToken);
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("scheme", &self.scheme)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}
