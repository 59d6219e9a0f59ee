use crate::error::{GuardError, GuardResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tessera_token::config::duration_secs;

/// Default token lifetime for guarded routes: 3 hours.
pub const DEFAULT_GUARD_MAX_AGE: Duration = Duration::from_secs(3 * 60 * 60);

/// Where the guard looks for the token and the identity it is bound to.
///
/// Each value is read from its header first and from its cookie only when the
/// header is absent or empty. A source left as `None` is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Header carrying the token
    #[serde(default)]
    pub token_header: Option<String>,

    /// Cookie carrying the token
    #[serde(default)]
    pub token_cookie: Option<String>,

    /// Header carrying the session identity
    #[serde(default)]
    pub session_header: Option<String>,

    /// Cookie carrying the session identity
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// Maximum token age when the guard builds its own codec
    #[serde(default = "default_max_age", with = "duration_secs")]
    pub max_age: Duration,
}

fn default_max_age() -> Duration {
    DEFAULT_GUARD_MAX_AGE
}

impl GuardConfig {
    /// Create an empty configuration with no extraction sources.
    ///
    /// A guard built from it rejects every request.
    pub fn new() -> Self {
        Self {
            token_header: None,
            token_cookie: None,
            session_header: None,
            session_cookie: None,
            max_age: DEFAULT_GUARD_MAX_AGE,
        }
    }

    /// Set the token header name
    pub fn with_token_header(mut self, name: impl Into<String>) -> Self {
        self.token_header = non_empty(name.into());
        self
    }

    /// Set the token cookie name
    pub fn with_token_cookie(mut self, name: impl Into<String>) -> Self {
        self.token_cookie = non_empty(name.into());
        self
    }

    /// Set the session header name
    pub fn with_session_header(mut self, name: impl Into<String>) -> Self {
        self.session_header = non_empty(name.into());
        self
    }

    /// Set the session cookie name
    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = non_empty(name.into());
        self
    }

    /// Set the maximum token age
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Whether both the token and the session have at least one source.
    pub fn is_configured(&self) -> bool {
        let token = self.token_header.is_some() || self.token_cookie.is_some();
        let session = self.session_header.is_some() || self.session_cookie.is_some();
        token && session
    }

    /// Fail unless [`is_configured`](Self::is_configured) holds.
    pub fn validate(&self) -> GuardResult<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(GuardError::config(
                "both a token source and a session source (header or cookie) are required",
            ))
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(name: String) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}
