//! Error types for the CSRF guard

use tessera_token::TokenError;
use thiserror::Error;

/// Result type for guard construction
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors raised while setting up a guard.
///
/// Request handling itself never fails: every request is either forwarded or
/// rejected.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The token codec could not be built
    #[error("Token codec error: {0}")]
    Token(#[from] TokenError),

    /// Configuration error
    #[error("Guard configuration error: {0}")]
    Config(String),
}

impl GuardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
