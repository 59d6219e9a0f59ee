use thiserror::Error;

/// Errors produced while building a codec, generating, or validating tokens.
///
/// Validation only ever yields [`TokenError::InvalidToken`]; the reason a token
/// was rejected is never exposed to callers.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Key material was rejected by the selected scheme.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid token")]
    InvalidToken,

    /// The secure random source failed while generating a token.
    #[error("Token encoding failed: {0}")]
    EncodingFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TokenError {
    /// Create a new invalid key error
    pub fn invalid_key<S: Into<String>>(msg: S) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is the opaque validation failure
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Self::InvalidToken)
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;
