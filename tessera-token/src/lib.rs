//! # Tessera Tokens
//!
//! Stateless anti-forgery tokens bound to a caller identity.
//!
//! A token is a timestamp sealed to an identity (typically a session id) with
//! a server-side key. Validation needs nothing but the key: there is no token
//! store, no revocation list, and no shared mutable state.
//!
//! ## Features
//!
//! - **AES-GCM** (default) - random 96-bit nonce, identity as associated data,
//!   44-character tokens
//! - **Truncated HMAC-SHA256** - timestamp plus 128-bit tag, 28-character tokens
//! - **Opaque failures** - every rejection is the same [`TokenError::InvalidToken`]
//! - **Injectable clock** - deterministic expiry tests with [`MockClock`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use tessera_token::{Codec, CodecConfig, SchemeKind};
//!
//! let key = CodecConfig::generate_key(32).unwrap();
//! let codec = CodecConfig::new(key)
//!     .with_scheme(SchemeKind::Aead)
//!     .with_max_age(Duration::from_secs(600))
//!     .build()
//!     .unwrap();
//!
//! let token = codec.generate("session-42").unwrap();
//! assert!(codec.validate("session-42", &token).is_ok());
//! ```
//!
//! ## Testing Expiry
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tessera_token::{Codec, MockClock};
//!
//! let clock = Arc::new(MockClock::starting_now());
//! let codec = Codec::hmac(b"yay for dumbledore").unwrap().with_clock(clock.clone());
//! let token = codec.generate("woo").unwrap();
//!
//! clock.advance(Duration::from_secs(20 * 60));
//! assert!(codec.validate("woo", &token).is_err());
//! ```

pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod scheme;

pub use clock::{Clock, MockClock, SystemClock};
pub use codec::{Codec, DEFAULT_MAX_AGE};
pub use config::CodecConfig;
pub use error::{Result, TokenError};
pub use scheme::{AeadScheme, HmacScheme, SchemeKind, TokenScheme};
