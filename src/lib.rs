// Tessera - stateless, identity-bound CSRF tokens
//
// This library issues short, self-verifying tokens tied to a session identity
// and ships an HTTP guard that enforces them.

// Re-export the token codec
pub use tessera_token::*;

// Re-export optional crates
#[cfg(feature = "guard")]
pub use tessera_guard;

// Prelude for common imports
pub mod prelude {
    pub use crate::{Clock, Codec, CodecConfig, MockClock, SchemeKind, SystemClock, TokenError};

    #[cfg(feature = "guard")]
    pub use tessera_guard::{CsrfGuard, GuardConfig, Handler, handler_fn};
}
