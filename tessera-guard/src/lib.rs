//! # Tessera CSRF Guard
//!
//! HTTP middleware that admits a request only when it carries a token
//! generated for the request's session identity.
//!
//! ## Features
//!
//! - **Header or cookie** - token and session are each read from a header,
//!   falling back to a cookie when the header is absent or empty
//! - **Fail closed** - a missing token, missing session, or unconfigured guard
//!   is rejected, never silently allowed
//! - **Opaque rejection** - an empty `403 Forbidden`, or a fallback handler
//!   of your choice; nothing from the request is echoed back
//!
//! ## Quick Start
//!
//! ```rust
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use tessera_guard::{CsrfGuard, GuardConfig, Handler, handler_fn};
//!
//! # tokio_test::block_on(async {
//! let config = GuardConfig::new()
//!     .with_token_header("X-CSRF-Token")
//!     .with_session_cookie("session_id");
//!
//! let app = handler_fn(|_req: Request<()>| async { Response::new(Bytes::from("ok")) });
//! let guard = CsrfGuard::from_key(b"ayellowsubmarine", config, app).unwrap();
//!
//! let token = guard.codec().generate("abc123").unwrap();
//! let req = Request::builder()
//!     .header("X-CSRF-Token", token)
//!     .header("Cookie", "session_id=abc123")
//!     .body(())
//!     .unwrap();
//! assert_eq!(guard.call(req).await.status(), StatusCode::OK);
//!
//! let forged = Request::builder()
//!     .header("Cookie", "session_id=abc123")
//!     .body(())
//!     .unwrap();
//! assert_eq!(guard.call(forged).await.status(), StatusCode::FORBIDDEN);
//! # });
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;

pub use config::{DEFAULT_GUARD_MAX_AGE, GuardConfig};
pub use error::{GuardError, GuardResult};
pub use handler::{Handler, HandlerFn, handler_fn};
pub use middleware::{CsrfGuard, forbidden};
