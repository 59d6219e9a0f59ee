//! CSRF guard middleware
//!
//! Wraps a handler and only forwards requests that carry a token which
//! validates against the request's session identity.

use crate::config::GuardConfig;
use crate::error::GuardResult;
use crate::extract::header_or_cookie;
use crate::handler::Handler;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Request, Response, StatusCode};
use std::sync::Arc;
use tessera_token::Codec;
use tracing::{debug, trace, warn};

/// Guard that admits only requests with a valid identity-bound token.
pub struct CsrfGuard<H, B> {
    codec: Codec,
    config: GuardConfig,
    inner: H,
    fallback: Option<Arc<dyn Handler<B>>>,
}

impl<H, B> CsrfGuard<H, B>
where
    H: Handler<B>,
    B: Send + 'static,
{
    /// Create a guard around `inner` using an existing codec.
    ///
    /// The codec's own max age applies; `config.max_age` is ignored.
    pub fn new(codec: Codec, config: GuardConfig, inner: H) -> Self {
        if !config.is_configured() {
            warn!(
                "CSRF guard has no usable token or session source; every request will be rejected"
            );
        }

        Self {
            codec,
            config,
            inner,
            fallback: None,
        }
    }

    /// Like [`new`](Self::new), but refuses a config with no usable token or
    /// session source instead of building a guard that rejects everything.
    pub fn try_new(codec: Codec, config: GuardConfig, inner: H) -> GuardResult<Self> {
        config.validate()?;
        Ok(Self::new(codec, config, inner))
    }

    /// Create a guard with an AES-GCM codec built from `key`, using
    /// `config.max_age` as the maximum token age.
    ///
    /// # Errors
    ///
    /// Fails on a bad key or an unconfigured `config`.
    pub fn from_key(key: &[u8], config: GuardConfig, inner: H) -> GuardResult<Self> {
        let codec = Codec::new(key)?.with_max_age(config.max_age);
        Self::try_new(codec, config, inner)
    }

    /// Dispatch rejected requests to `handler` instead of answering 403.
    pub fn with_fallback(mut self, handler: impl Handler<B> + 'static) -> Self {
        self.fallback = Some(Arc::new(handler));
        self
    }

    /// The codec used to validate tokens, for issuing new ones.
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Whether the request headers carry a valid token/session pair.
    pub fn check(&self, headers: &HeaderMap) -> bool {
        self.evaluate(headers).is_ok()
    }

    fn evaluate(&self, headers: &HeaderMap) -> Result<(), Rejection> {
        let token = header_or_cookie(
            headers,
            self.config.token_header.as_deref(),
            self.config.token_cookie.as_deref(),
        );
        let session = header_or_cookie(
            headers,
            self.config.session_header.as_deref(),
            self.config.session_cookie.as_deref(),
        );

        match (token, session) {
            (Some(token), Some(session)) => match self.codec.validate(&session, &token) {
                Ok(()) => Ok(()),
                Err(_) => Err(Rejection {
                    token: Some(token),
                    session: Some(session),
                }),
            },
            (token, session) => Err(Rejection { token, session }),
        }
    }
}

struct Rejection {
    token: Option<String>,
    session: Option<String>,
}

#[async_trait]
impl<H, B> Handler<B> for CsrfGuard<H, B>
where
    H: Handler<B>,
    B: Send + 'static,
{
    async fn call(&self, req: Request<B>) -> Response<Bytes> {
        let rejection = match self.evaluate(req.headers()) {
            Ok(()) => {
                trace!(path = %req.uri().path(), "CSRF token accepted");
                return self.inner.call(req).await;
            }
            Err(rejection) => rejection,
        };

        if let Some(fallback) = &self.fallback {
            debug!(path = %req.uri().path(), "CSRF token rejected, using fallback handler");
            return fallback.call(req).await;
        }

        warn!(
            event = "csrf_invalid",
            token = ?rejection.token,
            session = ?rejection.session,
            "Rejected request with an invalid CSRF token"
        );
        forbidden()
    }
}

/// Empty-bodied `403 Forbidden` response.
pub fn forbidden() -> Response<Bytes> {
    let mut res = Response::new(Bytes::new());
    *res.status_mut() = StatusCode::FORBIDDEN;
    res
}
