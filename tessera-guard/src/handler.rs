//! Request handler seam used by the guard.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// An asynchronous request handler.
#[async_trait]
pub trait Handler<B>: Send + Sync {
    /// Handle the request and produce a response
    async fn call(&self, req: Request<B>) -> Response<Bytes>;
}

#[async_trait]
impl<B, H> Handler<B> for Arc<H>
where
    B: Send + 'static,
    H: Handler<B> + ?Sized,
{
    async fn call(&self, req: Request<B>) -> Response<Bytes> {
        (**self).call(req).await
    }
}

/// Handler backed by an async function or closure.
pub struct HandlerFn<F, B> {
    f: F,
    _body: PhantomData<fn(B)>,
}

/// Wrap an async closure as a [`Handler`].
///
/// ```rust
/// use bytes::Bytes;
/// use http::{Request, Response, StatusCode};
/// use tessera_guard::{Handler, handler_fn};
///
/// let handler = handler_fn(|_req: Request<()>| async {
///     let mut res = Response::new(Bytes::new());
///     *res.status_mut() = StatusCode::NO_CONTENT;
///     res
/// });
/// # let _ = &handler as &dyn Handler<()>;
/// ```
pub fn handler_fn<F, Fut, B>(f: F) -> HandlerFn<F, B>
where
    F: Fn(Request<B>) -> Fut + Send + Sync,
    Fut: Future<Output = Response<Bytes>> + Send,
    B: Send + 'static,
{
    HandlerFn {
        f,
        _body: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, B> Handler<B> for HandlerFn<F, B>
where
    F: Fn(Request<B>) -> Fut + Send + Sync,
    Fut: Future<Output = Response<Bytes>> + Send,
    B: Send + 'static,
{
    async fn call(&self, req: Request<B>) -> Response<Bytes> {
        (self.f)(req).await
    }
}
