//! Request logging middleware.
//!
//! Wraps a downstream [`Handler`] and emits exactly two records per
//! request: an info `"Inbound request"` before delegation and an info
//! `"Outbound response"` after the handler returns, the latter carrying
//! the captured status code and the elapsed wall-clock duration. The
//! derived [`RequestScope`] rides in the request's extensions so the
//! handler (and anything below it) can log with the same context fields.

use crate::writer::{ResponseWriter, StatusWriter};
use async_trait::async_trait;
use bytes::Bytes;
use http::Request;
use lumber_core::{Field, Logger, RequestScope};
use std::time::Instant;

/// The downstream capability: receive a response writer and a request,
/// produce side effects on the writer, eventually return. Handlers run
/// concurrently across requests, so implementations are `Send + Sync`.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, w: &mut dyn ResponseWriter, req: &mut Request<Bytes>);
}

/// Adapter for plain closures, for handlers with no state of their own.
pub struct HandlerFn<F>(pub F);

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut dyn ResponseWriter, &mut Request<Bytes>) + Send + Sync,
{
    async fn handle(&self, w: &mut dyn ResponseWriter, req: &mut Request<Bytes>) {
        (self.0)(w, req);
    }
}

/// Middleware that logs inbound requests and outbound responses.
pub struct RequestLogger<H> {
    logger: Logger,
    inner: H,
}

impl<H: Handler> RequestLogger<H> {
    pub fn new(logger: Logger, inner: H) -> Self {
        Self { logger, inner }
    }
}

#[async_trait]
impl<H: Handler> Handler for RequestLogger<H> {
    async fn handle(&self, w: &mut dyn ResponseWriter, req: &mut Request<Bytes>) {
        let scope = scope_for(req);
        req.extensions_mut().insert(scope.clone());
        self.logger.info(&scope, "Inbound request", &[]);

        let mut status_writer = StatusWriter::new(w);
        let start = Instant::now();
        self.inner.handle(&mut status_writer, req).await;
        let elapsed = start.elapsed();

        self.logger.info(&scope, "Outbound response", &[
            Field::duration("duration", elapsed),
            Field::int("status", i64::from(status_writer.status())),
        ]);
    }
}

/// Derive the request scope: host from the `Host` header (falling back
/// to the URI authority), endpoint path, and method. Empty values stay
/// absent via the scope's own normalization.
fn scope_for(req: &Request<Bytes>) -> RequestScope {
    let host = req
        .headers()
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| req.uri().host().map(str::to_owned))
        .unwrap_or_default();
    RequestScope::new()
        .with_host(host)
        .with_endpoint(req.uri().path())
        .with_method(req.method().as_str())
}
