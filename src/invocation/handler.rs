//! Handler capabilities invoked by the dispatch pipeline.
//!
//! A handler is anything implementing [`InvocationHandler`]. Plain async
//! closures are adapted with [`handler_fn`].
//!
//! # Example
//!
//! ```ignore
//! use invoke_adapter::invocation::{handler_fn, InvocationResult};
//!
//! let echo = handler_fn(|_ctx, event| async move {
//!     Ok(Some(InvocationResult::new(event.content_type, event.data)))
//! });
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::error::HandlerError;
use crate::invocation::{InvocationEvent, InvocationResult, Metadata};
use crate::routing::Route;

/// Boxed future returned by handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a handler hands back to the pipeline.
pub type HandlerOutcome = Result<Option<InvocationResult>, HandlerError>;

/// Per-request context passed alongside the event.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    route: Route,
    metadata: Metadata,
}

impl InvocationContext {
    pub fn new(route: Route, metadata: Metadata) -> Self {
        Self { route, metadata }
    }

    /// Route the request was dispatched on.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Carrier metadata: upstream metadata merged with the request headers.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }
}

/// Business logic bound to a route.
pub trait InvocationHandler: Send + Sync + 'static {
    /// Handle one event. Called exactly once per dispatched request.
    fn invoke(
        &self,
        ctx: InvocationContext,
        event: InvocationEvent,
    ) -> BoxFuture<'static, HandlerOutcome>;
}

/// Adapter turning an async closure into an [`InvocationHandler`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap an async closure as an [`InvocationHandler`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(InvocationContext, InvocationEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerOutcome> + Send + 'static,
{
    HandlerFn { f }
}

impl<F, Fut> InvocationHandler for HandlerFn<F>
where
    F: Fn(InvocationContext, InvocationEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerOutcome> + Send + 'static,
{
    fn invoke(
        &self,
        ctx: InvocationContext,
        event: InvocationEvent,
    ) -> BoxFuture<'static, HandlerOutcome> {
        Box::pin((self.f)(ctx, event))
    }
}

/// Liveness check bound to a route.
pub trait HealthCheck: Send + Sync + 'static {
    fn check(&self) -> BoxFuture<'static, Result<(), HandlerError>>;
}

/// Adapter turning an async closure into a [`HealthCheck`].
#[derive(Clone)]
pub struct HealthCheckFn<F> {
    f: F,
}

/// Wrap an async closure as a [`HealthCheck`].
pub fn health_check_fn<F, Fut>(f: F) -> HealthCheckFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    HealthCheckFn { f }
}

impl<F, Fut> HealthCheck for HealthCheckFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn check(&self) -> BoxFuture<'static, Result<(), HandlerError>> {
        Box::pin((self.f)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_fn_forwards_arguments() {
        let handler = handler_fn(|ctx: InvocationContext, event: InvocationEvent| async move {
            let tag = ctx.metadata().get_first("x-tag").unwrap_or_default().to_string();
            Ok(Some(InvocationResult::new(tag, event.data)))
        });

        let route = Route::parse("/echo").unwrap();
        let md: Metadata = [("x-tag", "t1")].into_iter().collect();
        let event = InvocationEvent {
            verb: "POST".into(),
            data: "payload".into(),
            ..Default::default()
        };

        let out = handler
            .invoke(InvocationContext::new(route, md), event)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out.content_type.as_deref(), Some("t1"));
        assert_eq!(out.data.as_deref(), Some(&b"payload"[..]));
    }

    #[tokio::test]
    async fn test_health_check_fn_reports_error() {
        let check = health_check_fn(|| async { Err::<(), HandlerError>("not ready".into()) });
        let err = check.check().await.unwrap_err();
        assert_eq!(err.to_string(), "not ready");
    }
}
