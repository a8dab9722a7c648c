//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Collect route registrations before serving
//! - Build the Axum Router, one route per binding
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve a listener until shutdown is signalled

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::routing::{any, get};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_config, ConfigError, ServiceConfig, ValidationError};
use crate::error::{HandlerError, RegistrationError};
use crate::http::auth::Authenticator;
use crate::http::dispatch::{self, InvocationState};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::invocation::{
    handler_fn, health_check_fn, HandlerOutcome, HealthCheck, InvocationContext,
    InvocationEvent, InvocationHandler,
};
use crate::routing::{Binding, Registrar, Route};

/// HTTP service exposing registered invocation handlers.
pub struct Service {
    config: ServiceConfig,
    authenticator: Arc<Authenticator>,
    registrar: Registrar,
}

impl Service {
    /// Create a service with no routes from a configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let header = HeaderName::from_bytes(config.auth.header.as_bytes()).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::AuthHeader(config.auth.header.clone())])
        })?;
        let authenticator = Authenticator::new(config.auth.token().map(str::to_owned), header);

        if authenticator.is_enabled() {
            tracing::info!(header = %authenticator.header(), "App token authentication enabled");
        }

        Ok(Self {
            config,
            authenticator: Arc::new(authenticator),
            registrar: Registrar::new(),
        })
    }

    /// Bind `handler` to `route`.
    ///
    /// `route` must not be empty or `/`, and `handler` must be present.
    /// A route without leading `/` gets one.
    pub fn register(
        &mut self,
        route: &str,
        handler: Option<Arc<dyn InvocationHandler>>,
    ) -> Result<Route, RegistrationError> {
        self.registrar.register_invocation(route, handler)
    }

    /// Bind an async closure as the invocation handler of `route`.
    pub fn add_invocation_handler<F, Fut>(
        &mut self,
        route: &str,
        f: F,
    ) -> Result<Route, RegistrationError>
    where
        F: Fn(InvocationContext, InvocationEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerOutcome> + Send + 'static,
    {
        self.register(route, Some(Arc::new(handler_fn(f))))
    }

    /// Bind an unauthenticated liveness check to `route`.
    ///
    /// Answers 204 when the check succeeds and 500 with the error text otherwise.
    pub fn add_health_check_handler<F, Fut>(
        &mut self,
        route: &str,
        f: F,
    ) -> Result<Route, RegistrationError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let check: Arc<dyn HealthCheck> = Arc::new(health_check_fn(f));
        self.registrar.register_health_check(route, Some(check))
    }

    /// Routes registered so far.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.registrar.routes()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Freeze the route table into an Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn into_router(self) -> Router {
        let max_body_size = self.config.limits.max_body_size;
        let mut router = Router::new();

        for (route, binding) in self.registrar.into_bindings() {
            let path = route.router_path();
            tracing::info!(route = %route, binding = ?binding, "Serving route");

            router = match binding {
                Binding::Invocation(handler) => {
                    let state = InvocationState {
                        route,
                        handler,
                        authenticator: self.authenticator.clone(),
                        max_body_size,
                    };
                    router.route(&path, any(dispatch::invoke).with_state(state))
                }
                Binding::HealthCheck(check) => router.route(
                    &path,
                    get(dispatch::health)
                        .options(dispatch::health_discovery)
                        .with_state(check),
                ),
            };
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(self.config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.registrar.len(),
            "HTTP server starting"
        );

        let app = self.into_router();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
