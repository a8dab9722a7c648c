//! Per-request dispatch pipeline.
//!
//! ```text
//! Received → Authenticating → Normalizing → Dispatching → Writing → Done
//!                  │               │              │           │
//!                  └─ 401          └─ 400         └─ 500      └─ 500
//! ```
//!
//! The first failing stage decides the response; later stages never run.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::DispatchError;
use crate::http::auth::Authenticator;
use crate::http::normalize::normalize;
use crate::http::options::{discovery_response, ALLOWED_METHODS, HEALTH_ALLOWED_METHODS};
use crate::http::request::RequestIdExt;
use crate::http::response::write_response;
use crate::invocation::{HealthCheck, InvocationContext, InvocationHandler};
use crate::observability::metrics;
use crate::routing::Route;

/// State bound to one invocation route.
#[derive(Clone)]
pub(crate) struct InvocationState {
    pub route: Route,
    pub handler: Arc<dyn InvocationHandler>,
    pub authenticator: Arc<Authenticator>,
    pub max_body_size: usize,
}

/// Axum handler behind every invocation route.
pub(crate) async fn invoke(
    State(state): State<InvocationState>,
    request: Request<Body>,
) -> Response {
    if request.method() == Method::OPTIONS {
        return discovery_response(ALLOWED_METHODS);
    }

    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        route = %state.route,
        "Dispatching invocation"
    );

    let response = match run_pipeline(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            log_failure(&state.route, &request_id, &err);
            err.into_response()
        }
    };

    metrics::record_invocation(
        method.as_str(),
        state.route.as_str(),
        response.status().as_u16(),
        start_time,
    );
    response
}

async fn run_pipeline(
    state: &InvocationState,
    request: Request<Body>,
) -> Result<Response, DispatchError> {
    state.authenticator.verify(request.headers())?;

    let (event, metadata) = normalize(request, state.max_body_size).await?;
    let ctx = InvocationContext::new(state.route.clone(), metadata);

    let outcome = state.handler.invoke(ctx, event).await;
    write_response(outcome)
}

fn log_failure(route: &Route, request_id: &str, err: &DispatchError) {
    match err {
        DispatchError::AuthenticationFailed => {
            metrics::record_auth_failure(route.as_str());
            tracing::warn!(request_id = %request_id, route = %route, "Authentication failed");
        }
        DispatchError::BodyRead(reason) => {
            tracing::warn!(request_id = %request_id, route = %route, error = %reason, "Failed to read request body");
        }
        DispatchError::Handler(reason) => {
            tracing::error!(request_id = %request_id, route = %route, error = %reason, "Invocation handler failed");
        }
        DispatchError::ResponseWrite(reason) => {
            tracing::error!(request_id = %request_id, route = %route, error = %reason, "Failed to write invocation response");
        }
    }
}

/// Axum handler behind every health check route.
pub(crate) async fn health(State(check): State<Arc<dyn HealthCheck>>) -> Response {
    match check.check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// OPTIONS answer on health check routes.
pub(crate) async fn health_discovery() -> Response {
    discovery_response(HEALTH_ALLOWED_METHODS)
}
