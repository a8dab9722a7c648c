//! Discovery verb (CORS preflight) answers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Methods advertised by invocation routes.
pub const ALLOWED_METHODS: &str = "POST,OPTIONS";
/// Methods advertised by health check routes.
pub const HEALTH_ALLOWED_METHODS: &str = "GET,OPTIONS";
pub const ALLOWED_HEADERS: &str = "authorization, origin, content-type, accept";

/// Empty 200 advertising `allowed` methods.
///
/// Served without authentication and without calling the handler.
pub fn discovery_response(allowed: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, allowed),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (header::ALLOW, allowed),
        ],
    )
        .into_response()
}
