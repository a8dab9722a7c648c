//! Error taxonomy for registration and per-request dispatch.
//!
//! Registration errors are returned synchronously to the caller and never
//! leave a partial entry in the route table. Dispatch errors halt the
//! pipeline of a single request and are turned into the transport response
//! through [`IntoResponse`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error type returned by invocation and health check handlers.
///
/// Any error implementing `std::error::Error` converts into it with `?`.
/// Its `Display` text is sent back to the caller verbatim.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Rejections raised while binding a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Route was empty or the bare root path.
    #[error("service route required, got {0:?}")]
    InvalidRoute(String),

    /// No handler was supplied for the route.
    #[error("invocation handler required")]
    MissingHandler,
}

/// Failures that end the pipeline of one inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Configured token missing from the request or not matching.
    #[error("authentication failed.")]
    AuthenticationFailed,

    /// Request body stream failed or exceeded the configured limit.
    #[error("{0}")]
    BodyRead(String),

    /// The handler reported a failure.
    #[error("{0}")]
    Handler(String),

    /// The handler's result could not be turned into a response.
    ///
    /// Raised before any byte of the response is committed. Failures while
    /// the body is being transmitted happen after the status line went out
    /// and are only visible in the transport's own logs.
    #[error("{0}")]
    ResponseWrite(String),
}

impl DispatchError {
    /// Status code reported to the caller for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            DispatchError::BodyRead(_) => StatusCode::BAD_REQUEST,
            DispatchError::Handler(_) | DispatchError::ResponseWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
