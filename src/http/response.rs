//! Response writing.
//!
//! # Responsibilities
//! - Map a handler failure to 500 with the error text as body
//! - Write result data with its content type
//! - Answer 200 with an empty body when there is nothing to write
//!
//! # Design Decisions
//! - No content type is guessed when the handler gives none
//! - The response is fully built before hyper sends anything, so a
//!   ResponseWrite error here means the client received nothing else.
//!   Failures while streaming the body to the socket happen after the
//!   status line was flushed and are not reported back to the handler.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::DispatchError;
use crate::invocation::HandlerOutcome;

/// Convert a handler outcome into the transport response.
pub fn write_response(outcome: HandlerOutcome) -> Result<Response, DispatchError> {
    let result = outcome.map_err(|e| DispatchError::Handler(e.to_string()))?;

    let Some(result) = result.filter(|r| r.has_body()) else {
        return Ok(StatusCode::OK.into_response());
    };

    let mut response = Response::new(Body::from(result.data.unwrap_or_default()));

    if let Some(content_type) = result.content_type.filter(|ct| !ct.is_empty()) {
        let value = HeaderValue::from_str(&content_type).map_err(|e| {
            DispatchError::ResponseWrite(format!("invalid content type {content_type:?}: {e}"))
        })?;
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::invocation::InvocationResult;
    use axum::body::{to_bytes, Bytes};

    async fn body_of(response: Response) -> Bytes {
        to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn test_writes_data_and_content_type() {
        let response =
            write_response(Ok(Some(InvocationResult::new("application/json", "{}")))).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_of(response).await, "{}");
    }

    #[tokio::test]
    async fn test_empty_content_type_not_set() {
        let result = InvocationResult {
            content_type: Some(String::new()),
            data: Some(Bytes::from_static(b"raw")),
        };
        let response = write_response(Ok(Some(result))).unwrap();
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        assert_eq!(body_of(response).await, "raw");
    }

    #[tokio::test]
    async fn test_no_result_or_no_data_is_empty_ok() {
        for outcome in [
            None,
            Some(InvocationResult::default()),
            Some(InvocationResult::new("text/plain", Bytes::new())),
        ] {
            let response = write_response(Ok(outcome)).unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get(header::CONTENT_TYPE).is_none());
            assert!(body_of(response).await.is_empty());
        }
    }

    #[test]
    fn test_handler_error_maps_to_internal_error() {
        let err: HandlerError = "inventory offline".into();
        assert_eq!(
            write_response(Err(err)).unwrap_err(),
            DispatchError::Handler("inventory offline".into())
        );
    }

    #[test]
    fn test_unwritable_content_type() {
        let result = InvocationResult::new("text/plain\nx-injected: 1", "data");
        assert!(matches!(
            write_response(Ok(Some(result))),
            Err(DispatchError::ResponseWrite(_))
        ));
    }
}
