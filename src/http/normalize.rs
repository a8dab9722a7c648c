//! Request normalization.
//!
//! # Responsibilities
//! - Copy method, raw query and content type into an InvocationEvent
//! - Read the whole body, bounded by the configured limit
//! - Merge request headers over upstream metadata into the carrier context
//!
//! # Design Decisions
//! - A missing body is an empty event payload, not an error
//! - Body read failures (including the size limit) end the request
//! - Upstream metadata arrives as a `Metadata` request extension
//! - The event's content type is text; its exact bytes stay available
//!   under `content-type` in the metadata

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};

use crate::error::DispatchError;
use crate::invocation::{InvocationEvent, Metadata};

/// Turn an HTTP request into an event and its carrier metadata.
pub async fn normalize(
    request: Request<Body>,
    max_body_size: usize,
) -> Result<(InvocationEvent, Metadata), DispatchError> {
    let (mut parts, body) = request.into_parts();

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    let data = to_bytes(body, max_body_size)
        .await
        .map_err(|e| DispatchError::BodyRead(e.to_string()))?;

    let metadata = parts
        .extensions
        .remove::<Metadata>()
        .unwrap_or_default()
        .merged_with_headers(&parts.headers);

    let event = InvocationEvent {
        verb: parts.method.to_string(),
        query_string: parts.uri.query().unwrap_or_default().to_string(),
        content_type,
        data,
    };

    Ok((event, metadata))
}
