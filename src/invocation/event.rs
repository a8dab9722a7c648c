//! Invocation event and result types.

use axum::body::Bytes;

/// One inbound request, detached from the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationEvent {
    /// Transport method (e.g. `POST`).
    pub verb: String,

    /// Raw, unparsed query string without the leading `?`.
    pub query_string: String,

    /// Content type of the request body, empty when absent.
    pub content_type: String,

    /// Request body, empty when the request carried none.
    pub data: Bytes,
}

/// Output produced by a handler.
///
/// A missing result, or a result without data, means "no body to write".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationResult {
    /// Content type to announce on the response.
    pub content_type: Option<String>,

    /// Response payload.
    pub data: Option<Bytes>,
}

impl InvocationResult {
    /// Create a result carrying `data` with the given content type.
    pub fn new(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            data: Some(data.into()),
        }
    }

    /// Create a result carrying `data` without a content type.
    pub fn from_data(data: impl Into<Bytes>) -> Self {
        Self {
            content_type: None,
            data: Some(data.into()),
        }
    }

    /// True when there is a body to write.
    pub fn has_body(&self) -> bool {
        self.data.as_ref().is_some_and(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_body() {
        assert!(!InvocationResult::default().has_body());
        assert!(!InvocationResult::from_data(Bytes::new()).has_body());
        assert!(InvocationResult::new("text/plain", "hi").has_body());
    }
}
