//! Shared-secret request authentication.
//!
//! # Responsibilities
//! - Read the token header of each inbound request
//! - Reject requests whose token is absent, empty or different
//!
//! # Design Decisions
//! - No token configured means every request passes
//! - Comparison is exact on the raw header bytes, in constant time

use axum::http::{HeaderMap, HeaderName};

use crate::config::schema::DEFAULT_TOKEN_HEADER;
use crate::error::DispatchError;

/// Token check run before any request is normalized.
#[derive(Debug, Clone)]
pub struct Authenticator {
    token: Option<String>,
    header: HeaderName,
}

impl Authenticator {
    /// Create an authenticator. An empty token disables the check.
    pub fn new(token: Option<String>, header: HeaderName) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            header,
        }
    }

    /// Authenticator that lets every request through.
    pub fn disabled() -> Self {
        Self::new(None, HeaderName::from_static(DEFAULT_TOKEN_HEADER))
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Check the request headers against the configured token.
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), DispatchError> {
        let Some(expected) = &self.token else {
            return Ok(());
        };

        let provided = headers
            .get(&self.header)
            .map(|v| v.as_bytes())
            .unwrap_or_default();

        if !provided.is_empty() && constant_time_eq(provided, expected.as_bytes()) {
            Ok(())
        } else {
            Err(DispatchError::AuthenticationFailed)
        }
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
