//! Normalized route paths.
//!
//! # Responsibilities
//! - Reject empty routes and the bare root path
//! - Reject segments starting with `:` or `*`, which axum reserves
//! - Prefix a missing leading separator
//!
//! # Design Decisions
//! - Validation happens once, at registration; a `Route` is always valid
//! - Routes are matched exactly, no prefix or wildcard semantics

use std::fmt;
use std::str::FromStr;

use crate::error::RegistrationError;

/// A validated route path, always starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Route(String);

impl Route {
    /// Validate and normalize a caller-supplied route.
    ///
    /// `"foo"` and `"/foo"` produce the same route.
    pub fn parse(raw: &str) -> Result<Self, RegistrationError> {
        if raw.is_empty() || raw == "/" {
            return Err(RegistrationError::InvalidRoute(raw.to_string()));
        }

        if raw
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
        {
            return Err(RegistrationError::InvalidRoute(raw.to_string()));
        }

        if raw.starts_with('/') {
            Ok(Self(raw.to_string()))
        } else {
            Ok(Self(format!("/{raw}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path as understood by the axum router, with literal braces escaped.
    pub(crate) fn router_path(&self) -> String {
        self.0.replace('{', "{{").replace('}', "}}")
    }
}

impl FromStr for Route {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
