//! Route table built before serving starts.
//!
//! # Responsibilities
//! - Validate route and handler at registration time
//! - Store the binding for each normalized route
//!
//! # Design Decisions
//! - Nothing is inserted unless both route and handler are valid
//! - A later registration of the same route replaces the earlier one
//! - Frozen into the HTTP router once; immutable while traffic flows

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::RegistrationError;
use crate::invocation::{HealthCheck, InvocationHandler};
use crate::routing::Route;

/// What a route dispatches to.
#[derive(Clone)]
pub enum Binding {
    /// Full pipeline: auth, normalize, invoke, write.
    Invocation(Arc<dyn InvocationHandler>),
    /// Unauthenticated liveness check.
    HealthCheck(Arc<dyn HealthCheck>),
}

impl Binding {
    fn kind(&self) -> &'static str {
        match self {
            Binding::Invocation(_) => "invocation",
            Binding::HealthCheck(_) => "health_check",
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

/// Owned mapping from route to binding.
#[derive(Debug, Default, Clone)]
pub struct Registrar {
    table: BTreeMap<Route, Binding>,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an invocation handler to `route`.
    ///
    /// Fails with [`RegistrationError::InvalidRoute`] for `""` and `"/"`, and
    /// with [`RegistrationError::MissingHandler`] when `handler` is `None`.
    pub fn register_invocation(
        &mut self,
        route: &str,
        handler: Option<Arc<dyn InvocationHandler>>,
    ) -> Result<Route, RegistrationError> {
        let route = Route::parse(route)?;
        let handler = handler.ok_or(RegistrationError::MissingHandler)?;
        self.bind(route.clone(), Binding::Invocation(handler));
        Ok(route)
    }

    /// Bind a health check to `route`.
    pub fn register_health_check(
        &mut self,
        route: &str,
        check: Option<Arc<dyn HealthCheck>>,
    ) -> Result<Route, RegistrationError> {
        let route = Route::parse(route)?;
        let check = check.ok_or(RegistrationError::MissingHandler)?;
        self.bind(route.clone(), Binding::HealthCheck(check));
        Ok(route)
    }

    fn bind(&mut self, route: Route, binding: Binding) {
        let kind = binding.kind();
        if let Some(previous) = self.table.insert(route.clone(), binding) {
            tracing::warn!(
                route = %route,
                previous = previous.kind(),
                kind,
                "Route registered twice, replacing previous binding"
            );
        } else {
            tracing::debug!(route = %route, kind, "Route registered");
        }
    }

    pub fn get(&self, route: &Route) -> Option<&Binding> {
        self.table.get(route)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.table.keys()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub(crate) fn into_bindings(self) -> impl Iterator<Item = (Route, Binding)> {
        self.table.into_iter()
    }
}
