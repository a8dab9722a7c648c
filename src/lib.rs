//! Service invocation adapter.
//!
//! Exposes user-supplied invocation handlers over HTTP for a sidecar
//! runtime: registers routes, checks the app token, turns each request into
//! an [`InvocationEvent`](invocation::InvocationEvent), calls the handler and
//! writes its result back.

pub mod config;
pub mod error;
pub mod http;
pub mod invocation;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServiceConfig;
pub use error::{DispatchError, HandlerError, RegistrationError};
pub use http::Service;
pub use invocation::{InvocationContext, InvocationEvent, InvocationHandler, InvocationResult};
pub use lifecycle::Shutdown;
