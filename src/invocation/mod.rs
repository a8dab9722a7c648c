//! Transport-agnostic invocation model.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → http::normalize (build InvocationEvent, merge Metadata)
//!     → InvocationHandler::invoke(InvocationContext, InvocationEvent)
//!     → Option<InvocationResult> | HandlerError
//!     → http::response (write transport response)
//! ```
//!
//! # Design Decisions
//! - Events are built fresh per request and handed over by value
//! - Handlers are opaque capabilities; the pipeline only calls them
//! - Metadata is rebuilt per request, never mutated in place

pub mod event;
pub mod handler;
pub mod metadata;

pub use event::{InvocationEvent, InvocationResult};
pub use handler::{
    handler_fn, health_check_fn, BoxFuture, HandlerOutcome, HealthCheck, InvocationContext,
    InvocationHandler,
};
pub use metadata::Metadata;
