//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one route per registration)
//!     → request.rs (add request ID)
//!     → dispatch.rs
//!         → options.rs (OPTIONS answered here, nothing else runs)
//!         → auth.rs (app token check)
//!         → normalize.rs (InvocationEvent + carrier metadata)
//!         → handler
//!         → response.rs (result or error → HTTP response)
//!     → Send to client
//! ```

pub mod auth;
mod dispatch;
pub mod normalize;
pub mod options;
pub mod request;
pub mod response;
pub mod server;

pub use auth::Authenticator;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::Service;
