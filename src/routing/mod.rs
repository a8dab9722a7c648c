//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (before serving):
//!     caller route + handler
//!     → route.rs (validate, normalize)
//!     → registrar.rs (bind in route table)
//!
//! Serving:
//!     Registrar
//!     → http::server (one axum route per binding)
//!     → frozen, immutable router
//! ```
//!
//! # Design Decisions
//! - Routes validated at registration, never on the hot path
//! - Exact path matching only
//! - Table is owned by the service, not global state

pub mod registrar;
pub mod route;

pub use registrar::{Binding, Registrar};
pub use route::Route;
