//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or defaults
//!     → loader.rs (parse & deserialize, APP_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to Service::new at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table and token are fixed
//!   for the lifetime of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, ServiceConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
