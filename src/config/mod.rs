//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (the portal registration)
//!     → loader.rs (optional TOML file, merged over defaults by serde)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → BootstrapConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{read_config, ConfigError};
pub use schema::{
    BackoffKind, BootstrapConfig, GatewayConfig, ObservabilityConfig, ReadinessConfig,
    RouteConfig, ServiceConfig,
};
pub use validation::{validate_config, ValidationError};
