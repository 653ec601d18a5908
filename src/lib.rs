//! Kong bootstrap library.
//!
//! Waits for a Kong admin API to come up, then registers one service and
//! one route bound to it.

pub mod admin;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod readiness;
pub mod resilience;

pub use bootstrap::{BootstrapReport, Bootstrapper};
pub use config::BootstrapConfig;
pub use error::BootstrapError;
pub use lifecycle::Shutdown;
