//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! readiness, admin, bootstrap
//!     → tracing events with structured fields
//!     → logging.rs subscriber (stderr)
//! ```

pub mod logging;
