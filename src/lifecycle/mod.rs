//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT (Ctrl-C) → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → readiness wait or in-flight registration is abandoned
//!               → process exits non-zero
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
