//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Failed readiness probe
//!     → backoff.rs (delay before the next probe)
//!     → readiness loop sleeps, bounded by its deadline
//! ```
//!
//! # Design Decisions
//! - Registration POSTs are never retried (non-idempotent)
//! - Fixed interval by default; exponential with jitter on request

pub mod backoff;
