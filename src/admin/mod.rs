//! Gateway admin API subsystem.
//!
//! # Data Flow
//! ```text
//! readiness loop ─▶ client.rs probe()          GET  {admin}/status
//! bootstrap      ─▶ client.rs create_service() POST {admin}/services
//!                ─▶ client.rs create_route()   POST {admin}/services/{name}/routes
//!                       │
//!                       ├─ form.rs     (request body)
//!                       └─ response.rs (CallOutcome, rendered like curl -i)
//! ```
//!
//! # Design Decisions
//! - One shared client with a per-request timeout
//! - Registration calls never fail the run; their outcome is returned

pub mod client;
pub mod form;
pub mod response;

pub use client::AdminClient;
pub use form::FormBody;
pub use response::CallOutcome;
