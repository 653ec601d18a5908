//! Error types for a bootstrap run.
//!
//! Registration calls never produce an error here: their failures are
//! recorded as a [`CallOutcome`](crate::admin::CallOutcome) and the sequence
//! carries on.

use std::time::Duration;
use thiserror::Error;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid admin URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("gateway not ready after {attempts} attempts ({elapsed:?})")]
    NotReady { attempts: u32, elapsed: Duration },

    #[error("interrupted while waiting for the gateway")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
