//! Command-line interface.

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use crate::config::{read_config, validate_config, BootstrapConfig, ConfigError};
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "kong-bootstrap", version)]
#[command(
    about = "Wait for the Kong admin API, then register the portal service and route",
    long_about = None
)]
pub struct Cli {
    /// TOML file overriding the built-in defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Admin API base URL.
    #[arg(long)]
    pub admin_url: Option<String>,

    /// Delay between readiness probes in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Give up waiting after this many seconds (0 = never).
    #[arg(long, conflicts_with = "wait_forever")]
    pub timeout_secs: Option<u64>,

    /// Give up waiting after this many failed probes (0 = never).
    #[arg(long, conflicts_with = "wait_forever")]
    pub max_attempts: Option<u32>,

    /// Never give up waiting for the gateway.
    #[arg(long)]
    pub wait_forever: bool,

    /// Exit non-zero when a registration call fails.
    #[arg(long)]
    pub strict: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Wait for the gateway and register the service and route (default)
    Run,
    /// Only wait for the gateway admin API
    Wait,
    /// Print the resolved configuration as TOML
    ShowConfig,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }

    /// Defaults, then the config file, then flags; validated last.
    pub fn resolve_config(&self) -> std::result::Result<BootstrapConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => BootstrapConfig::default(),
        };
        self.apply_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut BootstrapConfig) {
        if let Some(url) = &self.admin_url {
            config.gateway.admin_url = url.clone();
        }
        if let Some(interval) = self.interval_ms {
            config.readiness.interval_ms = interval;
            config.readiness.max_interval_ms = config.readiness.max_interval_ms.max(interval);
        }
        if let Some(timeout) = self.timeout_secs {
            config.readiness.timeout_secs = timeout;
        }
        if let Some(max) = self.max_attempts {
            config.readiness.max_attempts = max;
        }
        if self.wait_forever {
            config.readiness.timeout_secs = 0;
            config.readiness.max_attempts = 0;
        }
        if self.strict {
            config.strict = true;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Process exit status for a finished command.
///
/// `Ok(false)` means the gateway answered but a registration call did not
/// return 2xx; that only fails the process in strict mode.
pub fn exit_status(result: &Result<bool>, strict: bool) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) if !strict => 0,
        Ok(false) => {
            tracing::error!("Registration failed and --strict is set");
            1
        }
        Err(e) => {
            tracing::error!(error = %e, "Bootstrap failed");
            1
        }
    }
}
