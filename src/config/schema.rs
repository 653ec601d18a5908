//! Configuration schema definitions.
//!
//! Every field has a default, and the defaults are the values the
//! bootstrapper has always used, so an empty config file (or none at all)
//! registers `portal-service` and `portal-route` against `http://kong:8001`.

use serde::{Deserialize, Serialize};

/// Root configuration for a bootstrap run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Gateway admin API location.
    pub gateway: GatewayConfig,

    /// Readiness polling settings.
    pub readiness: ReadinessConfig,

    /// Service to register.
    pub service: ServiceConfig,

    /// Route to register against the service.
    pub route: RouteConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Exit non-zero when a registration call does not return 2xx.
    pub strict: bool,
}

/// Gateway admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the admin API (e.g., "http://kong:8001").
    pub admin_url: String,

    /// Path probed for readiness.
    pub status_path: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            admin_url: "http://kong:8001".to_string(),
            status_path: "/status".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// How the delay between readiness probes evolves.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    /// Sleep `interval_ms` after every failed probe.
    #[default]
    Fixed,
    /// Double the delay after every failed probe, capped at `max_interval_ms`.
    Exponential,
}

/// Readiness polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Delay after a failed probe in milliseconds.
    pub interval_ms: u64,

    /// Delay growth strategy.
    pub backoff: BackoffKind,

    /// Upper bound for exponential delays in milliseconds.
    pub max_interval_ms: u64,

    /// Give up after this many failed probes. `0` = no limit.
    pub max_attempts: u32,

    /// Give up after this many seconds. `0` = no limit.
    pub timeout_secs: u64,

    /// Treat non-2xx probe responses as "not ready".
    ///
    /// Off by default: any HTTP response means the admin API is reachable.
    pub require_success_status: bool,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5_000,
            backoff: BackoffKind::Fixed,
            max_interval_ms: 30_000,
            max_attempts: 0,
            timeout_secs: 300,
            require_success_status: false,
        }
    }
}

/// Service (backend target) registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Unique service name.
    pub name: String,

    /// Base URL the gateway forwards to.
    pub url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "portal-service".to_string(),
            url: "http://portal:8100".to_string(),
        }
    }
}

/// Route registration, bound to [`ServiceConfig::name`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Unique route name.
    pub name: String,

    /// Path prefixes to match.
    pub paths: Vec<String>,

    /// Remove the matched prefix before forwarding.
    pub strip_path: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            name: "portal-route".to_string(),
            paths: vec!["/portal".to_string()],
            strip_path: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
