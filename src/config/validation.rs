//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - URLs parse and use an HTTP scheme
//! - Names are usable as admin API path segments
//! - Polling intervals are sane
//!
//! Returns all validation errors, not just the first.

use std::fmt;
use url::Url;
use crate::config::schema::BootstrapConfig;

/// A single semantic problem in a [`BootstrapConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "service.url").
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &BootstrapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_http_url(&config.gateway.admin_url, "gateway.admin_url", &mut errors);
    check_http_url(&config.service.url, "service.url", &mut errors);

    if !config.gateway.status_path.starts_with('/') {
        errors.push(ValidationError::new(
            "gateway.status_path",
            "must start with '/'",
        ));
    }
    if config.gateway.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "gateway.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    check_name(&config.service.name, "service.name", &mut errors);
    check_name(&config.route.name, "route.name", &mut errors);

    if config.route.paths.is_empty() {
        errors.push(ValidationError::new("route.paths", "at least one path is required"));
    }
    for path in &config.route.paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::new(
                "route.paths",
                format!("'{}' must start with '/'", path),
            ));
        }
    }

    let readiness = &config.readiness;
    if readiness.interval_ms == 0 {
        errors.push(ValidationError::new(
            "readiness.interval_ms",
            "must be greater than zero",
        ));
    }
    if readiness.max_interval_ms < readiness.interval_ms {
        errors.push(ValidationError::new(
            "readiness.max_interval_ms",
            format!(
                "must be at least interval_ms ({} < {})",
                readiness.max_interval_ms, readiness.interval_ms
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(value: &str, field: &'static str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}

fn check_name(value: &str, field: &'static str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if value.contains('/') {
        errors.push(ValidationError::new(field, "must not contain '/'"));
    }
}
