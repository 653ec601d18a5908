//! Readiness polling against the gateway's status endpoint.
//!
//! The loop probes, and after every failed probe logs one warning and
//! sleeps. It returns after the first successful probe, or gives up once
//! the configured attempt count or deadline is exhausted. With neither
//! bound set it waits forever, which is what a `docker compose` init
//! container usually wants.

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{self, Instant};
use crate::admin::AdminClient;
use crate::config::{BackoffKind, ReadinessConfig};
use crate::error::{BootstrapError, Result};
use crate::resilience::backoff;

/// Resolved polling parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub interval: Duration,
    pub backoff: BackoffKind,
    pub max_interval: Duration,
    /// Maximum number of failed probes before giving up.
    pub max_attempts: Option<u32>,
    /// Overall deadline measured from the first probe.
    pub timeout: Option<Duration>,
    pub require_success_status: bool,
}

impl ReadinessPolicy {
    fn delay_after(&self, failures: u32) -> Duration {
        backoff::delay_after(
            self.backoff,
            failures,
            self.interval.as_millis() as u64,
            self.max_interval.as_millis() as u64,
        )
    }
}

impl From<&ReadinessConfig> for ReadinessPolicy {
    fn from(config: &ReadinessConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            backoff: config.backoff,
            max_interval: Duration::from_millis(config.max_interval_ms),
            max_attempts: Some(config.max_attempts).filter(|n| *n > 0),
            timeout: Some(config.timeout_secs)
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
            require_success_status: config.require_success_status,
        }
    }
}

/// Result of a successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyOutcome {
    /// Probes that failed before the successful one.
    pub failed_attempts: u32,
    pub elapsed: Duration,
}

/// Poll the status endpoint until it answers.
///
/// Returns [`BootstrapError::NotReady`] once a bound is exhausted and
/// [`BootstrapError::Interrupted`] when `shutdown` fires.
pub async fn wait_until_ready(
    client: &AdminClient,
    policy: &ReadinessPolicy,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<ReadyOutcome> {
    let started = Instant::now();
    let deadline = policy.timeout.map(|t| started + t);
    let mut failed_attempts: u32 = 0;

    tracing::info!(
        url = %client.status_url(),
        interval_ms = policy.interval.as_millis() as u64,
        max_attempts = ?policy.max_attempts,
        timeout_secs = ?policy.timeout.map(|t| t.as_secs()),
        "Waiting for gateway admin API"
    );

    loop {
        let probe = tokio::select! {
            result = probe_before(client, deadline) => result,
            Ok(()) = shutdown.recv() => return Err(BootstrapError::Interrupted),
        };

        let cause = match probe {
            Ok(status) if !policy.require_success_status || status.is_success() => {
                let outcome = ReadyOutcome {
                    failed_attempts,
                    elapsed: started.elapsed(),
                };
                tracing::info!(
                    status = %status,
                    failed_attempts,
                    elapsed_ms = outcome.elapsed.as_millis() as u64,
                    "Gateway admin API is ready"
                );
                return Ok(outcome);
            }
            Ok(status) => format!("status {}", status),
            Err(cause) => cause,
        };

        failed_attempts = failed_attempts.saturating_add(1);
        tracing::warn!(attempt = failed_attempts, cause = %cause, "Gateway not ready yet");

        let not_ready = || BootstrapError::NotReady {
            attempts: failed_attempts,
            elapsed: started.elapsed(),
        };

        if policy.max_attempts.is_some_and(|max| failed_attempts >= max) {
            return Err(not_ready());
        }

        let mut delay = policy.delay_after(failed_attempts);
        if let Some(deadline) = deadline {
            let now = Instant::now();
            if now >= deadline {
                return Err(not_ready());
            }
            delay = delay.min(deadline - now);
        }

        tokio::select! {
            _ = time::sleep(delay) => {}
            Ok(()) = shutdown.recv() => return Err(BootstrapError::Interrupted),
        }
    }
}

/// One probe, cut short at `deadline` so an unanswered request cannot
/// outlive the wait.
async fn probe_before(
    client: &AdminClient,
    deadline: Option<Instant>,
) -> std::result::Result<reqwest::StatusCode, String> {
    match deadline {
        Some(deadline) => match time::timeout_at(deadline, client.probe()).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(_) => Err("no answer before the readiness deadline".to_string()),
        },
        None => client.probe().await.map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bounds_mean_unbounded() {
        let config = ReadinessConfig {
            max_attempts: 0,
            timeout_secs: 0,
            ..ReadinessConfig::default()
        };
        let policy = ReadinessPolicy::from(&config);
        assert_eq!(policy.max_attempts, None);
        assert_eq!(policy.timeout, None);
    }

    #[test]
    fn default_policy_is_fixed_five_seconds() {
        let policy = ReadinessPolicy::from(&ReadinessConfig::default());
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.delay_after(7), Duration::from_secs(5));
        assert_eq!(policy.timeout, Some(Duration::from_secs(300)));
    }
}
