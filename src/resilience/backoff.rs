//! Delay between readiness probes.

use std::time::Duration;
use rand::Rng;
use crate::config::BackoffKind;

/// Delay to wait after the `failures`-th failed probe (1-based).
pub fn delay_after(kind: BackoffKind, failures: u32, base_ms: u64, max_ms: u64) -> Duration {
    match kind {
        BackoffKind::Fixed => Duration::from_millis(base_ms),
        BackoffKind::Exponential => calculate_backoff(failures, base_ms, max_ms),
    }
}

/// Calculate exponential backoff delay with jitter.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    // Jitter: 0 to 10% of the delay
    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ignores_attempt_count() {
        for failures in 1..10 {
            assert_eq!(
                delay_after(BackoffKind::Fixed, failures, 5_000, 30_000),
                Duration::from_millis(5_000)
            );
        }
    }

    #[test]
    fn exponential_doubles_until_capped() {
        let b1 = delay_after(BackoffKind::Exponential, 1, 100, 2000);
        assert!(b1.as_millis() >= 100 && b1.as_millis() < 110);

        let b2 = delay_after(BackoffKind::Exponential, 2, 100, 2000);
        assert!(b2.as_millis() >= 200 && b2.as_millis() < 220);

        let max = calculate_backoff(10, 100, 1000);
        assert!(max.as_millis() >= 1000 && max.as_millis() < 1100);
    }

    #[test]
    fn large_attempt_counts_do_not_overflow() {
        let d = calculate_backoff(u32::MAX, 5_000, 30_000);
        assert!(d.as_millis() >= 30_000);
    }
}
