//! Structured logging.
//!
//! Logs go to stderr so stdout carries only the operator-facing lines and
//! the raw admin API responses. `RUST_LOG` wins over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(level: &str) -> String {
    format!("kong_bootstrap={level},reqwest=warn")
}

/// Initialize the global tracing subscriber.
pub fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_parse_as_filter() {
        let directives = default_directives("debug");
        assert_eq!(directives, "kong_bootstrap=debug,reqwest=warn");
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
