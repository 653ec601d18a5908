//! kong-bootstrap
//!
//! One-shot init step for a Kong deployment.
//!
//! ```text
//!   kong-bootstrap                        Kong admin API (:8001)
//!   ──────────────                        ──────────────────────
//!   wait_until_ready  ── GET /status ───▶  (retry until it answers)
//!   register_service  ── POST /services ─▶ name=portal-service
//!                                          url=http://portal:8100
//!   register_route    ── POST /services/portal-service/routes ─▶
//!                                          paths[]=/portal
//!                                          strip_path=true
//!                                          name=portal-route
//!   "Configuración de Kong completada."
//! ```

use std::io;
use std::process::ExitCode;
use clap::Parser;

use kong_bootstrap::cli::{self, Cli, Commands};
use kong_bootstrap::lifecycle::{signals, Shutdown};
use kong_bootstrap::observability::logging;
use kong_bootstrap::Bootstrapper;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("kong-bootstrap v{} starting", env!("CARGO_PKG_VERSION"));

    if cli.command() == Commands::ShowConfig {
        return match toml::to_string_pretty(&config) {
            Ok(rendered) => {
                print!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render configuration");
                ExitCode::FAILURE
            }
        };
    }

    let strict = config.strict;
    let bootstrapper = match Bootstrapper::new(config) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let mut shutdown_rx = shutdown.subscribe();
    signals::spawn_ctrl_c_handler(shutdown.clone());

    let mut out = io::stdout();
    let result = match cli.command() {
        Commands::Wait => bootstrapper
            .wait_until_ready(&mut shutdown_rx)
            .await
            .map(|_| true),
        _ => bootstrapper
            .run(&mut out, &mut shutdown_rx)
            .await
            .map(|report| report.all_succeeded()),
    };

    ExitCode::from(cli::exit_status(&result, strict))
}
