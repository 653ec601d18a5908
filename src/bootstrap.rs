//! The bootstrap sequence: wait for the gateway, register the service,
//! register the route.
//!
//! ```text
//! wait_until_ready ──▶ register_service ──▶ register_route ──▶ "completada"
//! ```
//!
//! The service must exist before the route that references it, which is
//! guaranteed by ordering alone. A failed registration is printed and
//! recorded in the [`BootstrapReport`]; it never stops the sequence.

use std::io::Write;
use tokio::sync::broadcast;
use crate::admin::{AdminClient, CallOutcome};
use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, Result};
use crate::readiness::{self, ReadinessPolicy, ReadyOutcome};

pub const WAITING_MESSAGE: &str = "Esperando a que Kong esté disponible...";
pub const READY_MESSAGE: &str = "Kong está disponible.";
pub const COMPLETED_MESSAGE: &str = "Configuración de Kong completada.";

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub readiness: ReadyOutcome,
    pub service: CallOutcome,
    pub route: CallOutcome,
}

impl BootstrapReport {
    pub fn all_succeeded(&self) -> bool {
        self.service.is_success() && self.route.is_success()
    }
}

pub struct Bootstrapper {
    client: AdminClient,
    config: BootstrapConfig,
}

impl Bootstrapper {
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        let client = AdminClient::new(&config.gateway)?;
        Ok(Self { client, config })
    }

    pub async fn wait_until_ready(
        &self,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<ReadyOutcome> {
        let policy = ReadinessPolicy::from(&self.config.readiness);
        readiness::wait_until_ready(&self.client, &policy, shutdown).await
    }

    /// Create the service and print the raw response.
    pub async fn register_service<W: Write>(&self, out: &mut W) -> Result<CallOutcome> {
        let service = &self.config.service;
        writeln!(out, "Registrando servicio {} ({})...", service.name, service.url)?;

        let outcome = self.client.create_service(service).await?;
        log_outcome("service", &service.name, &outcome);
        writeln!(out, "{}", outcome.display_text())?;
        Ok(outcome)
    }

    /// Create the route on the service and print the raw response.
    pub async fn register_route<W: Write>(&self, out: &mut W) -> Result<CallOutcome> {
        let route = &self.config.route;
        writeln!(
            out,
            "Registrando ruta {} ({}) en {}...",
            route.name,
            route.paths.join(", "),
            self.config.service.name
        )?;

        let outcome = self
            .client
            .create_route(&self.config.service.name, route)
            .await?;
        log_outcome("route", &route.name, &outcome);
        writeln!(out, "{}", outcome.display_text())?;
        Ok(outcome)
    }

    /// Run the whole sequence.
    ///
    /// Fails only when the gateway never becomes ready or `shutdown` fires;
    /// the completion message is printed whatever the registration calls
    /// returned.
    pub async fn run<W: Write>(
        &self,
        out: &mut W,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<BootstrapReport> {
        writeln!(out, "{}", WAITING_MESSAGE)?;
        out.flush()?;
        let readiness = self.wait_until_ready(shutdown).await?;
        writeln!(out, "{}", READY_MESSAGE)?;

        let service = tokio::select! {
            outcome = self.register_service(out) => outcome?,
            Ok(()) = shutdown.recv() => return Err(BootstrapError::Interrupted),
        };
        let route = tokio::select! {
            outcome = self.register_route(out) => outcome?,
            Ok(()) = shutdown.recv() => return Err(BootstrapError::Interrupted),
        };

        writeln!(out, "{}", COMPLETED_MESSAGE)?;
        out.flush()?;

        let report = BootstrapReport {
            readiness,
            service,
            route,
        };
        if !report.all_succeeded() {
            tracing::warn!(
                service_status = ?report.service.status(),
                route_status = ?report.route.status(),
                "Bootstrap finished with failed registrations"
            );
        }
        Ok(report)
    }
}

fn log_outcome(kind: &'static str, name: &str, outcome: &CallOutcome) {
    match outcome {
        CallOutcome::Response { status, id, .. } if status.is_success() => {
            tracing::info!(kind, name, status = %status, id = ?id, "Registered");
        }
        CallOutcome::Response { status, .. } => {
            tracing::warn!(kind, name, status = %status, "Registration rejected");
        }
        CallOutcome::Unreachable { error } => {
            tracing::warn!(kind, name, error = %error, "Registration request failed");
        }
    }
}
