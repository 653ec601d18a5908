//! Outcome of a single admin API call.

use reqwest::{Response, StatusCode};
use serde_json::Value;

/// What came back from a registration call.
///
/// A non-2xx status is not an error: it is reported and the bootstrap
/// sequence continues.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// The gateway answered.
    Response {
        status: StatusCode,
        /// `id` of the created entity, when the body is Kong's JSON entity.
        id: Option<String>,
        /// Status line, headers and body as received.
        rendered: String,
    },
    /// The request never got a response.
    Unreachable { error: String },
}

impl CallOutcome {
    /// Read the whole response and render it like `curl -i`.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let mut rendered = format!("{:?} {}\r\n", response.version(), status);
        for (name, value) in response.headers() {
            rendered.push_str(&format!(
                "{}: {}\r\n",
                name,
                String::from_utf8_lossy(value.as_bytes())
            ));
        }
        rendered.push_str("\r\n");

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read admin API response body");
                String::new()
            }
        };
        rendered.push_str(&body);

        Self::Response {
            status,
            id: entity_id(&body),
            rendered,
        }
    }

    pub(crate) fn unreachable(error: &reqwest::Error) -> Self {
        Self::Unreachable {
            error: error.to_string(),
        }
    }

    /// True only for a 2xx response.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Response { status, .. } if status.is_success())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Unreachable { .. } => None,
        }
    }

    /// Text printed to the operator.
    pub fn display_text(&self) -> String {
        match self {
            Self::Response { rendered, .. } => rendered.clone(),
            Self::Unreachable { error } => format!("Error: {}", error),
        }
    }
}

fn entity_id(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("id")?.as_str().map(str::to_owned)
}
