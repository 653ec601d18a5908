//! HTTP client for the gateway admin API.

use std::time::Duration;
use reqwest::{Client, StatusCode};
use url::Url;
use crate::admin::form::{self, FormBody};
use crate::admin::response::CallOutcome;
use crate::config::{GatewayConfig, RouteConfig, ServiceConfig};
use crate::error::Result;

/// Thin wrapper over one shared [`reqwest::Client`] and the admin base URL.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base: Url,
    status_url: Url,
}

impl AdminClient {
    pub fn new(gateway: &GatewayConfig) -> Result<Self> {
        // The admin API is only reachable on the internal network.
        let http = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(gateway.request_timeout_secs))
            .user_agent(concat!("kong-bootstrap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base = Url::parse(&gateway.admin_url)?;
        let status_url = endpoint(&base, gateway.status_path.split('/'))?;

        Ok(Self {
            http,
            base,
            status_url,
        })
    }

    pub fn status_url(&self) -> &Url {
        &self.status_url
    }

    /// `POST /services`
    pub fn services_url(&self) -> Result<Url> {
        endpoint(&self.base, ["services"])
    }

    /// `POST /services/{name}/routes`
    pub fn routes_url(&self, service_name: &str) -> Result<Url> {
        endpoint(&self.base, ["services", service_name, "routes"])
    }

    /// One GET against the status endpoint.
    ///
    /// Any HTTP response is `Ok`; the caller decides whether the status
    /// counts as ready.
    pub async fn probe(&self) -> std::result::Result<StatusCode, reqwest::Error> {
        let response = self.http.get(self.status_url.clone()).send().await?;
        Ok(response.status())
    }

    pub async fn create_service(&self, service: &ServiceConfig) -> Result<CallOutcome> {
        let body = FormBody::new()
            .field("name", service.name.as_str())
            .field("url", service.url.as_str());

        Ok(self.post_form(self.services_url()?, body).await)
    }

    pub async fn create_route(&self, service_name: &str, route: &RouteConfig) -> Result<CallOutcome> {
        let body = route_form(route);
        Ok(self.post_form(self.routes_url(service_name)?, body).await)
    }

    async fn post_form(&self, url: Url, body: FormBody) -> CallOutcome {
        tracing::debug!(url = %url, body = %body.encode(), "POST admin API");

        let result = self
            .http
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, form::CONTENT_TYPE)
            .body(body.encode())
            .send()
            .await;

        match result {
            Ok(response) => CallOutcome::from_response(response).await,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Admin API call failed");
                CallOutcome::unreachable(&e)
            }
        }
    }
}

fn route_form(route: &RouteConfig) -> FormBody {
    let mut body = FormBody::new();
    for path in &route.paths {
        body = body.field("paths[]", path.as_str());
    }
    body.field("strip_path", route.strip_path.to_string())
        .field("name", route.name.as_str())
}

/// Append path segments to the admin base URL, escaping each segment.
fn endpoint<'a, I>(base: &Url, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments.into_iter().filter(|s| !s.is_empty()));
    Ok(url)
}
