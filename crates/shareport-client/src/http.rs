//! HTTP share gateway.
//!
//! Both gateway operations go through one `reqwest` client with a bounded
//! request timeout, so neither the availability probe nor the submission
//! can hang indefinitely. Timeouts surface as external-service errors like
//! any other transport failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use shareport_core::config::GatewayConfig;
use shareport_core::error::{AppError, ErrorKind};
use shareport_core::result::AppResult;
use shareport_core::traits::ShareGateway;
use shareport_core::types::{CreateShareRequest, ShareLink, ShareRecord};

/// Share gateway backed by the backend REST API.
#[derive(Debug, Clone)]
pub struct HttpShareGateway {
    client: reqwest::Client,
    base_url: String,
}

/// Body of the availability probe response.
#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    available: bool,
}

impl HttpShareGateway {
    /// Creates a gateway from the configured base URL and timeout.
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl ShareGateway for HttpShareGateway {
    async fn is_link_available(&self, link: &ShareLink) -> AppResult<bool> {
        let url = self.endpoint(&format!("shares/{link}/available"));
        debug!(%url, "Probing share link availability");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?
            .error_for_status()
            .map_err(transport_error)?;

        let body: AvailabilityResponse = response.json().await.map_err(transport_error)?;
        Ok(body.available)
    }

    async fn create_share(&self, request: &CreateShareRequest) -> AppResult<ShareRecord> {
        let url = self.endpoint("shares");
        debug!(%url, link = %request.link, "Submitting create-share request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        // The backend enforces uniqueness too; a race between probe and
        // submission still surfaces as a conflict.
        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(AppError::conflict(format!(
                "Share link '{}' is already taken",
                request.link
            )));
        }

        let response = response.error_for_status().map_err(transport_error)?;
        response.json().await.map_err(transport_error)
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "Request to the share backend timed out".to_string()
    } else {
        format!("Share backend request failed: {err}")
    };
    AppError::with_source(ErrorKind::ExternalService, message, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let gateway = HttpShareGateway::new(&GatewayConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            timeout_seconds: 15,
        })
        .unwrap();
        assert_eq!(
            gateway.endpoint("shares/abc/available"),
            "http://localhost:8080/api/shares/abc/available"
        );
    }
}
