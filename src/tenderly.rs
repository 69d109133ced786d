//! Minimal client for the Tenderly simulate API.

use crate::{
    constants::TENDERLY_SIMULATE_ENDPOINT_URL,
    error::SimulatorError,
    types::{TenderlySimulatePayload, TenderlySimulation},
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Client for the Tenderly simulate endpoint.
#[derive(Clone, Debug)]
pub struct TenderlyClient {
    http_client: Client,
    url: String,
    access_token: Option<String>,
}

/// Error body returned by Tenderly on failed requests.
#[derive(Debug, Deserialize)]
struct TenderlyErrorBody {
    error: Option<TenderlyErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct TenderlyErrorDetail {
    message: Option<String>,
}

impl TenderlyClient {
    /// Creates a client for the public simulate endpoint.
    pub fn new(access_token: Option<String>) -> Self {
        Self::with_url(TENDERLY_SIMULATE_ENDPOINT_URL.to_string(), access_token)
    }

    /// Creates a client against a custom endpoint, e.g. a project-scoped
    /// simulate URL.
    pub fn with_url(url: String, access_token: Option<String>) -> Self {
        Self { http_client: Client::new(), url, access_token }
    }

    /// Submits a simulation request and decodes the response.
    ///
    /// Failed requests are not retried. A non-success status is surfaced as
    /// `<status> - <statusText>: <message>`, with the message taken from the
    /// service's error body when present.
    pub async fn simulate(
        &self,
        payload: &TenderlySimulatePayload,
    ) -> Result<TenderlySimulation, SimulatorError> {
        let mut request = self.http_client.post(&self.url).json(payload);
        if let Some(token) = &self.access_token {
            request = request.header("X-Access-Key", token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<TenderlyErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .and_then(|error| error.message)
                .unwrap_or(text);
            return Err(SimulatorError::SimulationRequest {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                message,
            });
        }

        debug!(status = %status, "Simulation submitted");
        Ok(response.json().await?)
    }
}
