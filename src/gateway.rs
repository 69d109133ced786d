//! Client for the hosted Safe transaction service.

use crate::error::SimulatorError;
use alloy::primitives::Address;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Wallet state reported by the hosted Safe transaction service.
#[derive(Debug, Clone, Deserialize)]
pub struct SafeInfo {
    /// The Safe address.
    pub address: Address,
    /// Current on-chain nonce.
    pub nonce: u64,
    /// Configured signature threshold.
    pub threshold: u32,
    /// Current owner set.
    pub owners: Vec<Address>,
    /// Deployed contract version, e.g. "1.3.0".
    pub version: String,
}

/// Client for the hosted Safe transaction service.
#[derive(Debug, Clone)]
pub struct SafeGatewayClient {
    http_client: Client,
    base_url: Url,
}

impl SafeGatewayClient {
    /// Creates a client against a transaction service deployment, e.g.
    /// `https://safe-transaction-sepolia.safe.global`.
    pub fn new(base_url: Url) -> Self {
        Self { http_client: Client::new(), base_url }
    }

    /// Fetches owners, nonce, threshold and contract version for a Safe.
    ///
    /// Network and HTTP errors propagate as-is.
    pub async fn safe_info(&self, safe: Address) -> Result<SafeInfo, SimulatorError> {
        let url = self
            .base_url
            .join(&format!("api/v1/safes/{safe}/"))
            .map_err(|err| eyre::eyre!("invalid transaction service url: {err}"))?;

        let response = self.http_client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}
