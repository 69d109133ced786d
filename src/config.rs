//! Simulator configuration.

use crate::constants::TENDERLY_SIMULATE_ENDPOINT_URL;
use alloy::primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};
use url::Url;

/// Tenderly endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderlyConfig {
    /// The simulate endpoint URL.
    pub url: String,
    /// Access token sent as `X-Access-Key`, if any.
    #[serde(skip_serializing, default)]
    pub access_token: Option<String>,
}

impl Default for TenderlyConfig {
    fn default() -> Self {
        Self { url: TENDERLY_SIMULATE_ENDPOINT_URL.to_string(), access_token: None }
    }
}

/// Simulator configuration.
///
/// All endpoints and addresses are supplied here; the calculator and builder
/// carry no hardcoded environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Tenderly configuration.
    #[serde(default)]
    pub tenderly: TenderlyConfig,
    /// JSON-RPC endpoint of the chain the Safe lives on.
    pub rpc_url: Url,
    /// Base URL of the hosted Safe transaction service.
    pub safe_service_url: Url,
    /// Chain id, used for the Tenderly network id and the EIP-712 domain.
    pub chain_id: ChainId,
    /// The Safe to simulate against.
    pub safe: Address,
    /// The owner the simulated transaction executes as.
    pub execution_owner: Address,
    /// Gas limit override for simulations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
}

impl SimulatorConfig {
    /// Sets the Tenderly endpoint and access token.
    pub fn with_tenderly(mut self, url: String, access_token: Option<String>) -> Self {
        self.tenderly = TenderlyConfig { url, access_token };
        self
    }

    /// Sets a fixed gas limit, skipping the latest-block query.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }
}
