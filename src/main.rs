//! # Safe Simulator
//!
//! Simulates a Safe `execTransaction` call on Tenderly, overriding threshold
//! and nonce storage so under-signed or queued transactions still execute.

use alloy::{
    primitives::{Address, Bytes, U256},
    providers::ProviderBuilder,
};
use clap::Parser;
use safe_simulator::{
    config::{SimulatorConfig, TenderlyConfig},
    gateway::SafeGatewayClient,
    payload::{LatestBlock, build_simulation_payload},
    tenderly::TenderlyClient,
    types::{ExecTransactionEncoder, SafeTransactionData, SimulationParams},
};
use std::collections::BTreeSet;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use url::Url;

/// Simulates a Safe transaction on Tenderly with storage overrides.
#[derive(Debug, Parser)]
#[command(author, about = "Safe simulator", long_about = None)]
struct Args {
    /// The JSON-RPC endpoint of the chain the Safe is deployed on.
    ///
    /// Must be a valid HTTP or HTTPS URL pointing to an Ethereum JSON-RPC
    /// endpoint.
    #[arg(long, value_name = "RPC_ENDPOINT", env = "RPC_URL")]
    rpc_url: Url,
    /// The base URL of the hosted Safe transaction service.
    #[arg(
        long,
        value_name = "URL",
        env = "SAFE_SERVICE_URL",
        default_value = "https://safe-transaction-sepolia.safe.global"
    )]
    safe_service_url: Url,
    /// The address of the Safe.
    #[arg(long, value_name = "ADDRESS", env = "SAFE_ADDRESS")]
    safe: Address,
    /// The owner the simulated transaction executes as.
    #[arg(long = "owner", value_name = "ADDRESS", env = "OWNER_ADDRESS")]
    execution_owner: Address,
    /// The chain id, used for the Tenderly network id and the EIP-712 domain.
    #[arg(long, value_name = "CHAIN_ID", env = "CHAIN_ID", default_value_t = 11155111)]
    chain_id: u64,
    /// The Tenderly simulate endpoint. Defaults to the public endpoint.
    #[arg(long, value_name = "URL", env = "TENDERLY_URL")]
    tenderly_url: Option<String>,
    /// The Tenderly access key.
    #[arg(long, value_name = "TOKEN", env = "TENDERLY_ACCESS_TOKEN")]
    tenderly_access_token: Option<String>,
    /// The recipient of the simulated transaction.
    #[arg(long, value_name = "ADDRESS")]
    to: Address,
    /// The value transferred by the simulated transaction, in wei.
    #[arg(long, value_name = "WEI", default_value_t = U256::ZERO)]
    value: U256,
    /// The calldata of the simulated transaction.
    #[arg(long, value_name = "BYTES", default_value = "0x")]
    data: Bytes,
    /// The Safe nonce the simulated transaction is queued at.
    #[arg(long, value_name = "NONCE", default_value_t = 0)]
    nonce: u64,
    /// Gas limit override. Defaults to the latest block gas limit.
    #[arg(long, value_name = "GAS")]
    gas_limit: Option<u64>,
}

impl Args {
    fn config(&self) -> SimulatorConfig {
        let tenderly = TenderlyConfig {
            url: self
                .tenderly_url
                .clone()
                .unwrap_or_else(|| TenderlyConfig::default().url),
            access_token: self.tenderly_access_token.clone(),
        };
        SimulatorConfig {
            tenderly,
            rpc_url: self.rpc_url.clone(),
            safe_service_url: self.safe_service_url.clone(),
            chain_id: self.chain_id,
            safe: self.safe,
            execution_owner: self.execution_owner,
            gas_limit: self.gas_limit,
        }
    }

    /// Builds the simulation payload and submits it.
    async fn run(self) -> eyre::Result<()> {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .init();

        let config = self.config();

        let gateway = SafeGatewayClient::new(config.safe_service_url.clone());
        let safe_info = gateway.safe_info(config.safe).await?;
        info!(
            safe = %safe_info.address,
            version = %safe_info.version,
            nonce = safe_info.nonce,
            threshold = safe_info.threshold,
            owners = safe_info.owners.len(),
            "Fetched Safe state"
        );

        let tx = SafeTransactionData::transfer(self.to, self.value, self.data, self.nonce);
        let params = SimulationParams {
            safe: safe_info.address,
            chain_id: config.chain_id,
            threshold: safe_info.threshold,
            safe_nonce: safe_info.nonce,
            execution_owner: config.execution_owner,
            tx_nonce: tx.nonce,
            // No collected signatures; the execution owner's pre-validated
            // signature is the only one attached.
            signers: BTreeSet::new(),
            gas_limit: config.gas_limit,
        };

        let provider = ProviderBuilder::new().connect_http(config.rpc_url.clone());
        let encoder = ExecTransactionEncoder::new(
            safe_info.address,
            safe_info.version.clone(),
            tx,
            config.execution_owner,
        );

        let payload = build_simulation_payload(&params, &LatestBlock(provider), &encoder).await?;
        info!(
            gas = payload.gas,
            overrides = payload.state_objects.is_some(),
            "Built simulation payload"
        );

        let client =
            TenderlyClient::with_url(config.tenderly.url.clone(), config.tenderly.access_token.clone());
        let simulation = client.simulate(&payload).await?;
        info!(?simulation, "Simulation complete");

        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = args.run().await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
