//! Assembly of the Tenderly simulation request.
//!
//! The builder is the only place where asynchronous collaborators are
//! involved; the override calculation itself stays synchronous and pure.

use crate::{
    error::SimulatorError,
    overrides,
    types::{SimulationParams, StateObject, TenderlySimulatePayload},
};
use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes},
    providers::Provider,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::debug;

/// An `execTransaction` call ready to be simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall {
    /// The contract the call is made against.
    pub to: Address,
    /// ABI-encoded calldata.
    pub input: Bytes,
}

/// Source for the gas limit used when the caller does not provide one.
#[async_trait]
pub trait BlockGasLimit {
    /// The gas limit of the latest block.
    async fn latest_gas_limit(&self) -> Result<u64, SimulatorError>;
}

/// Gas limit source backed by an RPC provider, reading the latest block.
#[derive(Debug, Clone)]
pub struct LatestBlock<P>(pub P);

#[async_trait]
impl<P: Provider> BlockGasLimit for LatestBlock<P> {
    async fn latest_gas_limit(&self) -> Result<u64, SimulatorError> {
        let block = self
            .0
            .get_block(BlockId::latest())
            .await?
            .ok_or(SimulatorError::GasLimitUnavailable)?;
        Ok(block.header.gas_limit)
    }
}

/// Produces the encoded `execTransaction` call for the simulated transaction.
#[async_trait]
pub trait ExecCallEncoder {
    /// Encodes the call, carrying a pre-validated signature for the execution
    /// owner.
    async fn encode_exec_transaction(&self) -> Result<EncodedCall, SimulatorError>;
}

/// Builds the full Tenderly request for `params`.
///
/// Gas price is fixed at zero so the Safe needs no funds in simulation, and
/// the result is persisted on Tenderly even when the simulated call reverts.
pub async fn build_simulation_payload(
    params: &SimulationParams,
    gas: &impl BlockGasLimit,
    encoder: &impl ExecCallEncoder,
) -> Result<TenderlySimulatePayload, SimulatorError> {
    params.validate()?;

    let gas_limit = match params.gas_limit {
        Some(limit) => limit,
        None => gas.latest_gas_limit().await?,
    };
    let call = encoder.encode_exec_transaction().await?;

    let storage = overrides::build_storage_overrides(params);
    debug!(safe = %params.safe, overrides = storage.len(), "Computed storage overrides");
    let state_objects = (!storage.is_empty()).then(|| {
        BTreeMap::from([(
            params.safe,
            StateObject { balance: None, code: None, storage: Some(storage) },
        )])
    });

    Ok(TenderlySimulatePayload {
        network_id: params.chain_id.to_string(),
        from: params.execution_owner,
        to: call.to,
        input: call.input,
        gas: gas_limit,
        gas_price: "0".to_string(),
        state_objects,
        save: true,
        save_if_fails: true,
    })
}
