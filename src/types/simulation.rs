//! Simulation request parameters and Tenderly wire types.

use crate::error::SimulatorError;
use alloy::primitives::{Address, B256, Bytes, ChainId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Input for a single Safe transaction simulation.
///
/// Constructed fresh per request and never mutated afterwards; independent
/// requests share no state and may be simulated concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationParams {
    /// The Safe being simulated.
    pub safe: Address,
    /// Chain the Safe is deployed on.
    pub chain_id: ChainId,
    /// Signature threshold currently configured on the Safe.
    pub threshold: u32,
    /// Current on-chain nonce of the Safe.
    pub safe_nonce: u64,
    /// Owner the transaction is executed as.
    ///
    /// A pre-validated signature is attached for this owner, so it counts
    /// towards the threshold even when it has not signed yet.
    pub execution_owner: Address,
    /// Nonce of the transaction being simulated.
    pub tx_nonce: u64,
    /// Owners that have already signed the transaction.
    pub signers: BTreeSet<Address>,
    /// Gas limit override. When unset, the latest block gas limit is used.
    pub gas_limit: Option<u64>,
}

impl SimulationParams {
    /// Fails fast on parameters that violate the calculator's preconditions.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.threshold == 0 {
            return Err(SimulatorError::InvalidParams("threshold must be at least 1".into()));
        }
        if self.safe.is_zero() {
            return Err(SimulatorError::InvalidParams("safe address must not be zero".into()));
        }
        if self.execution_owner.is_zero() {
            return Err(SimulatorError::InvalidParams(
                "execution owner address must not be zero".into(),
            ));
        }
        Ok(())
    }
}

/// Account-level state override passed to Tenderly.
///
/// Only the fields that are set are sent; overriding storage leaves balance
/// and code untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateObject {
    /// Native balance override, in wei.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    /// Bytecode override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Bytes>,
    /// Storage slot overrides, 32 byte slot keys to 32 byte values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<BTreeMap<B256, B256>>,
}

/// Request body for the Tenderly simulate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderlySimulatePayload {
    /// Network the simulation runs on, as a decimal chain id string.
    pub network_id: String,
    /// Sender of the simulated transaction.
    pub from: Address,
    /// The contract the call is made against.
    pub to: Address,
    /// ABI-encoded calldata.
    pub input: Bytes,
    /// Gas limit for the simulated transaction.
    pub gas: u64,
    /// Gas price, fixed at "0" so the Safe needs no funds for gas.
    pub gas_price: String,
    /// Per-account state overrides, omitted when no overrides are needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_objects: Option<BTreeMap<Address, StateObject>>,
    /// Persist the simulation on Tenderly.
    pub save: bool,
    /// Persist the simulation even when the simulated call reverts.
    pub save_if_fails: bool,
}

/// Decoded subset of the Tenderly simulation response.
///
/// The full response carries call traces and decoded logs; only the fields
/// needed to report the outcome are decoded, everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TenderlySimulation {
    /// Metadata of the stored simulation.
    #[serde(default)]
    pub simulation: Option<SimulationOutcome>,
    /// The simulated transaction.
    #[serde(default)]
    pub transaction: Option<TransactionOutcome>,
}

/// Metadata of a stored simulation.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationOutcome {
    /// Identifier of the simulation on Tenderly.
    pub id: Option<String>,
    /// Whether the simulated transaction succeeded.
    pub status: Option<bool>,
}

/// Execution outcome of the simulated transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionOutcome {
    /// Whether execution succeeded.
    pub status: Option<bool>,
    /// Gas consumed by the execution.
    pub gas_used: Option<u64>,
}
