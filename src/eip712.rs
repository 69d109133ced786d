//! EIP-712 helpers for Safe transaction hashing.

use crate::types::SafeTransactionData;
use alloy::{
    primitives::{Address, B256, ChainId, U256},
    sol_types::{Eip712Domain, SolStruct},
};

/// Contract versions whose EIP-712 domain includes the chain id.
///
/// Contracts older than 1.3.0 hash only the verifying contract into the
/// domain separator. Matching is a plain substring check against the version
/// tag, no numeric parsing.
const CHAIN_ID_DOMAIN_VERSIONS: [&str; 2] = ["1.3.0", "1.3.1"];

/// Whether the given contract version hashes the chain id into its domain.
pub fn domain_includes_chain_id(version: &str) -> bool {
    CHAIN_ID_DOMAIN_VERSIONS.iter().any(|tag| version.contains(tag))
}

/// The EIP-712 domain of a Safe at `safe` running `version`.
pub fn safe_domain(safe: Address, version: &str, chain_id: ChainId) -> Eip712Domain {
    let chain_id = domain_includes_chain_id(version).then(|| U256::from(chain_id));
    Eip712Domain::new(None, None, chain_id, Some(safe), None)
}

/// Computes the transaction hash an owner signs for the given Safe
/// transaction.
pub fn safe_tx_hash(
    safe: Address,
    version: &str,
    chain_id: ChainId,
    tx: &SafeTransactionData,
) -> B256 {
    tx.as_eip712().eip712_signing_hash(&safe_domain(safe, version, chain_id))
}
