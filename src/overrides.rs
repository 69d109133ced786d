//! Storage override derivation for Safe simulations.
//!
//! The calculator is pure and synchronous: given the wallet's signature and
//! nonce state it decides which storage slots of the Safe must be patched for
//! the simulated `execTransaction` call to pass the contract's checks.

use crate::{
    constants::{NONCE_STORAGE_SLOT, THRESHOLD_OVERRIDE, THRESHOLD_STORAGE_SLOT},
    types::SimulationParams,
};
use alloy::primitives::{B256, U256};
use std::collections::BTreeMap;

/// Returns true when the collected signatures plus the execution owner's
/// pre-validated signature (if missing) do not reach the Safe's threshold.
///
/// The owner's signature is not counted twice when it is already among the
/// collected signers.
pub fn needs_threshold_override(params: &SimulationParams) -> bool {
    let has_owner_sig = params.signers.contains(&params.execution_owner);
    let effective_sigs = params.signers.len() as u32 + if has_owner_sig { 0 } else { 1 };
    params.threshold > effective_sigs
}

/// Returns the nonce to force onto the Safe when the simulated transaction
/// sits behind others in the queue.
///
/// A transaction whose nonce is not ahead of the Safe's needs no override;
/// detecting stale transactions is left to the caller.
pub fn nonce_override(params: &SimulationParams) -> Option<u64> {
    (params.tx_nonce > params.safe_nonce).then_some(params.tx_nonce)
}

/// The storage slots to patch for the simulation, as full 32 byte big-endian
/// words. An empty map means the transaction is executable as-is.
pub fn build_storage_overrides(params: &SimulationParams) -> BTreeMap<B256, B256> {
    let mut storage = BTreeMap::new();
    if needs_threshold_override(params) {
        storage.insert(THRESHOLD_STORAGE_SLOT, THRESHOLD_OVERRIDE);
    }
    if let Some(nonce) = nonce_override(params) {
        storage.insert(NONCE_STORAGE_SLOT, B256::from(U256::from(nonce)));
    }
    storage
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, address};
    use std::collections::BTreeSet;

    const OWNER_X: Address = address!("9C9574c538D982B44555Aa7382FFb8c911c1bE1b");
    const OWNER_Y: Address = address!("000000000000000000000000000000000000beef");

    fn params(
        threshold: u32,
        signers: &[Address],
        execution_owner: Address,
        safe_nonce: u64,
        tx_nonce: u64,
    ) -> SimulationParams {
        SimulationParams {
            safe: address!("a08E15EEEAE9C486b190DC78C91E63C705867665"),
            chain_id: 11155111,
            threshold,
            safe_nonce,
            execution_owner,
            tx_nonce,
            signers: signers.iter().copied().collect::<BTreeSet<_>>(),
            gas_limit: None,
        }
    }

    #[test]
    fn owner_signature_is_not_double_counted() {
        // Owner already signed: one effective signature, threshold 2 not met.
        assert!(needs_threshold_override(&params(2, &[OWNER_X], OWNER_X, 0, 0)));
        // Owner has not signed yet: its pre-validated signature counts.
        assert!(!needs_threshold_override(&params(2, &[OWNER_X], OWNER_Y, 0, 0)));
    }

    #[test]
    fn threshold_met_needs_no_override() {
        assert!(!needs_threshold_override(&params(1, &[OWNER_X], OWNER_X, 0, 0)));
        assert!(!needs_threshold_override(&params(2, &[OWNER_X, OWNER_Y], OWNER_X, 0, 0)));
    }

    #[test]
    fn nonce_override_only_when_transaction_is_queued() {
        assert_eq!(nonce_override(&params(1, &[OWNER_X], OWNER_X, 5, 5)), None);
        assert_eq!(nonce_override(&params(1, &[OWNER_X], OWNER_X, 5, 4)), None);
        assert_eq!(nonce_override(&params(1, &[OWNER_X], OWNER_X, 2, 7)), Some(7));
    }

    #[test]
    fn executable_transaction_needs_no_overrides() {
        let overrides = build_storage_overrides(&params(1, &[OWNER_X], OWNER_X, 5, 5));
        assert!(overrides.is_empty());
    }

    #[test]
    fn under_signed_transaction_overrides_threshold_only() {
        // No signatures collected; the owner's pre-validated signature alone
        // does not reach a threshold of 2.
        let overrides = build_storage_overrides(&params(2, &[], OWNER_Y, 3, 3));
        assert_eq!(
            overrides,
            BTreeMap::from([(THRESHOLD_STORAGE_SLOT, THRESHOLD_OVERRIDE)])
        );
    }

    #[test]
    fn queued_transaction_overrides_nonce_only() {
        let overrides = build_storage_overrides(&params(1, &[OWNER_X], OWNER_X, 2, 7));
        assert_eq!(
            overrides,
            BTreeMap::from([(NONCE_STORAGE_SLOT, B256::from(U256::from(7u64)))])
        );
    }

    #[test]
    fn overrides_stay_within_known_slots_and_width() {
        let overrides = build_storage_overrides(&params(3, &[], OWNER_X, 0, 9));
        assert_eq!(overrides.len(), 2);
        for (slot, value) in &overrides {
            assert!([THRESHOLD_STORAGE_SLOT, NONCE_STORAGE_SLOT].contains(slot));
            assert_eq!(slot.len(), 32);
            assert_eq!(value.len(), 32);
            // hex encoding is zero-padded to 64 characters
            assert_eq!(format!("{value}").len(), 2 + 64);
        }
    }

    #[test]
    fn calculator_is_pure() {
        let p = params(2, &[OWNER_X], OWNER_X, 1, 4);
        assert_eq!(build_storage_overrides(&p), build_storage_overrides(&p));
    }
}
