//! Simulator constants.

use alloy::primitives::B256;

/// Storage slot holding the Safe's signature threshold.
///
/// The threshold occupies the full 32 byte word at slot 4. See the Safe
/// storage layout:
/// <https://github.com/safe-global/safe-smart-account/blob/main/contracts/libraries/SafeStorage.sol>
pub const THRESHOLD_STORAGE_SLOT: B256 = B256::with_last_byte(4);

/// Value the threshold slot is overridden with.
///
/// A threshold of 1 lets a single pre-validated signature pass the signature
/// check while still exercising transaction guards and execution logic.
pub const THRESHOLD_OVERRIDE: B256 = B256::with_last_byte(1);

/// Storage slot holding the Safe's transaction nonce, a full 32 byte word at
/// slot 5.
pub const NONCE_STORAGE_SLOT: B256 = B256::with_last_byte(5);

/// The public Tenderly simulate endpoint.
///
/// Project-scoped endpoints require an access key, see
/// <https://docs.tenderly.co/reference/api#/operations/simulateTransaction>
pub const TENDERLY_SIMULATE_ENDPOINT_URL: &str = "https://api.tenderly.co/api/v1/simulate";
