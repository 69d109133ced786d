//! # Safe Simulator
//!
//! Builds and submits Tenderly simulation requests for Safe multi-signature
//! wallets. Storage of the Safe is overridden on the simulator side so that
//! under-signed or queued transactions can still be simulated as if they were
//! executable: the signature threshold is forced down to 1 when not enough
//! signatures are present, and the nonce is advanced when the transaction sits
//! behind others in the queue.

pub mod config;
pub mod constants;
pub mod eip712;
pub mod error;
pub mod gateway;
pub mod overrides;
pub mod payload;
pub mod tenderly;
pub mod types;
