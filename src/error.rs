//! Simulator error types.

use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

/// The overarching error type returned when building or submitting a
/// simulation.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The gas-limit provider returned no usable block.
    ///
    /// No default is substituted; without a gas limit the simulation cannot
    /// be constructed.
    #[error("could not determine block gas limit")]
    GasLimitUnavailable,
    /// The call encoder does not know the Safe contract version.
    #[error("unsupported Safe contract version {0}")]
    UnsupportedVersion(String),
    /// An error occurred during ABI encoding/decoding.
    #[error(transparent)]
    Abi(#[from] alloy::sol_types::Error),
    /// The simulation service returned a non-success response.
    #[error("{status} - {status_text}: {message}")]
    SimulationRequest {
        /// HTTP status code returned by the service.
        status: u16,
        /// Canonical reason phrase for the status code.
        status_text: String,
        /// Error message embedded in the service response body.
        message: String,
    },
    /// An error occurred talking to an external HTTP service.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// An error occurred talking to RPC.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The simulation parameters violate a precondition.
    #[error("invalid simulation parameters: {0}")]
    InvalidParams(String),
    /// An internal error occurred.
    #[error(transparent)]
    Internal(#[from] eyre::Error),
}
