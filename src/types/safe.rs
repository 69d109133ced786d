//! Safe contract bindings, transaction template and signature encoding.

use crate::{
    error::SimulatorError,
    payload::{EncodedCall, ExecCallEncoder},
};
use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::SolCall,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

sol! {
    /// The EIP-712 struct hashed when a Safe transaction is signed.
    #[derive(Debug)]
    struct SafeTx {
        address to;
        uint256 value;
        bytes data;
        uint8 operation;
        uint256 safeTxGas;
        uint256 baseGas;
        uint256 gasPrice;
        address gasToken;
        address refundReceiver;
        uint256 nonce;
    }

    /// The Safe execution entrypoint.
    interface ISafe {
        function execTransaction(
            address to,
            uint256 value,
            bytes calldata data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            bytes memory signatures
        ) external payable returns (bool success);
    }
}

/// Template of the Safe transaction being simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTransactionData {
    /// Recipient of the inner call.
    pub to: Address,
    /// Value transferred with the inner call, in wei.
    pub value: U256,
    /// Calldata of the inner call.
    pub data: Bytes,
    /// 0 for CALL, 1 for DELEGATECALL.
    pub operation: u8,
    /// Gas forwarded to the inner call. 0 forwards all available gas.
    pub safe_tx_gas: U256,
    /// Gas refunded independently of the inner call.
    pub base_gas: U256,
    /// Gas price used for the refund calculation.
    pub gas_price: U256,
    /// Token used for the refund, zero address for ether.
    pub gas_token: Address,
    /// Receiver of the refund, zero address for tx.origin.
    pub refund_receiver: Address,
    /// Safe nonce the transaction is queued at.
    pub nonce: u64,
}

impl SafeTransactionData {
    /// A plain transfer with every gas and refund field zeroed.
    pub fn transfer(to: Address, value: U256, data: Bytes, nonce: u64) -> Self {
        Self {
            to,
            value,
            data,
            operation: 0,
            safe_tx_gas: U256::ZERO,
            base_gas: U256::ZERO,
            gas_price: U256::ZERO,
            gas_token: Address::ZERO,
            refund_receiver: Address::ZERO,
            nonce,
        }
    }

    /// The EIP-712 payload for this transaction.
    pub fn as_eip712(&self) -> SafeTx {
        SafeTx {
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            operation: self.operation,
            safeTxGas: self.safe_tx_gas,
            baseGas: self.base_gas,
            gasPrice: self.gas_price,
            gasToken: self.gas_token,
            refundReceiver: self.refund_receiver,
            nonce: U256::from(self.nonce),
        }
    }
}

/// Encodes the pre-validated signature for `owner`.
///
/// The Safe contracts treat `v == 1` as a signature that was pre-approved by
/// the owner packed into `r`; `s` is unused. No ECDSA signature is involved.
pub fn pre_validated_signature(owner: Address) -> Bytes {
    let mut signature = [0u8; 65];
    signature[12..32].copy_from_slice(owner.as_slice());
    signature[64] = 1;
    Bytes::from(signature.to_vec())
}

/// Contract versions the encoder knows the `execTransaction` ABI for.
const KNOWN_VERSIONS: [&str; 6] = ["1.0.0", "1.1.1", "1.2.0", "1.3.0", "1.3.1", "1.4.1"];

/// Encodes `execTransaction` calls carrying a single pre-validated signature
/// for the execution owner.
#[derive(Debug, Clone)]
pub struct ExecTransactionEncoder {
    safe: Address,
    version: String,
    tx: SafeTransactionData,
    execution_owner: Address,
}

impl ExecTransactionEncoder {
    /// Creates an encoder for a Safe running `version`.
    pub fn new(
        safe: Address,
        version: String,
        tx: SafeTransactionData,
        execution_owner: Address,
    ) -> Self {
        Self { safe, version, tx, execution_owner }
    }

    fn encode(&self) -> Result<EncodedCall, SimulatorError> {
        if !KNOWN_VERSIONS.iter().any(|known| self.version.contains(known)) {
            return Err(SimulatorError::UnsupportedVersion(self.version.clone()));
        }

        let call = ISafe::execTransactionCall {
            to: self.tx.to,
            value: self.tx.value,
            data: self.tx.data.clone(),
            operation: self.tx.operation,
            safeTxGas: self.tx.safe_tx_gas,
            baseGas: self.tx.base_gas,
            gasPrice: self.tx.gas_price,
            gasToken: self.tx.gas_token,
            refundReceiver: self.tx.refund_receiver,
            signatures: pre_validated_signature(self.execution_owner),
        };

        Ok(EncodedCall { to: self.safe, input: call.abi_encode().into() })
    }
}

#[async_trait]
impl ExecCallEncoder for ExecTransactionEncoder {
    async fn encode_exec_transaction(&self) -> Result<EncodedCall, SimulatorError> {
        self.encode()
    }
}
