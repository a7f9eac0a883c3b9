use alloy_primitives::Address;
use cosmwasm_std::{Binary, Uint256};
use minter_types::{ExecuteMsg, QueryMsg};
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// A write call ready to be signed and broadcast.
#[derive(Clone, Debug, PartialEq)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub msg: ExecuteMsg,
    // Native token attached to the call, in the smallest unit
    pub value: Uint256,
    pub gas_limit: Option<u64>,
}

/// Handle of a broadcast transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PendingTx {
    pub hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    pub hash: String,
    pub block_number: u64,
}

/// An ERC-721 `Transfer` log of the minter contract. Mints come from the zero address.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub token_id: Uint256,
    pub block_number: u64,
    pub tx_hash: String,
}

impl TransferEvent {
    pub fn is_mint(&self) -> bool {
        self.from == Address::ZERO
    }
}

/// Read side of a chain RPC endpoint.
#[allow(async_fn_in_trait)]
pub trait ChainProvider {
    /// Runs a read-only contract call and returns the raw json answer.
    async fn query(&self, contract: &Address, msg: &QueryMsg) -> Result<Binary, TransportError>;

    /// Resolves once the transaction is included, fails if it reverted or was dropped.
    async fn wait_for_confirmation(&self, tx: &PendingTx) -> Result<TxReceipt, TransportError>;

    async fn block_number(&self) -> Result<u64, TransportError>;

    /// `Transfer` logs emitted by `contract` in `from_block..=to_block`.
    async fn transfer_events(
        &self,
        contract: &Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<TransferEvent>, TransportError>;
}

/// A wallet-bound credential able to sign and broadcast transactions.
#[allow(async_fn_in_trait)]
pub trait Signer {
    fn address(&self) -> Address;

    /// Chain the wallet is currently connected to.
    async fn chain_id(&self) -> Result<u64, TransportError>;

    /// Asks the wallet to move to `chain_id`, which may prompt the user.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), TransportError>;

    /// Signs and broadcasts, returning as soon as the node accepted the transaction.
    async fn send_transaction(&self, request: TxRequest) -> Result<PendingTx, TransportError>;
}

/// Signer slot of a read-only handle. Cannot be constructed.
#[derive(Clone, Debug)]
pub enum NoSigner {}

impl Signer for NoSigner {
    fn address(&self) -> Address {
        match *self {}
    }

    async fn chain_id(&self) -> Result<u64, TransportError> {
        match *self {}
    }

    async fn switch_chain(&self, _chain_id: u64) -> Result<(), TransportError> {
        match *self {}
    }

    async fn send_transaction(&self, _request: TxRequest) -> Result<PendingTx, TransportError> {
        match *self {}
    }
}
