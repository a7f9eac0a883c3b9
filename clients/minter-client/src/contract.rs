use alloy_primitives::Address;
use cosmwasm_std::{from_json, Uint128, Uint256};
use minter_types::{ChainConfig, ExecuteMsg, QueryMsg, StateField};
use serde::de::DeserializeOwned;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::transport::{ChainProvider, NoSigner, PendingTx, Signer, TxReceipt, TxRequest};

/// Gas limit attached to `mintWithHype`.
pub const MINT_GAS_LIMIT: u64 = 300_000;

/// The minter contract bound to a chain, either read-only or with a wallet signer.
pub struct ContractHandle<P, S = NoSigner> {
    config: ChainConfig,
    provider: P,
    signer: Option<S>,
}

/// Binds the contract to a public RPC endpoint. Never fails, only the calls can.
pub fn connect_read_only<P: ChainProvider>(config: ChainConfig, provider: P) -> ContractHandle<P> {
    ContractHandle {
        config,
        provider,
        signer: None,
    }
}

/// Binds the contract to a wallet signer, asking the wallet to switch networks first
/// when it is not on `config.chain_id`.
pub async fn connect_with_signer<P: ChainProvider, S: Signer>(
    config: ChainConfig,
    provider: P,
    signer: S,
) -> Result<ContractHandle<P, S>, ClientError> {
    let expected = config.chain_id;
    let current = signer
        .chain_id()
        .await
        .map_err(|err| ClientError::WalletUnavailable {
            reason: err.to_string(),
        })?;

    if current != expected {
        info!(from = current, to = expected, "requesting chain switch");
        if let Err(err) = signer.switch_chain(expected).await {
            warn!(error = %err, "chain switch refused");
            return Err(ClientError::ChainMismatch {
                expected,
                actual: current,
            });
        }
        // The wallet may report success without having moved
        let actual = signer
            .chain_id()
            .await
            .map_err(|err| ClientError::WalletUnavailable {
                reason: err.to_string(),
            })?;
        if actual != expected {
            return Err(ClientError::ChainMismatch { expected, actual });
        }
    }

    debug!(signer = %signer.address(), contract = %config.contract_address, "contract bound to signer");
    Ok(ContractHandle {
        config,
        provider,
        signer: Some(signer),
    })
}

impl<P: ChainProvider, S: Signer> ContractHandle<P, S> {
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn signer(&self) -> Option<&S> {
        self.signer.as_ref()
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|signer| signer.address())
    }

    pub fn is_read_only(&self) -> bool {
        self.signer.is_none()
    }

    async fn read<T: DeserializeOwned>(
        &self,
        field: StateField,
        msg: QueryMsg,
    ) -> Result<T, ClientError> {
        debug!(call = msg.signature(), "contract read");
        let answer = self
            .provider
            .query(&self.config.contract_address, &msg)
            .await
            .map_err(|err| ClientError::ReadFailure {
                field,
                reason: err.to_string(),
            })?;
        from_json(&answer).map_err(|err| ClientError::ReadFailure {
            field,
            reason: err.to_string(),
        })
    }

    async fn read_count(&self, field: StateField, msg: QueryMsg) -> Result<u64, ClientError> {
        let value: Uint256 = self.read(field, msg).await?;
        uint_to_u64(value).ok_or_else(|| ClientError::ReadFailure {
            field,
            reason: format!("value {} out of range", value),
        })
    }

    pub async fn total_supply(&self) -> Result<u64, ClientError> {
        self.read_count(StateField::TotalSupply, QueryMsg::TotalSupply {})
            .await
    }

    pub async fn max_supply(&self) -> Result<u64, ClientError> {
        self.read_count(StateField::MaxSupply, QueryMsg::MaxSupply {})
            .await
    }

    /// Mint price per token in the smallest unit.
    pub async fn unit_price(&self) -> Result<Uint256, ClientError> {
        self.read(StateField::UnitPrice, QueryMsg::HypeCost {}).await
    }

    pub async fn max_per_transaction(&self) -> Result<u32, ClientError> {
        let field = StateField::MaxPerTransaction;
        let value = self.read_count(field, QueryMsg::MaxMintAmount {}).await?;
        match u32::try_from(value) {
            Ok(value) if value >= 1 => Ok(value),
            _ => Err(ClientError::ReadFailure {
                field,
                reason: format!("max mint amount {} is not usable", value),
            }),
        }
    }

    pub async fn owner(&self) -> Result<Address, ClientError> {
        let owner: String = self.read(StateField::Owner, QueryMsg::Owner {}).await?;
        Address::from_str(owner.trim()).map_err(|_| ClientError::ReadFailure {
            field: StateField::Owner,
            reason: format!("invalid owner address {}", owner),
        })
    }

    async fn send(
        &self,
        msg: ExecuteMsg,
        value: Uint256,
        gas_limit: Option<u64>,
    ) -> Result<PendingTx, ClientError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(ClientError::WalletNotConnected {})?;
        let call = msg.signature();
        let request = TxRequest {
            from: signer.address(),
            to: self.config.contract_address,
            msg,
            value,
            gas_limit,
        };
        let pending = signer
            .send_transaction(request)
            .await
            .map_err(|err| ClientError::SubmissionFailure {
                reason: err.to_string(),
            })?;
        info!(call, tx = %pending.hash, value = %value, "transaction broadcast");
        Ok(pending)
    }

    /// `mintWithHype(quantity)` paying `value`.
    pub async fn mint(&self, quantity: u32, value: Uint256) -> Result<PendingTx, ClientError> {
        self.send(
            ExecuteMsg::MintWithHype { quantity },
            value,
            Some(MINT_GAS_LIMIT),
        )
        .await
    }

    pub async fn set_unit_price(&self, value: Uint256) -> Result<PendingTx, ClientError> {
        self.send(ExecuteMsg::SetHypeCost { cost: value }, Uint256::zero(), None)
            .await
    }

    pub async fn set_max_per_transaction(&self, amount: u32) -> Result<PendingTx, ClientError> {
        self.send(
            ExecuteMsg::SetMaxMintAmount { amount },
            Uint256::zero(),
            None,
        )
        .await
    }

    /// Waits for inclusion of a transaction broadcast through this handle.
    pub async fn confirm(&self, tx: &PendingTx) -> Result<TxReceipt, ClientError> {
        let receipt = self
            .provider
            .wait_for_confirmation(tx)
            .await
            .map_err(|err| ClientError::ConfirmationFailure {
                tx_hash: tx.hash.clone(),
                reason: err.to_string(),
            })?;
        info!(tx = %receipt.hash, block = receipt.block_number, "transaction confirmed");
        Ok(receipt)
    }
}

fn uint_to_u64(value: Uint256) -> Option<u64> {
    let value = Uint128::try_from(value).ok()?;
    u64::try_from(value.u128()).ok()
}
