use std::env;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x7d5C48A82E13168d84498548fe0a2282b9C1F16B";
pub const DEFAULT_CHAIN_ID: u64 = 999;
pub const DEFAULT_RPC_URL: &str = "https://rpc.hyperliquid.xyz/evm";

pub const CONTRACT_ADDRESS_VAR: &str = "CONTRACT_ADDRESS";
pub const CHAIN_ID_VAR: &str = "CHAIN_ID";
pub const RPC_URL_VAR: &str = "RPC_URL";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigurationError {
    #[error("Invalid contract address: {address}")]
    InvalidContractAddress { address: String },
    #[error("Invalid chain id: {chain_id}")]
    InvalidChainId { chain_id: String },
    #[error("Invalid rpc url: {rpc_url}")]
    InvalidRpcUrl { rpc_url: String },
}

/// Where the minter contract lives. Built once at startup and passed to every
/// component that talks to the chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    pub contract_address: Address,
    pub chain_id: u64,
    pub rpc_url: String,
}

impl ChainConfig {
    pub fn new(
        contract_address: Address,
        chain_id: u64,
        rpc_url: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let config = ChainConfig {
            contract_address,
            chain_id,
            rpc_url: rpc_url.into(),
        };
        config.check_integrity()?;
        Ok(config)
    }

    /// Reads `CONTRACT_ADDRESS`, `CHAIN_ID` and `RPC_URL`, each falling back to the
    /// deployed defaults when unset.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup(CONTRACT_ADDRESS_VAR).unwrap_or(DEFAULT_CONTRACT_ADDRESS.to_string());
        let contract_address = Address::from_str(address.trim())
            .map_err(|_| ConfigurationError::InvalidContractAddress { address })?;

        let chain_id = match lookup(CHAIN_ID_VAR) {
            Some(chain_id) => chain_id
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigurationError::InvalidChainId { chain_id })?,
            None => DEFAULT_CHAIN_ID,
        };
        let rpc_url = lookup(RPC_URL_VAR).unwrap_or(DEFAULT_RPC_URL.to_string());

        Self::new(contract_address, chain_id, rpc_url.trim())
    }

    pub fn check_integrity(&self) -> Result<(), ConfigurationError> {
        if self.contract_address == Address::ZERO {
            return Err(ConfigurationError::InvalidContractAddress {
                address: self.contract_address.to_string(),
            });
        }
        if self.chain_id == 0 {
            return Err(ConfigurationError::InvalidChainId {
                chain_id: self.chain_id.to_string(),
            });
        }
        let has_scheme =
            self.rpc_url.starts_with("https://") || self.rpc_url.starts_with("http://");
        if !has_scheme || self.rpc_url.contains(char::is_whitespace) {
            return Err(ConfigurationError::InvalidRpcUrl {
                rpc_url: self.rpc_url.clone(),
            });
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            contract_address: Address::from_str(DEFAULT_CONTRACT_ADDRESS)
                .unwrap_or(Address::ZERO),
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url: DEFAULT_RPC_URL.to_string(),
        }
    }
}
