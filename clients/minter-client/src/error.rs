use minter_types::StateField;
use thiserror::Error;

/// Failures reported by the RPC endpoint or the wallet.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum TransportError {
    #[error("request rejected by wallet: {reason}")]
    Rejected { reason: String },

    #[error("unsupported by wallet: {reason}")]
    Unsupported { reason: String },

    #[error("execution reverted: {reason}")]
    Reverted { reason: String },

    #[error("rpc error: {message}")]
    Rpc { message: String },
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ClientError {
    #[error("Wrong network: expected chain {expected}, wallet is on chain {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("Failed to read {field}: {reason}")]
    ReadFailure { field: StateField, reason: String },

    #[error("Transaction was not submitted: {reason}")]
    SubmissionFailure { reason: String },

    #[error("Transaction {tx_hash} failed: {reason}")]
    ConfirmationFailure { tx_hash: String, reason: String },

    #[error("Please mint between 1 and {max} NFTs")]
    InvalidQuantity { quantity: u32, max: u32 },

    #[error("Please enter a valid mint price")]
    InvalidPrice { input: String },

    #[error("Please enter a valid max mint amount")]
    InvalidMaxMint { input: String },

    #[error("Please connect your wallet")]
    WalletNotConnected {},

    #[error("Failed to connect wallet: {reason}")]
    WalletUnavailable { reason: String },

    #[error("Explorer scan failed: {reason}")]
    ScanFailure { reason: String },

    #[error("Overflow error")]
    Overflow {},
}
