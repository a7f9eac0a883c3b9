use std::collections::HashMap;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contract::ContractHandle;
use crate::error::ClientError;
use crate::transport::{ChainProvider, Signer, TransferEvent};

/// How far back the explorer looks for `Transfer` logs.
pub const EXPLORER_LOOKBACK_BLOCKS: u64 = 1_000;
pub const RECENT_MINTS_LIMIT: usize = 10;

/// Holder and mint activity derived from recent `Transfer` logs.
///
/// Only the last [`EXPLORER_LOOKBACK_BLOCKS`] blocks are scanned, so holders and
/// mints older than `from_block` are not counted. `windowed` is set whenever that
/// cut-off hid part of the history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExplorerStats {
    pub from_block: u64,
    pub latest_block: u64,
    pub unique_holders: usize,
    pub mints_in_window: usize,
    // Newest first
    pub recent_mints: Vec<TransferEvent>,
    pub windowed: bool,
}

pub fn summarize(events: &[TransferEvent], from_block: u64, latest_block: u64) -> ExplorerStats {
    let mut balances: HashMap<Address, i64> = HashMap::new();
    for event in events {
        if event.from != Address::ZERO {
            *balances.entry(event.from).or_default() -= 1;
        }
        if event.to != Address::ZERO {
            *balances.entry(event.to).or_default() += 1;
        }
    }
    // Tokens received before the window show up as negative balances and are ignored
    let unique_holders = balances.values().filter(|balance| **balance > 0).count();

    let mut mints: Vec<TransferEvent> = events.iter().filter(|e| e.is_mint()).cloned().collect();
    let mints_in_window = mints.len();
    mints.sort_by(|a, b| {
        b.block_number
            .cmp(&a.block_number)
            .then(b.token_id.cmp(&a.token_id))
    });
    mints.truncate(RECENT_MINTS_LIMIT);

    ExplorerStats {
        from_block,
        latest_block,
        unique_holders,
        mints_in_window,
        recent_mints: mints,
        windowed: from_block > 0,
    }
}

/// Reads the latest block and summarizes the contract's recent transfers.
pub async fn scan<P: ChainProvider, S: Signer>(
    handle: &ContractHandle<P, S>,
) -> Result<ExplorerStats, ClientError> {
    let provider = handle.provider();
    let latest_block = provider
        .block_number()
        .await
        .map_err(|err| ClientError::ScanFailure {
            reason: err.to_string(),
        })?;
    let from_block = latest_block.saturating_sub(EXPLORER_LOOKBACK_BLOCKS);
    let events = provider
        .transfer_events(&handle.config().contract_address, from_block, latest_block)
        .await
        .map_err(|err| ClientError::ScanFailure {
            reason: err.to_string(),
        })?;
    debug!(from_block, latest_block, events = events.len(), "transfer logs scanned");
    Ok(summarize(&events, from_block, latest_block))
}
