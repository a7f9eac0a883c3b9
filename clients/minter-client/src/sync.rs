use std::cell::{Cell, RefCell};

use cosmwasm_std::Uint256;
use minter_types::amount::{format_native, total_for};
use minter_types::MintState;
use tracing::{debug, warn};

use crate::contract::ContractHandle;
use crate::error::ClientError;
use crate::transport::{ChainProvider, Signer};

/// Results of one batch of state reads, each field failing on its own.
#[derive(Debug)]
pub struct Snapshot {
    pub total_supply: Result<u64, ClientError>,
    pub max_supply: Result<u64, ClientError>,
    pub unit_price: Result<Uint256, ClientError>,
    pub max_per_transaction: Result<u32, ClientError>,
}

/// Keeps a best-effort [`MintState`] in line with the contract.
///
/// Every field falls back to its last known good value when a read fails, which
/// before the first successful read is the contract's deployed default. After a
/// confirmed mint the total supply is never allowed to drop below what that mint
/// produced, so a stale read batch that was in flight cannot undo it.
#[derive(Debug, Default)]
pub struct ViewStateSynchronizer {
    state: RefCell<MintState>,
    confirmed_floor: Cell<u64>,
    loaded: Cell<bool>,
}

impl ViewStateSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MintState {
        self.state.borrow().clone()
    }

    /// False until the first read batch has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Issues the four reads concurrently.
    pub async fn fetch<P: ChainProvider, S: Signer>(handle: &ContractHandle<P, S>) -> Snapshot {
        let (total_supply, max_supply, unit_price, max_per_transaction) = tokio::join!(
            handle.total_supply(),
            handle.max_supply(),
            handle.unit_price(),
            handle.max_per_transaction(),
        );
        Snapshot {
            total_supply,
            max_supply,
            unit_price,
            max_per_transaction,
        }
    }

    /// Merges a snapshot into the current state.
    pub fn apply(&self, snapshot: Snapshot) -> MintState {
        let current = self.state();
        let total_supply =
            or_last_known(snapshot.total_supply, current.total_supply).max(self.confirmed_floor.get());
        let next = MintState::new(
            total_supply,
            or_last_known(snapshot.max_supply, current.max_supply),
            or_last_known(snapshot.unit_price, current.unit_price),
            or_last_known(snapshot.max_per_transaction, current.max_per_transaction),
        );
        debug!(
            total_supply = next.total_supply,
            max_supply = next.max_supply,
            unit_price = %next.unit_price,
            max_per_transaction = next.max_per_transaction,
            "mint state refreshed"
        );
        *self.state.borrow_mut() = next.clone();
        self.loaded.set(true);
        next
    }

    pub async fn refresh<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
    ) -> MintState {
        let snapshot = Self::fetch(handle).await;
        self.apply(snapshot)
    }

    /// Counts a confirmed mint of `quantity` tokens issued when the supply was
    /// `supply_before`. The supply is raised to at least `supply_before + quantity`,
    /// never bumped again if a read already included the mint.
    pub fn record_confirmed_mint(&self, supply_before: u64, quantity: u32) -> MintState {
        let floor = self
            .confirmed_floor
            .get()
            .max(supply_before.saturating_add(u64::from(quantity)));
        self.confirmed_floor.set(floor);

        let mut state = self.state.borrow_mut();
        state.total_supply = state.total_supply.max(floor);
        state.max_supply = state.max_supply.max(state.total_supply);
        state.clone()
    }

    /// Re-reads the total supply, used right after a mint confirmed.
    pub async fn refresh_total_supply<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
    ) -> MintState {
        let read = handle.total_supply().await;
        let mut state = self.state.borrow_mut();
        let total_supply = or_last_known(read, state.total_supply).max(self.confirmed_floor.get());
        state.total_supply = total_supply;
        state.max_supply = state.max_supply.max(total_supply);
        state.clone()
    }

    pub async fn refresh_unit_price<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
    ) -> MintState {
        let read = handle.unit_price().await;
        let mut state = self.state.borrow_mut();
        state.unit_price = or_last_known(read, state.unit_price);
        state.clone()
    }

    pub async fn refresh_max_per_transaction<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
    ) -> MintState {
        let read = handle.max_per_transaction().await;
        let mut state = self.state.borrow_mut();
        state.max_per_transaction = or_last_known(read, state.max_per_transaction);
        state.clone()
    }
}

fn or_last_known<T: std::fmt::Display + Copy>(read: Result<T, ClientError>, last_known: T) -> T {
    match read {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, fallback = %last_known, "state read failed, keeping last known value");
            last_known
        }
    }
}

/// `unit_price * quantity` with the quantity clamped to `[1, max_per_transaction]`.
pub fn total_cost(
    unit_price: Uint256,
    quantity: u32,
    max_per_transaction: u32,
) -> Result<Uint256, ClientError> {
    let quantity = quantity.clamp(1, max_per_transaction.max(1));
    total_for(unit_price, quantity).map_err(|_| ClientError::Overflow {})
}

/// Total cost as shown next to the mint button.
pub fn total_cost_display(state: &MintState, quantity: u32) -> String {
    match total_cost(state.unit_price, quantity, state.max_per_transaction) {
        Ok(total) => format_native(total),
        Err(_) => "-".to_string(),
    }
}
