use std::cell::{Cell, RefCell};

use alloy_primitives::Address;
use tracing::{debug, warn};

use crate::contract::ContractHandle;
use crate::transport::{ChainProvider, Signer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnershipStatus {
    pub connected_address: Address,
    // None when the owner lookup failed
    pub contract_owner: Option<Address>,
    pub is_owner: bool,
}

/// Compares `connected_address` with the contract owner. Addresses are compared as
/// 20-byte values, so hex case does not matter. A failed lookup is never an owner.
pub async fn check_ownership<P: ChainProvider, S: Signer>(
    handle: &ContractHandle<P, S>,
    connected_address: Address,
) -> OwnershipStatus {
    match handle.owner().await {
        Ok(owner) => {
            let is_owner = owner == connected_address;
            debug!(connected = %connected_address, owner = %owner, is_owner, "ownership checked");
            OwnershipStatus {
                connected_address,
                contract_owner: Some(owner),
                is_owner,
            }
        }
        Err(err) => {
            warn!(error = %err, "owner lookup failed, denying admin access");
            OwnershipStatus {
                connected_address,
                contract_owner: None,
                is_owner: false,
            }
        }
    }
}

/// What the admin panel may render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminAccess {
    Disconnected,
    // Lookup in progress, render a loading state
    Checking,
    NotAuthorized,
    Authorized(OwnershipStatus),
}

#[derive(Debug)]
pub struct OwnershipGate {
    access: RefCell<AdminAccess>,
    // Bumped on every check and disconnect, a lookup only commits if still current
    generation: Cell<u64>,
}

impl Default for OwnershipGate {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnershipGate {
    pub fn new() -> Self {
        OwnershipGate {
            access: RefCell::new(AdminAccess::Disconnected),
            generation: Cell::new(0),
        }
    }

    pub fn access(&self) -> AdminAccess {
        self.access.borrow().clone()
    }

    pub fn controls_visible(&self) -> bool {
        matches!(*self.access.borrow(), AdminAccess::Authorized(_))
    }

    pub fn disconnect(&self) {
        self.next_generation();
        *self.access.borrow_mut() = AdminAccess::Disconnected;
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        generation
    }

    /// Re-evaluates access for the handle's signer. Run again whenever the signer
    /// or the contract handle changes. A lookup overtaken by a newer check or a
    /// disconnect leaves the newer state in place.
    pub async fn check<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
    ) -> AdminAccess {
        let Some(connected) = handle.signer_address() else {
            self.disconnect();
            return AdminAccess::Disconnected;
        };

        let generation = self.next_generation();
        *self.access.borrow_mut() = AdminAccess::Checking;
        let status = check_ownership(handle, connected).await;
        if self.generation.get() != generation {
            debug!(connected = %connected, "signer changed during owner lookup, dropping result");
            return self.access();
        }
        let access = if status.is_owner {
            AdminAccess::Authorized(status)
        } else {
            AdminAccess::NotAuthorized
        };
        *self.access.borrow_mut() = access.clone();
        access
    }
}
