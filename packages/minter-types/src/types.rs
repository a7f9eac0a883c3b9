use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, Uint256};

use crate::amount::format_native;

pub const DEFAULT_TOTAL_SUPPLY: u64 = 0;
pub const DEFAULT_MAX_SUPPLY: u64 = 10_000;
pub const DEFAULT_UNIT_PRICE: Uint256 = Uint256::zero();
pub const DEFAULT_MAX_PER_TRANSACTION: u32 = 20;

/// On-chain values the client reads, used to name the field a read failed on.
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum StateField {
    TotalSupply,
    MaxSupply,
    UnitPrice,
    MaxPerTransaction,
    Owner,
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateField::TotalSupply => "totalSupply",
            StateField::MaxSupply => "maxSupply",
            StateField::UnitPrice => "hypeCost",
            StateField::MaxPerTransaction => "maxMintAmount",
            StateField::Owner => "owner",
        };
        f.write_str(name)
    }
}

/// Best-effort snapshot of the minter contract.
#[cw_serde]
pub struct MintState {
    pub total_supply: u64,
    pub max_supply: u64,
    pub unit_price: Uint256,
    pub max_per_transaction: u32,
}

impl MintState {
    /// Assembles a state that holds `total_supply <= max_supply` and
    /// `max_per_transaction >= 1`.
    pub fn new(
        total_supply: u64,
        max_supply: u64,
        unit_price: Uint256,
        max_per_transaction: u32,
    ) -> Self {
        MintState {
            total_supply,
            // A fallback max supply can be lower than the supply actually read
            max_supply: max_supply.max(total_supply),
            unit_price,
            max_per_transaction: max_per_transaction.max(1),
        }
    }

    pub fn remaining(&self) -> u64 {
        self.max_supply.saturating_sub(self.total_supply)
    }

    pub fn is_sold_out(&self) -> bool {
        self.remaining() == 0
    }

    /// Minted share of the collection, `0..=100`.
    pub fn progress_percent(&self) -> Decimal {
        if self.max_supply == 0 {
            return Decimal::zero();
        }
        Decimal::from_ratio(self.total_supply.saturating_mul(100), self.max_supply)
    }

    pub fn unit_price_display(&self) -> String {
        format_native(self.unit_price)
    }

    pub fn clamp_quantity(&self, quantity: u32) -> u32 {
        quantity.clamp(1, self.max_per_transaction.max(1))
    }
}

impl Default for MintState {
    fn default() -> Self {
        MintState {
            total_supply: DEFAULT_TOTAL_SUPPLY,
            max_supply: DEFAULT_MAX_SUPPLY,
            unit_price: DEFAULT_UNIT_PRICE,
            max_per_transaction: DEFAULT_MAX_PER_TRANSACTION,
        }
    }
}
