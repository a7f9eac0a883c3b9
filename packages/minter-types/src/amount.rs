use std::str::FromStr;

use cosmwasm_std::{Decimal256, Uint256};
use thiserror::Error;

/// Fractional digits of the chain's native token (wei-style smallest unit).
pub const NATIVE_DECIMALS: u32 = 18;

#[derive(Error, Debug, PartialEq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty {},

    #[error("Amount cannot be negative: {input}")]
    Negative { input: String },

    #[error("Invalid amount: {input}")]
    Invalid { input: String },

    #[error("Overflow error")]
    Overflow {},
}

/// Parses a human readable amount such as `"0.1"` into the smallest unit.
/// Exact for up to [`NATIVE_DECIMALS`] significant fractional digits, anything finer
/// is rejected rather than rounded. Trailing fractional zeros are ignored.
pub fn parse_native(input: &str) -> Result<Uint256, AmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AmountError::Empty {});
    }
    if input.starts_with('-') {
        return Err(AmountError::Negative {
            input: input.to_string(),
        });
    }
    let digits = if input.contains('.') {
        input.trim_end_matches('0').trim_end_matches('.')
    } else {
        input
    };
    Decimal256::from_str(digits)
        .map(|amount| amount.atomics())
        .map_err(|_| AmountError::Invalid {
            input: input.to_string(),
        })
}

/// Formats an amount in the smallest unit as a decimal string, trailing zeros trimmed.
pub fn format_native(amount: Uint256) -> String {
    Decimal256::new(amount).to_string()
}

/// `unit_price * quantity` in the smallest unit.
pub fn total_for(unit_price: Uint256, quantity: u32) -> Result<Uint256, AmountError> {
    unit_price
        .checked_mul(Uint256::from(quantity))
        .map_err(|_| AmountError::Overflow {})
}
