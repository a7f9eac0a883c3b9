//! A minter contract exposing the Liminal Dreams ABI, run inside `cw_multi_test::App`
//! so the client can be exercised against real contract semantics.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, ConversionOverflowError, Deps, DepsMut, Env, Event, MessageInfo,
    Response, StdError, StdResult, Uint128, Uint256,
};
use cw2::set_contract_version;
use cw_controllers::{Admin, AdminError};
use cw_storage_plus::Item;
use cw_utils::{must_pay, nonpayable, PaymentError};
use minter_types::{ExecuteMsg, QueryMsg};
use thiserror::Error;

const CONTRACT_NAME: &str = "crates.io:liminal-mock-minter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address string used as `from` of mint transfers.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Error, Debug, PartialEq)]
pub enum MockMinterError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("Payment error")]
    PaymentError(#[from] PaymentError),

    #[error("Invalid mint amount")]
    InvalidMintAmount {},

    #[error("Max supply exceeded")]
    MaxSupplyExceeded {},

    #[error("Incorrect payment amount")]
    IncorrectPaymentAmount { expected: Uint128, sent: Uint128 },

    #[error("Overflow error")]
    OverflowError {},
}

impl From<ConversionOverflowError> for MockMinterError {
    fn from(_err: ConversionOverflowError) -> Self {
        MockMinterError::OverflowError {}
    }
}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub denom: String,
    pub max_supply: u64,
    pub hype_cost: Uint128,
    pub max_mint_amount: u32,
}

#[cw_serde]
pub struct MinterConfig {
    pub denom: String,
    pub max_supply: u64,
    pub hype_cost: Uint128,
    pub max_mint_amount: u32,
}

pub const CONFIG: Item<MinterConfig> = Item::new("config");
pub const TOTAL_SUPPLY: Item<u64> = Item::new("total_supply");
pub const OWNER: Admin = Admin::new("owner");

pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, MockMinterError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    if msg.max_mint_amount == 0 {
        return Err(MockMinterError::InvalidMintAmount {});
    }
    let config = MinterConfig {
        denom: msg.denom,
        max_supply: msg.max_supply,
        hype_cost: msg.hype_cost,
        max_mint_amount: msg.max_mint_amount,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_SUPPLY.save(deps.storage, &0)?;
    // Owner addresses are EVM hex strings, stored as given
    OWNER.set(deps.branch(), Some(cosmwasm_std::Addr::unchecked(msg.owner)))?;

    Ok(Response::new().add_attribute("action", "instantiate"))
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, MockMinterError> {
    match msg {
        ExecuteMsg::MintWithHype { quantity } => execute_mint(deps, env, info, quantity),
        ExecuteMsg::SetHypeCost { cost } => execute_set_hype_cost(deps, info, cost),
        ExecuteMsg::SetMaxMintAmount { amount } => execute_set_max_mint_amount(deps, info, amount),
    }
}

fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, MockMinterError> {
    let config = CONFIG.load(deps.storage)?;
    if quantity == 0 || quantity > config.max_mint_amount {
        return Err(MockMinterError::InvalidMintAmount {});
    }
    let total_supply = TOTAL_SUPPLY.load(deps.storage)?;
    let new_supply = total_supply + u64::from(quantity);
    if new_supply > config.max_supply {
        return Err(MockMinterError::MaxSupplyExceeded {});
    }

    let expected = config
        .hype_cost
        .checked_mul(Uint128::from(quantity))
        .map_err(|_| MockMinterError::OverflowError {})?;
    // Free mints must not carry funds
    let sent = if expected.is_zero() {
        nonpayable(&info)?;
        Uint128::zero()
    } else {
        must_pay(&info, &config.denom)?
    };
    if sent != expected {
        return Err(MockMinterError::IncorrectPaymentAmount { expected, sent });
    }
    TOTAL_SUPPLY.save(deps.storage, &new_supply)?;

    let transfers = (total_supply + 1..=new_supply).map(|token_id| {
        Event::new("transfer")
            .add_attribute("from", ZERO_ADDRESS)
            .add_attribute("to", info.sender.to_string())
            .add_attribute("token_id", token_id.to_string())
    });
    Ok(Response::new()
        .add_events(transfers)
        .add_attribute("action", "mint_with_hype")
        .add_attribute("quantity", quantity.to_string()))
}

fn execute_set_hype_cost(
    deps: DepsMut,
    info: MessageInfo,
    cost: Uint256,
) -> Result<Response, MockMinterError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;
    let cost = Uint128::try_from(cost)?;
    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.hype_cost = cost;
        Ok(config)
    })?;
    Ok(Response::new()
        .add_attribute("action", "set_hype_cost")
        .add_attribute("hype_cost", cost.to_string()))
}

fn execute_set_max_mint_amount(
    deps: DepsMut,
    info: MessageInfo,
    amount: u32,
) -> Result<Response, MockMinterError> {
    nonpayable(&info)?;
    OWNER.assert_admin(deps.as_ref(), &info.sender)?;
    if amount == 0 {
        return Err(MockMinterError::InvalidMintAmount {});
    }
    CONFIG.update(deps.storage, |mut config| -> StdResult<_> {
        config.max_mint_amount = amount;
        Ok(config)
    })?;
    Ok(Response::new()
        .add_attribute("action", "set_max_mint_amount")
        .add_attribute("max_mint_amount", amount.to_string()))
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::TotalSupply {} => {
            to_json_binary(&Uint256::from(TOTAL_SUPPLY.load(deps.storage)?))
        }
        QueryMsg::MaxSupply {} => {
            to_json_binary(&Uint256::from(CONFIG.load(deps.storage)?.max_supply))
        }
        QueryMsg::HypeCost {} => {
            to_json_binary(&Uint256::from(CONFIG.load(deps.storage)?.hype_cost))
        }
        QueryMsg::MaxMintAmount {} => {
            to_json_binary(&Uint256::from(CONFIG.load(deps.storage)?.max_mint_amount))
        }
        QueryMsg::Owner {} => {
            let owner = OWNER.get(deps)?.map(|owner| owner.to_string());
            to_json_binary(&owner.unwrap_or(ZERO_ADDRESS.to_string()))
        }
    }
}
