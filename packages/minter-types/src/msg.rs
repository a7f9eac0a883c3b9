use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint256;

/// Read calls of the minter contract. Every numeric answer is a `uint256`,
/// `owner()` answers with the owner address string.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Uint256)]
    TotalSupply {},
    #[returns(Uint256)]
    MaxSupply {},
    // Mint price in the smallest unit of the native token
    #[returns(Uint256)]
    HypeCost {},
    #[returns(Uint256)]
    MaxMintAmount {},
    #[returns(String)]
    Owner {},
}

impl QueryMsg {
    /// Solidity signature of the call.
    pub fn signature(&self) -> &'static str {
        match self {
            QueryMsg::TotalSupply {} => "totalSupply()",
            QueryMsg::MaxSupply {} => "maxSupply()",
            QueryMsg::HypeCost {} => "hypeCost()",
            QueryMsg::MaxMintAmount {} => "maxMintAmount()",
            QueryMsg::Owner {} => "owner()",
        }
    }
}

/// Write calls of the minter contract. Only `MintWithHype` is payable.
#[cw_serde]
pub enum ExecuteMsg {
    MintWithHype { quantity: u32 },
    // Owner only
    SetHypeCost { cost: Uint256 },
    // Owner only
    SetMaxMintAmount { amount: u32 },
}

impl ExecuteMsg {
    pub fn signature(&self) -> &'static str {
        match self {
            ExecuteMsg::MintWithHype { .. } => "mintWithHype(uint256)",
            ExecuteMsg::SetHypeCost { .. } => "setHypeCost(uint256)",
            ExecuteMsg::SetMaxMintAmount { .. } => "setMaxMintAmount(uint256)",
        }
    }

    pub fn is_payable(&self) -> bool {
        matches!(self, ExecuteMsg::MintWithHype { .. })
    }
}
