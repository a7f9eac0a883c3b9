use alloy_primitives::Address;
use cosmwasm_std::Uint256;
use liminal_minter_client::{
    connect_read_only, connect_with_signer, ContractHandle, NoticeLog, TransactionSubmitter,
    ViewStateSynchronizer,
};
use liminal_testing::{MockWallet, MultiTestChain};
use minter_types::parse_native;

use crate::helpers::setup::SetupResponse;

pub type ReadOnlyHandle = ContractHandle<MultiTestChain>;
pub type WalletHandle = ContractHandle<MultiTestChain, MockWallet>;

pub fn hype(amount: &str) -> Uint256 {
    parse_native(amount).unwrap()
}

pub fn read_only(res: &SetupResponse) -> ReadOnlyHandle {
    connect_read_only(res.config.clone(), res.chain.clone())
}

pub fn wallet_for(res: &SetupResponse, address: Address) -> MockWallet {
    MockWallet::new(&res.chain, address)
}

pub async fn connect_wallet(res: &SetupResponse, wallet: MockWallet) -> WalletHandle {
    connect_with_signer(res.config.clone(), res.chain.clone(), wallet)
        .await
        .unwrap()
}

/// A synchronizer loaded from the chain and a submitter recording its notices.
pub async fn loaded_session(
    handle: &WalletHandle,
) -> (ViewStateSynchronizer, TransactionSubmitter<NoticeLog>) {
    let sync = ViewStateSynchronizer::new();
    sync.refresh(handle).await;
    (sync, TransactionSubmitter::new(NoticeLog::new()))
}
