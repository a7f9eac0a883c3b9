use cosmwasm_std::Uint256;
use liminal_minter_client::{ClientError, ViewStateSynchronizer};
use minter_types::{MintState, QueryMsg, StateField};

use crate::helpers::setup::setup;
use crate::helpers::utils::{connect_wallet, hype, loaded_session, read_only, wallet_for};

#[tokio::test]
async fn refresh_reads_chain_state() {
    let res = setup();
    let handle = read_only(&res);
    let sync = ViewStateSynchronizer::new();
    assert!(!sync.is_loaded());

    let state = sync.refresh(&handle).await;
    assert!(sync.is_loaded());
    assert_eq!(
        state,
        MintState {
            total_supply: 0,
            max_supply: 10_000,
            unit_price: hype("0.1"),
            max_per_transaction: 20,
        }
    );
}

#[tokio::test]
async fn failed_reads_use_defaults_before_first_success() {
    let res = setup();
    let handle = read_only(&res);
    res.chain.fail_reads(&[
        QueryMsg::TotalSupply {},
        QueryMsg::MaxSupply {},
        QueryMsg::HypeCost {},
        QueryMsg::MaxMintAmount {},
    ]);

    let state = ViewStateSynchronizer::new().refresh(&handle).await;
    assert_eq!(state, MintState::default());

    let err = handle.unit_price().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::ReadFailure {
            field: StateField::UnitPrice,
            ..
        }
    ));
}

#[tokio::test]
async fn partial_failure_only_affects_failed_field() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.collector)).await;
    let (sync, submitter) = loaded_session(&handle).await;
    submitter.submit_mint(&handle, &sync, 4).await.unwrap();

    let owner = connect_wallet(&res, wallet_for(&res, res.test_accounts.owner)).await;
    let pending = owner.set_unit_price(hype("0.5")).await.unwrap();
    owner.confirm(&pending).await.unwrap();
    let pending = owner.set_max_per_transaction(7).await.unwrap();
    owner.confirm(&pending).await.unwrap();

    // Price fails: last known good price is kept, everything else moves on
    res.chain.fail_reads(&[QueryMsg::HypeCost {}]);
    let state = sync.refresh(&handle).await;
    assert_eq!(state.total_supply, 4);
    assert_eq!(state.max_supply, 10_000);
    assert_eq!(state.unit_price, hype("0.1"));
    assert_eq!(state.max_per_transaction, 7);

    res.chain.clear_read_failures();
    res.chain.fail_reads(&[QueryMsg::TotalSupply {}, QueryMsg::MaxMintAmount {}]);
    let state = sync.refresh(&handle).await;
    assert_eq!(state.total_supply, 4);
    assert_eq!(state.unit_price, hype("0.5"));
    assert_eq!(state.max_per_transaction, 7);
}

#[tokio::test]
async fn confirmed_mint_survives_stale_refresh() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.collector)).await;
    let (sync, submitter) = loaded_session(&handle).await;
    let before = sync.state().total_supply;

    // A periodic refresh reads the chain before the mint lands
    let stale = ViewStateSynchronizer::fetch(&handle).await;
    assert_eq!(stale.total_supply, Ok(before));

    submitter.submit_mint(&handle, &sync, 3).await.unwrap();
    assert_eq!(sync.state().total_supply, before + 3);

    // ...and is applied after it
    let state = sync.apply(stale);
    assert_eq!(state.total_supply, before + 3);

    let state = sync.refresh(&handle).await;
    assert_eq!(state.total_supply, before + 3);
}

#[tokio::test]
async fn confirmed_mint_reflected_when_reread_fails() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.collector)).await;
    let (sync, submitter) = loaded_session(&handle).await;

    res.chain.fail_reads(&[QueryMsg::TotalSupply {}]);
    submitter.submit_mint(&handle, &sync, 2).await.unwrap();
    assert_eq!(sync.state().total_supply, 2);

    res.chain.clear_read_failures();
    let state = sync.refresh(&handle).await;
    assert_eq!(state.total_supply, 2);
    assert_eq!(state.remaining(), 9_998);
}

#[tokio::test]
async fn total_cost_is_exact() {
    let res = setup();
    let handle = read_only(&res);
    let state = ViewStateSynchronizer::new().refresh(&handle).await;

    for quantity in 1..=state.max_per_transaction {
        let cost = liminal_minter_client::total_cost(
            state.unit_price,
            quantity,
            state.max_per_transaction,
        )
        .unwrap();
        assert_eq!(cost, state.unit_price * Uint256::from(quantity));
    }
    assert_eq!(
        liminal_minter_client::total_cost_display(&state, 3),
        "0.3"
    );
}

#[tokio::test]
async fn refresh_during_confirmation_does_not_double_count() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.collector)).await;
    let (sync, submitter) = loaded_session(&handle).await;
    res.chain.hold_confirmations(true);

    // The mint is already included when a periodic refresh runs
    let periodic = async {
        tokio::task::yield_now().await;
        assert_eq!(sync.refresh(&handle).await.total_supply, 3);
        res.chain.hold_confirmations(false);
    };
    let (submission, _) = tokio::join!(submitter.submit_mint(&handle, &sync, 3), periodic);
    submission.unwrap();

    assert_eq!(sync.state().total_supply, 3);
    assert_eq!(sync.refresh(&handle).await.total_supply, 3);
    assert_eq!(handle.total_supply().await.unwrap(), 3);
}
