use liminal_minter_client::{ActionKind, ActionStatus, ClientError, NoticeLevel, Submission};

use crate::helpers::setup::{setup, INITIAL_BALANCE};
use crate::helpers::utils::{connect_wallet, hype, loaded_session, wallet_for};

#[tokio::test]
async fn owner_sets_mint_price() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.owner)).await;
    let (sync, submitter) = loaded_session(&handle).await;

    let submission = submitter
        .submit_set_price(&handle, &sync, "0.25")
        .await
        .unwrap();
    assert!(matches!(submission, Submission::Confirmed(_)));
    assert_eq!(sync.state().unit_price, hype("0.25"));
    assert_eq!(sync.state().unit_price_display(), "0.25");
    assert_eq!(handle.unit_price().await.unwrap(), hype("0.25"));

    let notice = submitter.notices().last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.description, "Mint price set to 0.25 $HYPE");
    assert_eq!(
        submitter.notices().notices()[0].description,
        "Setting mint price..."
    );
}

#[tokio::test]
async fn free_mint_after_price_reset() {
    let res = setup();
    let owner = connect_wallet(&res, wallet_for(&res, res.test_accounts.owner)).await;
    let (owner_sync, admin) = loaded_session(&owner).await;
    admin.submit_set_price(&owner, &owner_sync, "0").await.unwrap();

    let collector = res.test_accounts.collector;
    let handle = connect_wallet(&res, wallet_for(&res, collector)).await;
    let (sync, submitter) = loaded_session(&handle).await;
    assert!(sync.state().unit_price.is_zero());

    submitter.submit_mint(&handle, &sync, 2).await.unwrap();
    assert_eq!(res.chain.balance(&collector), INITIAL_BALANCE);
    assert_eq!(handle.total_supply().await.unwrap(), 2);
}

#[tokio::test]
async fn invalid_price_input() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.owner)).await;
    let (sync, submitter) = loaded_session(&handle).await;

    for input in ["", "abc", "-1", "0.1234567890123456789"] {
        let err = submitter
            .submit_set_price(&handle, &sync, input)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::InvalidPrice {
                input: input.to_string()
            }
        );
        assert_eq!(submitter.notices().last().unwrap().title, "Invalid Input");
        assert!(submitter.is_enabled(ActionKind::SetPrice));
    }
    // 18 fractional digits still fit
    submitter
        .submit_set_price(&handle, &sync, "0.000000000000000001")
        .await
        .unwrap();
    assert_eq!(handle.unit_price().await.unwrap(), hype("0.000000000000000001"));
}

#[tokio::test]
async fn owner_sets_max_mint() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.owner)).await;
    let (sync, submitter) = loaded_session(&handle).await;

    for input in ["0", "1.5", "", "-3", "ten"] {
        let err = submitter
            .submit_set_max_mint(&handle, &sync, input)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::InvalidMaxMint {
                input: input.to_string()
            }
        );
    }

    submitter
        .submit_set_max_mint(&handle, &sync, "5")
        .await
        .unwrap();
    assert_eq!(sync.state().max_per_transaction, 5);
    assert_eq!(
        submitter.notices().last().unwrap().description,
        "Max mint per transaction set to 5"
    );

    // The new limit applies to minting right away
    let mint = liminal_minter_client::TransactionSubmitter::new(
        liminal_minter_client::NoticeLog::new(),
    );
    let err = mint.submit_mint(&handle, &sync, 6).await.unwrap_err();
    assert_eq!(err, ClientError::InvalidQuantity { quantity: 6, max: 5 });
}

#[tokio::test]
async fn non_owner_cannot_set_price() {
    let res = setup();
    let handle = connect_wallet(&res, wallet_for(&res, res.test_accounts.creator)).await;
    let (sync, submitter) = loaded_session(&handle).await;

    let err = submitter
        .submit_set_price(&handle, &sync, "1")
        .await
        .unwrap_err();
    match err {
        ClientError::ConfirmationFailure { reason, .. } => {
            assert!(reason.contains("Caller is not admin"))
        }
        err => panic!("unexpected error {:?}", err),
    }
    assert_eq!(submitter.status(ActionKind::SetPrice), ActionStatus::Failed);
    assert_eq!(
        submitter.notices().last().unwrap().title,
        "Transaction Failed"
    );
    assert_eq!(handle.unit_price().await.unwrap(), hype("0.1"));
    assert_eq!(sync.state().unit_price, hype("0.1"));

    // Other actions are unaffected
    assert_eq!(submitter.status(ActionKind::SetMaxMint), ActionStatus::Idle);
    assert!(submitter.is_enabled(ActionKind::Mint));
}

#[tokio::test]
async fn admin_clicks_while_submitted_are_ignored() {
    let res = setup();
    let wallet = wallet_for(&res, res.test_accounts.owner);
    let handle = connect_wallet(&res, wallet.clone()).await;
    let (sync, submitter) = loaded_session(&handle).await;
    res.chain.hold_confirmations(true);

    let release = async {
        tokio::task::yield_now().await;
        assert_eq!(submitter.status(ActionKind::SetPrice), ActionStatus::Submitted);
        assert_eq!(submitter.status(ActionKind::SetMaxMint), ActionStatus::Submitted);
        assert!(!submitter.is_enabled(ActionKind::SetPrice));
        assert!(!submitter.is_enabled(ActionKind::SetMaxMint));
        res.chain.hold_confirmations(false);
    };
    let (price, price_again, max_mint, max_mint_again, _) = tokio::join!(
        submitter.submit_set_price(&handle, &sync, "0.2"),
        submitter.submit_set_price(&handle, &sync, "0.3"),
        submitter.submit_set_max_mint(&handle, &sync, "5"),
        submitter.submit_set_max_mint(&handle, &sync, "6"),
        release
    );

    assert!(matches!(price.unwrap(), Submission::Confirmed(_)));
    assert_eq!(price_again.unwrap(), Submission::Ignored);
    assert!(matches!(max_mint.unwrap(), Submission::Confirmed(_)));
    assert_eq!(max_mint_again.unwrap(), Submission::Ignored);

    assert_eq!(wallet.sent().len(), 2);
    assert_eq!(handle.unit_price().await.unwrap(), hype("0.2"));
    assert_eq!(handle.max_per_transaction().await.unwrap(), 5);
    for kind in [ActionKind::SetPrice, ActionKind::SetMaxMint] {
        assert_eq!(
            submitter.notices().transitions(kind),
            vec![
                ActionStatus::Validating,
                ActionStatus::Submitted,
                ActionStatus::Confirmed
            ]
        );
    }
}
