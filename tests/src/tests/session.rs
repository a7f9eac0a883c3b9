use liminal_minter_client::{connect_session, connect_with_signer, ClientError, Signer, WalletSession};
use liminal_testing::MockSession;

use crate::helpers::setup::{setup, TEST_CHAIN_ID};
use crate::helpers::utils::{connect_wallet, loaded_session, wallet_for};

#[tokio::test]
async fn session_requires_login() {
    let res = setup();
    let session = MockSession::new(wallet_for(&res, res.test_accounts.collector));

    let err = connect_session(&session, res.config.clone(), res.chain.clone())
        .await
        .err()
        .unwrap();
    assert_eq!(err, ClientError::WalletNotConnected {});

    session.login().await.unwrap();
    let handle = connect_session(&session, res.config.clone(), res.chain.clone())
        .await
        .unwrap();
    assert!(!handle.is_read_only());
    assert_eq!(handle.signer_address(), Some(res.test_accounts.collector));

    let (sync, submitter) = loaded_session(&handle).await;
    submitter.submit_mint(&handle, &sync, 1).await.unwrap();

    session.logout().await.unwrap();
    assert!(!session.is_authenticated());
    let err = connect_session(&session, res.config.clone(), res.chain.clone())
        .await
        .err()
        .unwrap();
    assert_eq!(err, ClientError::WalletNotConnected {});
}

#[tokio::test]
async fn login_can_be_dismissed() {
    let res = setup();
    let session = MockSession::new(wallet_for(&res, res.test_accounts.collector));
    session.wallet().set_rejecting(true);

    assert!(session.login().await.is_err());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn wallet_is_switched_to_the_configured_chain() {
    let res = setup();
    let wallet = wallet_for(&res, res.test_accounts.collector).on_chain(1);

    let handle = connect_with_signer(res.config.clone(), res.chain.clone(), wallet.clone())
        .await
        .unwrap();
    assert_eq!(wallet.current_chain(), TEST_CHAIN_ID);
    assert_eq!(handle.signer().unwrap().chain_id().await, Ok(TEST_CHAIN_ID));
}

#[tokio::test]
async fn unsupported_chain_switch_is_a_mismatch() {
    let res = setup();
    let wallet = wallet_for(&res, res.test_accounts.collector).on_chain(1);
    wallet.set_switch_supported(false);

    let err = connect_with_signer(res.config.clone(), res.chain.clone(), wallet.clone())
        .await
        .err()
        .unwrap();
    assert_eq!(
        err,
        ClientError::ChainMismatch {
            expected: TEST_CHAIN_ID,
            actual: 1
        }
    );
    assert_eq!(wallet.current_chain(), 1);

    // Same through the session
    let session = MockSession::new(wallet);
    session.wallet().set_switch_supported(false);
    session.login().await.unwrap();
    let err = connect_session(&session, res.config.clone(), res.chain.clone())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ClientError::ChainMismatch { .. }));
}

#[tokio::test]
async fn rejected_chain_switch_is_a_mismatch() {
    let res = setup();
    let wallet = wallet_for(&res, res.test_accounts.collector).on_chain(42);
    wallet.set_rejecting(true);

    let err = connect_with_signer(res.config.clone(), res.chain.clone(), wallet)
        .await
        .err()
        .unwrap();
    assert_eq!(
        err,
        ClientError::ChainMismatch {
            expected: TEST_CHAIN_ID,
            actual: 42
        }
    );
}

#[tokio::test]
async fn wallet_already_on_chain_is_bound_directly() {
    let res = setup();
    let wallet = wallet_for(&res, res.test_accounts.owner);
    wallet.set_switch_supported(false);

    let handle = connect_wallet(&res, wallet).await;
    assert_eq!(handle.signer_address(), Some(res.test_accounts.owner));
    assert_eq!(handle.owner().await.unwrap(), res.test_accounts.owner);
}
