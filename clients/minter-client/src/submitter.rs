use std::cell::RefCell;
use std::collections::BTreeMap;

use cosmwasm_std::Uint256;
use minter_types::amount::{format_native, parse_native, total_for};
use minter_types::MintState;
use tracing::{debug, info, warn};

use crate::contract::ContractHandle;
use crate::error::ClientError;
use crate::notice::{LogNotices, Notice, NoticeSink};
use crate::sync::ViewStateSynchronizer;
use crate::transport::{ChainProvider, PendingTx, Signer, TxReceipt};

/// A user-triggered write, one per control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Mint,
    SetPrice,
    SetMaxMint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStatus {
    Idle,
    Validating,
    Submitted,
    Confirmed,
    Failed,
}

impl ActionStatus {
    /// The control of an in-flight action stays disabled.
    pub fn is_in_flight(self) -> bool {
        matches!(self, ActionStatus::Validating | ActionStatus::Submitted)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub input: String,
    pub status: ActionStatus,
    pub tx_hash: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Confirmed(TxReceipt),
    // The same action was already in flight, nothing was sent
    Ignored,
}

/// Validates user input, sends the write and follows it to a single terminal outcome.
pub struct TransactionSubmitter<N = LogNotices> {
    actions: RefCell<BTreeMap<ActionKind, PendingAction>>,
    notices: N,
}

impl Default for TransactionSubmitter<LogNotices> {
    fn default() -> Self {
        Self::new(LogNotices)
    }
}

impl<N: NoticeSink> TransactionSubmitter<N> {
    pub fn new(notices: N) -> Self {
        TransactionSubmitter {
            actions: RefCell::new(BTreeMap::new()),
            notices,
        }
    }

    pub fn notices(&self) -> &N {
        &self.notices
    }

    pub fn action(&self, kind: ActionKind) -> Option<PendingAction> {
        self.actions.borrow().get(&kind).cloned()
    }

    pub fn status(&self, kind: ActionKind) -> ActionStatus {
        self.actions
            .borrow()
            .get(&kind)
            .map(|action| action.status)
            .unwrap_or(ActionStatus::Idle)
    }

    pub fn is_enabled(&self, kind: ActionKind) -> bool {
        !self.status(kind).is_in_flight()
    }

    /// Moves a finished action back to `Idle`.
    pub fn rearm(&self, kind: ActionKind) {
        if matches!(
            self.status(kind),
            ActionStatus::Confirmed | ActionStatus::Failed
        ) {
            self.set_status(kind, ActionStatus::Idle);
        }
    }

    fn begin(&self, kind: ActionKind, input: String) -> bool {
        {
            let mut actions = self.actions.borrow_mut();
            if let Some(action) = actions.get(&kind) {
                if action.status.is_in_flight() {
                    return false;
                }
            }
            actions.insert(
                kind,
                PendingAction {
                    kind,
                    input,
                    status: ActionStatus::Validating,
                    tx_hash: None,
                },
            );
        }
        self.notices
            .status_changed(kind, ActionStatus::Validating);
        true
    }

    fn set_status(&self, kind: ActionKind, status: ActionStatus) {
        if let Some(action) = self.actions.borrow_mut().get_mut(&kind) {
            action.status = status;
        }
        self.notices.status_changed(kind, status);
    }

    fn fail(&self, kind: ActionKind, title: &str, err: ClientError) -> ClientError {
        warn!(action = ?kind, error = %err, "action failed");
        self.set_status(kind, ActionStatus::Failed);
        self.notices.notify(Notice::error(title, err.to_string()));
        err
    }

    fn finish(&self, kind: ActionKind, notice: Notice) {
        info!(action = ?kind, "action confirmed");
        self.set_status(kind, ActionStatus::Confirmed);
        self.notices.notify(notice);
    }

    fn ignored(&self, kind: ActionKind) -> Result<Submission, ClientError> {
        debug!(action = ?kind, "action already in flight, ignoring");
        Ok(Submission::Ignored)
    }

    fn require_signer<P: ChainProvider, S: Signer>(
        &self,
        kind: ActionKind,
        handle: &ContractHandle<P, S>,
    ) -> Result<(), ClientError> {
        if handle.is_read_only() {
            return Err(self.fail(
                kind,
                "Wallet Not Connected",
                ClientError::WalletNotConnected {},
            ));
        }
        Ok(())
    }

    async fn settle<P: ChainProvider, S: Signer>(
        &self,
        kind: ActionKind,
        handle: &ContractHandle<P, S>,
        pending: Result<PendingTx, ClientError>,
        failure_title: &str,
        progress: &str,
    ) -> Result<TxReceipt, ClientError> {
        let pending = pending.map_err(|err| self.fail(kind, failure_title, err))?;
        if let Some(action) = self.actions.borrow_mut().get_mut(&kind) {
            action.tx_hash = Some(pending.hash.clone());
        }
        self.set_status(kind, ActionStatus::Submitted);
        self.notices
            .notify(Notice::info("Transaction Submitted", progress));

        handle
            .confirm(&pending)
            .await
            .map_err(|err| self.fail(kind, failure_title, err))
    }

    /// Mints `quantity` tokens paying `unit_price * quantity`.
    pub async fn submit_mint<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
        sync: &ViewStateSynchronizer,
        quantity: u32,
    ) -> Result<Submission, ClientError> {
        let kind = ActionKind::Mint;
        if !self.begin(kind, quantity.to_string()) {
            return self.ignored(kind);
        }
        self.require_signer(kind, handle)?;
        let state = sync.state();
        let value = validate_mint(&state, quantity)
            .map_err(|err| self.fail(kind, "Invalid Quantity", err))?;

        let pending = handle.mint(quantity, value).await;
        let receipt = self
            .settle(
                kind,
                handle,
                pending,
                "Minting Failed",
                "Your mint transaction is being processed...",
            )
            .await?;

        sync.record_confirmed_mint(state.total_supply, quantity);
        sync.refresh_total_supply(handle).await;

        let plural = if quantity > 1 { "s" } else { "" };
        self.finish(
            kind,
            Notice::success(
                "Success!",
                format!("Successfully minted {} NFT{}!", quantity, plural),
            ),
        );
        Ok(Submission::Confirmed(receipt))
    }

    /// Owner only: sets the mint price from a decimal string such as `"0.1"`.
    pub async fn submit_set_price<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
        sync: &ViewStateSynchronizer,
        input: &str,
    ) -> Result<Submission, ClientError> {
        let kind = ActionKind::SetPrice;
        if !self.begin(kind, input.to_string()) {
            return self.ignored(kind);
        }
        self.require_signer(kind, handle)?;
        let price = validate_price(input).map_err(|err| self.fail(kind, "Invalid Input", err))?;

        let pending = handle.set_unit_price(price).await;
        let receipt = self
            .settle(
                kind,
                handle,
                pending,
                "Transaction Failed",
                "Setting mint price...",
            )
            .await?;

        sync.refresh_unit_price(handle).await;
        self.finish(
            kind,
            Notice::success(
                "Success!",
                format!("Mint price set to {} $HYPE", format_native(price)),
            ),
        );
        Ok(Submission::Confirmed(receipt))
    }

    /// Owner only: sets the maximum number of tokens per mint transaction.
    pub async fn submit_set_max_mint<P: ChainProvider, S: Signer>(
        &self,
        handle: &ContractHandle<P, S>,
        sync: &ViewStateSynchronizer,
        input: &str,
    ) -> Result<Submission, ClientError> {
        let kind = ActionKind::SetMaxMint;
        if !self.begin(kind, input.to_string()) {
            return self.ignored(kind);
        }
        self.require_signer(kind, handle)?;
        let amount =
            validate_max_mint(input).map_err(|err| self.fail(kind, "Invalid Input", err))?;

        let pending = handle.set_max_per_transaction(amount).await;
        let receipt = self
            .settle(
                kind,
                handle,
                pending,
                "Transaction Failed",
                "Setting max mint amount...",
            )
            .await?;

        sync.refresh_max_per_transaction(handle).await;
        self.finish(
            kind,
            Notice::success(
                "Success!",
                format!("Max mint per transaction set to {}", amount),
            ),
        );
        Ok(Submission::Confirmed(receipt))
    }
}

/// Checks `quantity` against the current limit and returns the value to attach.
pub fn validate_mint(state: &MintState, quantity: u32) -> Result<Uint256, ClientError> {
    let max = state.max_per_transaction;
    if quantity < 1 || quantity > max {
        return Err(ClientError::InvalidQuantity { quantity, max });
    }
    total_for(state.unit_price, quantity).map_err(|_| ClientError::Overflow {})
}

pub fn validate_price(input: &str) -> Result<Uint256, ClientError> {
    parse_native(input).map_err(|_| ClientError::InvalidPrice {
        input: input.to_string(),
    })
}

pub fn validate_max_mint(input: &str) -> Result<u32, ClientError> {
    match input.trim().parse::<u32>() {
        Ok(amount) if amount >= 1 => Ok(amount),
        _ => Err(ClientError::InvalidMaxMint {
            input: input.to_string(),
        }),
    }
}
