use std::cell::{Cell, RefCell};
use std::rc::Rc;

use alloy_primitives::Address;
use liminal_minter_client::{PendingTx, Signer, TransportError, TxRequest, WalletSession};

use crate::chain::MultiTestChain;

/// A browser wallet connected to a [`MultiTestChain`]. Clones share their toggles.
#[derive(Clone)]
pub struct MockWallet {
    chain: MultiTestChain,
    address: Address,
    chain_id: Rc<Cell<u64>>,
    switch_supported: Rc<Cell<bool>>,
    rejecting: Rc<Cell<bool>>,
    sent: Rc<RefCell<Vec<TxRequest>>>,
}

impl MockWallet {
    /// A wallet already on the chain's network.
    pub fn new(chain: &MultiTestChain, address: Address) -> Self {
        MockWallet {
            chain: chain.clone(),
            address,
            chain_id: Rc::new(Cell::new(chain.chain_id())),
            switch_supported: Rc::new(Cell::new(true)),
            rejecting: Rc::new(Cell::new(false)),
            sent: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn on_chain(self, chain_id: u64) -> Self {
        self.chain_id.set(chain_id);
        self
    }

    pub fn current_chain(&self) -> u64 {
        self.chain_id.get()
    }

    /// Whether the wallet accepts `switch_chain` requests.
    pub fn set_switch_supported(&self, supported: bool) {
        self.switch_supported.set(supported);
    }

    /// While rejecting, every signature prompt is declined by the user.
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.set(rejecting);
    }

    /// Requests the user approved, in order.
    pub fn sent(&self) -> Vec<TxRequest> {
        self.sent.borrow().clone()
    }
}

impl Signer for MockWallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn chain_id(&self) -> Result<u64, TransportError> {
        Ok(self.chain_id.get())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), TransportError> {
        if !self.switch_supported.get() {
            return Err(TransportError::Unsupported {
                reason: format!("Unrecognized chain ID {}", chain_id),
            });
        }
        if self.rejecting.get() {
            return Err(TransportError::Rejected {
                reason: "User rejected the request.".to_string(),
            });
        }
        self.chain_id.set(chain_id);
        Ok(())
    }

    async fn send_transaction(&self, request: TxRequest) -> Result<PendingTx, TransportError> {
        if self.rejecting.get() {
            return Err(TransportError::Rejected {
                reason: "User denied transaction signature.".to_string(),
            });
        }
        if self.chain_id.get() != self.chain.chain_id() {
            return Err(TransportError::Rpc {
                message: format!(
                    "wallet is on chain {}, expected {}",
                    self.chain_id.get(),
                    self.chain.chain_id()
                ),
            });
        }
        let pending = self.chain.submit(&self.address, &request)?;
        self.sent.borrow_mut().push(request);
        Ok(pending)
    }
}

/// Login state of the embedded wallet provider.
pub struct MockSession {
    wallet: MockWallet,
    authenticated: Cell<bool>,
}

impl MockSession {
    pub fn new(wallet: MockWallet) -> Self {
        MockSession {
            wallet,
            authenticated: Cell::new(false),
        }
    }

    pub fn wallet(&self) -> &MockWallet {
        &self.wallet
    }
}

impl WalletSession for MockSession {
    type Signer = MockWallet;

    fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    async fn get_signer(&self, _chain_id: u64) -> Result<MockWallet, TransportError> {
        if !self.authenticated.get() {
            return Err(TransportError::Rejected {
                reason: "not logged in".to_string(),
            });
        }
        Ok(self.wallet.clone())
    }

    async fn login(&self) -> Result<(), TransportError> {
        if self.wallet.rejecting.get() {
            return Err(TransportError::Rejected {
                reason: "User closed the login modal.".to_string(),
            });
        }
        self.authenticated.set(true);
        Ok(())
    }

    async fn logout(&self) -> Result<(), TransportError> {
        self.authenticated.set(false);
        Ok(())
    }
}
