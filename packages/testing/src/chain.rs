use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::str::FromStr;

use alloy_primitives::Address;
use cosmwasm_std::{
    coins, to_json_binary, to_json_vec, Addr, Binary, ContractResult, Empty, Event, Querier,
    QueryRequest, SystemResult, Uint128, Uint256, WasmQuery,
};
use cw_multi_test::{next_block, App, AppResponse, BankSudo, ContractWrapper, Executor, SudoMsg};
use liminal_minter_client::{
    ChainProvider, PendingTx, TransferEvent, TransportError, TxReceipt, TxRequest,
};
use minter_types::QueryMsg;

use crate::mock_minter::{execute, instantiate, query, InstantiateMsg};

pub const NATIVE_DENOM: &str = "ahype";
pub const GENESIS_HEIGHT: u64 = 1;

/// Multi-test address for an EVM address, lowercase hex.
pub fn to_chain_addr(address: &Address) -> Addr {
    Addr::unchecked(address.to_checksum(None).to_lowercase())
}

fn rpc_error(err: impl ToString) -> TransportError {
    TransportError::Rpc {
        message: err.to_string(),
    }
}

#[derive(Clone, Debug)]
enum TxOutcome {
    Included { block_number: u64 },
    Reverted { reason: String },
}

/// Deployment parameters of a mock minter. Defaults follow the deployed contract.
#[derive(Clone, Debug)]
pub struct MinterParams {
    pub max_supply: u64,
    pub hype_cost: Uint128,
    pub max_mint_amount: u32,
}

impl Default for MinterParams {
    fn default() -> Self {
        MinterParams {
            max_supply: 10_000,
            hype_cost: Uint128::zero(),
            max_mint_amount: 20,
        }
    }
}

struct ChainInner {
    app: App,
    minter_code_id: u64,
    contracts: HashMap<Address, Addr>,
    receipts: HashMap<String, TxOutcome>,
    transfers: Vec<(Address, TransferEvent)>,
    failing_reads: HashSet<&'static str>,
    tx_count: u64,
}

impl ChainInner {
    fn contract_addr(&self, contract: &Address) -> Result<Addr, TransportError> {
        self.contracts
            .get(contract)
            .cloned()
            .ok_or_else(|| rpc_error(format!("no contract at {}", contract)))
    }
}

/// An EVM-like chain backed by `cw_multi_test::App`. Cloning shares the chain.
#[derive(Clone)]
pub struct MultiTestChain {
    inner: Rc<RefCell<ChainInner>>,
    held: Rc<Cell<bool>>,
    reads_held: Rc<Cell<bool>>,
    chain_id: u64,
}

impl MultiTestChain {
    pub fn new(chain_id: u64) -> Self {
        let mut app = App::default();
        app.update_block(|block| block.height = GENESIS_HEIGHT);
        let minter_code_id = app.store_code(Box::new(ContractWrapper::new(
            execute,
            instantiate,
            query,
        )));
        MultiTestChain {
            inner: Rc::new(RefCell::new(ChainInner {
                app,
                minter_code_id,
                contracts: HashMap::new(),
                receipts: HashMap::new(),
                transfers: Vec::new(),
                failing_reads: HashSet::new(),
                tx_count: 0,
            })),
            held: Rc::new(Cell::new(false)),
            reads_held: Rc::new(Cell::new(false)),
            chain_id,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Deploys a mock minter owned by `owner` and returns its EVM address.
    pub fn deploy_minter(&self, owner: &Address, params: MinterParams) -> Address {
        let mut inner = self.inner.borrow_mut();
        let code_id = inner.minter_code_id;
        let msg = InstantiateMsg {
            owner: to_chain_addr(owner).to_string(),
            denom: NATIVE_DENOM.to_string(),
            max_supply: params.max_supply,
            hype_cost: params.hype_cost,
            max_mint_amount: params.max_mint_amount,
        };
        let contract_addr = inner
            .app
            .instantiate_contract(code_id, to_chain_addr(owner), &msg, &[], "minter", None)
            .expect("Failed to instantiate mock minter");

        let mut bytes = [0u8; 20];
        bytes[0] = 0x7d;
        bytes[12..].copy_from_slice(&(inner.contracts.len() as u64 + 1).to_be_bytes());
        let address = Address::from(bytes);
        inner.contracts.insert(address, contract_addr);
        address
    }

    pub fn fund(&self, address: &Address, amount: u128) {
        self.inner
            .borrow_mut()
            .app
            .sudo(SudoMsg::Bank(BankSudo::Mint {
                to_address: to_chain_addr(address).to_string(),
                amount: coins(amount, NATIVE_DENOM),
            }))
            .expect("Failed to fund account");
    }

    pub fn balance(&self, address: &Address) -> u128 {
        self.inner
            .borrow()
            .app
            .wrap()
            .query_balance(to_chain_addr(address), NATIVE_DENOM)
            .map(|coin| coin.amount.u128())
            .unwrap_or_default()
    }

    /// Makes the given reads fail until [`MultiTestChain::clear_read_failures`].
    pub fn fail_reads(&self, msgs: &[QueryMsg]) {
        let mut inner = self.inner.borrow_mut();
        for msg in msgs {
            inner.failing_reads.insert(msg.signature());
        }
    }

    pub fn clear_read_failures(&self) {
        self.inner.borrow_mut().failing_reads.clear();
    }

    /// While held, `wait_for_confirmation` stays pending.
    pub fn hold_confirmations(&self, held: bool) {
        self.held.set(held);
    }

    /// While held, contract reads stay pending.
    pub fn hold_reads(&self, held: bool) {
        self.reads_held.set(held);
    }

    pub fn advance_blocks(&self, blocks: u64) {
        self.inner
            .borrow_mut()
            .app
            .update_block(|block| block.height += blocks);
    }

    /// Executes `request` as `sender`. Requests the node would refuse fail here,
    /// contract errors are recorded as a reverted receipt.
    pub fn submit(&self, sender: &Address, request: &TxRequest) -> Result<PendingTx, TransportError> {
        let mut inner = self.inner.borrow_mut();
        let contract = inner.contract_addr(&request.to)?;
        let sender = to_chain_addr(sender);
        if !request.value.is_zero() && !request.msg.is_payable() {
            return Err(rpc_error(format!(
                "{} is not payable",
                request.msg.signature()
            )));
        }
        let value = Uint128::try_from(request.value).map_err(rpc_error)?;
        let balance = inner
            .app
            .wrap()
            .query_balance(sender.clone(), NATIVE_DENOM)
            .map_err(rpc_error)?
            .amount;
        if balance < value {
            return Err(rpc_error("insufficient funds for gas * price + value"));
        }

        inner.tx_count += 1;
        let hash = format!("0x{:064x}", inner.tx_count);
        let block_number = inner.app.block_info().height;
        let funds = if value.is_zero() {
            vec![]
        } else {
            coins(value.u128(), NATIVE_DENOM)
        };

        let result = inner
            .app
            .execute_contract(sender, contract, &request.msg, &funds);
        let outcome = match result {
            Ok(res) => {
                let transfers = parse_transfers(&res, block_number, &hash);
                inner
                    .transfers
                    .extend(transfers.into_iter().map(|event| (request.to, event)));
                TxOutcome::Included { block_number }
            }
            Err(err) => TxOutcome::Reverted {
                reason: err.root_cause().to_string(),
            },
        };
        inner.receipts.insert(hash.clone(), outcome);
        inner.app.update_block(next_block);
        Ok(PendingTx { hash })
    }
}

fn attribute<'a>(event: &'a Event, key: &str) -> Option<&'a str> {
    event
        .attributes
        .iter()
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.as_str())
}

fn parse_transfers(res: &AppResponse, block_number: u64, tx_hash: &str) -> Vec<TransferEvent> {
    res.events
        .iter()
        .filter(|event| event.ty == "wasm-transfer")
        .filter_map(|event| {
            Some(TransferEvent {
                from: Address::from_str(attribute(event, "from")?).ok()?,
                to: Address::from_str(attribute(event, "to")?).ok()?,
                token_id: Uint256::from_str(attribute(event, "token_id")?).ok()?,
                block_number,
                tx_hash: tx_hash.to_string(),
            })
        })
        .collect()
}

impl ChainProvider for MultiTestChain {
    async fn query(&self, contract: &Address, msg: &QueryMsg) -> Result<Binary, TransportError> {
        while self.reads_held.get() {
            tokio::task::yield_now().await;
        }
        let inner = self.inner.borrow();
        if inner.failing_reads.contains(msg.signature()) {
            return Err(TransportError::Reverted {
                reason: format!("{} unavailable", msg.signature()),
            });
        }
        let contract_addr = inner.contract_addr(contract)?;
        let request: QueryRequest<Empty> = WasmQuery::Smart {
            contract_addr: contract_addr.to_string(),
            msg: to_json_binary(msg).map_err(rpc_error)?,
        }
        .into();
        let raw = to_json_vec(&request).map_err(rpc_error)?;
        match inner.app.raw_query(&raw) {
            SystemResult::Ok(ContractResult::Ok(answer)) => Ok(answer),
            SystemResult::Ok(ContractResult::Err(reason)) => Err(TransportError::Reverted { reason }),
            SystemResult::Err(err) => Err(rpc_error(err)),
        }
    }

    async fn wait_for_confirmation(&self, tx: &PendingTx) -> Result<TxReceipt, TransportError> {
        while self.held.get() {
            tokio::task::yield_now().await;
        }
        let inner = self.inner.borrow();
        match inner.receipts.get(&tx.hash) {
            Some(TxOutcome::Included { block_number }) => Ok(TxReceipt {
                hash: tx.hash.clone(),
                block_number: *block_number,
            }),
            Some(TxOutcome::Reverted { reason }) => Err(TransportError::Reverted {
                reason: reason.clone(),
            }),
            None => Err(rpc_error(format!("transaction {} not found", tx.hash))),
        }
    }

    async fn block_number(&self) -> Result<u64, TransportError> {
        Ok(self.inner.borrow().app.block_info().height)
    }

    async fn transfer_events(
        &self,
        contract: &Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<TransferEvent>, TransportError> {
        let inner = self.inner.borrow();
        inner.contract_addr(contract)?;
        Ok(inner
            .transfers
            .iter()
            .filter(|(emitter, event)| {
                emitter == contract
                    && event.block_number >= from_block
                    && event.block_number <= to_block
            })
            .map(|(_, event)| event.clone())
            .collect())
    }
}
