pub mod chain;
pub mod mock_minter;
pub mod wallet;

pub use chain::{to_chain_addr, MinterParams, MultiTestChain, GENESIS_HEIGHT, NATIVE_DENOM};
pub use wallet::{MockSession, MockWallet};
