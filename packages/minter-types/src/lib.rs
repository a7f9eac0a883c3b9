pub mod amount;
pub mod config;
pub mod msg;
pub mod types;

pub use amount::{format_native, parse_native, AmountError, NATIVE_DECIMALS};
pub use config::{ChainConfig, ConfigurationError};
pub use msg::{ExecuteMsg, QueryMsg};
pub use types::{MintState, StateField};
