pub mod contract;
pub mod error;
pub mod explorer;
pub mod notice;
pub mod ownership;
pub mod session;
pub mod stepper;
pub mod submitter;
pub mod sync;
pub mod transport;

pub use contract::{connect_read_only, connect_with_signer, ContractHandle};
pub use error::{ClientError, TransportError};
pub use notice::{LogNotices, Notice, NoticeLevel, NoticeLog, NoticeSink};
pub use ownership::{check_ownership, AdminAccess, OwnershipGate, OwnershipStatus};
pub use session::{connect_session, WalletSession};
pub use stepper::QuantityStepper;
pub use submitter::{ActionKind, ActionStatus, PendingAction, Submission, TransactionSubmitter};
pub use sync::{total_cost, total_cost_display, Snapshot, ViewStateSynchronizer};
pub use transport::{ChainProvider, NoSigner, PendingTx, Signer, TransferEvent, TxReceipt, TxRequest};
