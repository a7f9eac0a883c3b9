use minter_types::ChainConfig;
use tracing::warn;

use crate::contract::{connect_with_signer, ContractHandle};
use crate::error::{ClientError, TransportError};
use crate::transport::{ChainProvider, Signer};

/// The wallet/auth provider the user logs in with.
#[allow(async_fn_in_trait)]
pub trait WalletSession {
    type Signer: Signer;

    fn is_authenticated(&self) -> bool;

    /// Signer for the active wallet, may prompt a switch to `chain_id`.
    async fn get_signer(&self, chain_id: u64) -> Result<Self::Signer, TransportError>;

    async fn login(&self) -> Result<(), TransportError>;

    async fn logout(&self) -> Result<(), TransportError>;
}

/// Builds a signer-bound handle for the logged in wallet.
pub async fn connect_session<W: WalletSession, P: ChainProvider>(
    session: &W,
    config: ChainConfig,
    provider: P,
) -> Result<ContractHandle<P, W::Signer>, ClientError> {
    if !session.is_authenticated() {
        return Err(ClientError::WalletNotConnected {});
    }
    let signer = session
        .get_signer(config.chain_id)
        .await
        .map_err(|err| {
            warn!(error = %err, "wallet refused to provide a signer");
            ClientError::WalletUnavailable {
                reason: err.to_string(),
            }
        })?;
    connect_with_signer(config, provider, signer).await
}
