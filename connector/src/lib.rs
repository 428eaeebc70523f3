//! Wallet connection adapter for EVM chains.
//!
//! A thin coordination layer between a hosting application and wallet
//! providers: a browser-injected wallet (EIP-1193) and a QR-paired
//! remote wallet. The crate selects a target chain from a registry,
//! constructs a read-only RPC provider for it, and exposes login/logout
//! operations that activate and deactivate a wallet connection,
//! resolving chain mismatches by asking the wallet to switch or add
//! networks.
//!
//! The wallet SDKs themselves stay outside the crate: hosting
//! applications implement the [`Eip1193Provider`] and
//! [`PairingTransport`] seams over whatever runtime they have.
//!
//! ```no_run
//! use wallet_connector::{ChainRegistry, WalletSession};
//!
//! # async fn demo() -> Result<(), wallet_connector::Error> {
//! let mut session = WalletSession::new(ChainRegistry::testnet());
//! let chain = session.select_chain(0)?;
//! tracing::info!(chain = %chain.name, "selected");
//!
//! let provider = session.get_provider().await?;
//! tracing::info!(endpoint = %provider.endpoint(), "provider ready");
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod connector;
pub mod eip1193;
pub mod error;
pub mod network;
pub mod session;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use chain::provider::{ProviderConfig, ProviderFactory, ProviderHandle};
pub use chain::{ChainDescriptor, ChainRegistry, default_config, load_registry};
pub use connector::{
    Activation, ActivationError, Connector, ConnectorKind, InjectedConnector, PairingApproval,
    PairingProposal, PairingTransport, QrPairingConnector,
};
pub use eip1193::Eip1193Provider;
pub use error::Error;
pub use session::{Connection, LoginOutcome, LogoutOutcome, WalletSession};
