//! Wallet connectors.
//!
//! A connector is an authorization channel to one wallet kind, bound to
//! the currently selected chain. Connectors implement the [`Connector`]
//! trait, providing a consistent activate/deactivate API; the
//! [`session`](crate::session) module drives them and classifies their
//! failures.

mod injected;
mod qr;

pub use injected::InjectedConnector;
pub use qr::{PairingApproval, PairingProposal, PairingTransport, QrPairingConnector};

use alloy_json_rpc::ErrorPayload;
use alloy_primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

use crate::eip1193::{CODE_DISCONNECTED, CODE_USER_REJECTED};

/// Wallet connector variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    /// Browser-injected wallet (page-global provider object).
    Injected,
    /// Remote wallet paired through a scannable code.
    QrPairing,
}

impl std::fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Injected => write!(f, "injected"),
            Self::QrPairing => write!(f, "qr-pairing"),
        }
    }
}

/// Result of a successful wallet activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    /// The authorized account.
    pub account: Address,
    /// Chain the wallet is on after activation.
    pub chain_id: u64,
}

/// Classified wallet activation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    /// The wallet is on a different chain than the connector requires.
    #[error("wallet is on chain {actual}, chain {required} required")]
    UnsupportedChain {
        /// Chain id the connector is restricted to.
        required: u64,
        /// Chain id the wallet reported.
        actual: u64,
    },

    /// No wallet provider is present in the hosting environment.
    #[error("no wallet provider found")]
    NoProvider,

    /// The user declined the authorization prompt.
    #[error("user rejected the authorization request")]
    UserRejected,

    /// Any other wallet failure, with its identifying label and message.
    #[error("{name}: {message}")]
    Other {
        /// Identifying label of the underlying error.
        name: String,
        /// Human-readable message.
        message: String,
    },
}

impl ActivationError {
    /// Classifies a raw wallet error payload by its provider error code.
    pub(crate) fn from_payload(err: &ErrorPayload) -> Self {
        match err.code {
            CODE_USER_REJECTED => Self::UserRejected,
            CODE_DISCONNECTED => Self::NoProvider,
            code => Self::Other {
                name: format!("eip1193({code})"),
                message: err.message.to_string(),
            },
        }
    }

    /// An [`ActivationError::Other`] for a response the connector could
    /// not interpret.
    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::Other {
            name: "invalid_response".to_owned(),
            message: message.into(),
        }
    }
}

/// Base trait for wallet connectors.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Short connector name for diagnostics.
    fn name(&self) -> &str;

    /// The connector variant.
    fn kind(&self) -> ConnectorKind;

    /// Runs the authorization handshake with the wallet, suspending until
    /// the wallet responds or the user dismisses the prompt.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ActivationError`] when the handshake fails.
    async fn activate(&self) -> Result<Activation, ActivationError>;

    /// Tears down the wallet authorization.
    ///
    /// # Errors
    ///
    /// Returns the raw wallet error payload; callers decide whether that
    /// is fatal.
    async fn deactivate(&self) -> Result<(), ErrorPayload>;
}
