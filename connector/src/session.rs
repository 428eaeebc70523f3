//! Wallet session: chain selection, login/logout coordination, and
//! provider access.
//!
//! [`WalletSession`] is an explicit context object owned by the hosting
//! application; all connection state (selected chain, connector handles,
//! provider cache, active connection) lives here rather than in
//! process-wide globals. Operations take `&mut self`, so the borrow checker
//! serialises connection attempts: two logins can never overlap on the
//! same session.
//!
//! Login and logout follow a best-effort contract: they never return an
//! error. Every classification is logged and surfaced as a structured
//! [`LoginOutcome`] / [`LogoutOutcome`] the caller can match on.

use std::sync::Arc;

use alloy_primitives::Address;

use crate::chain::provider::{ProviderConfig, ProviderFactory, ProviderHandle};
use crate::chain::{ChainDescriptor, ChainRegistry};
use crate::connector::{
    ActivationError, Connector, ConnectorKind, InjectedConnector, PairingTransport,
    QrPairingConnector,
};
use crate::eip1193::Eip1193Provider;
use crate::error::Error;
use crate::network;

/// Structured outcome of a login attempt.
///
/// Login never raises; callers match on this instead of observing logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The wallet authorized the session.
    Connected {
        /// Which connector established the connection.
        connector: ConnectorKind,
        /// The authorized account.
        account: Address,
        /// Chain the wallet is on.
        chain_id: u64,
    },
    /// Login was attempted before any chain was selected.
    ConnectorNotConfigured,
    /// The requested connector has no transport registered.
    MisconfiguredConnector,
    /// No browser wallet extension is present.
    NoWalletAvailable,
    /// The user declined the authorization prompt.
    AuthorizationDenied,
    /// The selected chain is not in the registry.
    UnsupportedNetwork,
    /// The wallet could not be moved to the selected chain.
    NetworkSetupFailed {
        /// Why the setup sub-protocol failed.
        reason: String,
    },
    /// Any other connector failure.
    ConnectorError {
        /// Identifying label of the underlying error.
        name: String,
        /// Human-readable message.
        message: String,
    },
}

impl LoginOutcome {
    /// Returns `true` for [`LoginOutcome::Connected`].
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

/// Structured outcome of a logout.
///
/// Logout always succeeds in ending the session; `Faulted` only records
/// that the underlying deactivation reported an error on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Deactivation completed without error.
    Clean,
    /// Deactivation reported an error; the session is disconnected anyway.
    Faulted {
        /// The logged deactivation failure.
        reason: String,
    },
}

/// The currently active wallet connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Which connector established the connection.
    pub connector: ConnectorKind,
    /// The authorized account.
    pub account: Address,
    /// Chain the wallet is on.
    pub chain_id: u64,
}

/// Connector handles bound to the selected chain; rebuilt, never
/// updated, when the selection changes.
struct ConnectorSet {
    injected: Option<InjectedConnector>,
    qr: Option<QrPairingConnector>,
}

/// Coordinates chain selection, wallet logins, and provider access for
/// one hosting application.
#[allow(missing_debug_implementations)]
pub struct WalletSession {
    registry: ChainRegistry,
    injected: Option<Arc<dyn Eip1193Provider>>,
    pairing: Option<Arc<dyn PairingTransport>>,
    providers: ProviderFactory,
    selected: Option<usize>,
    connectors: Option<ConnectorSet>,
    connection: Option<Connection>,
}

impl WalletSession {
    /// Creates a session over the given chain registry with no wallet
    /// transports registered.
    #[must_use]
    pub fn new(registry: ChainRegistry) -> Self {
        Self {
            registry,
            injected: None,
            pairing: None,
            providers: ProviderFactory::default(),
            selected: None,
            connectors: None,
            connection: None,
        }
    }

    /// Registers the browser-injected wallet transport.
    #[must_use]
    pub fn with_injected(mut self, transport: Arc<dyn Eip1193Provider>) -> Self {
        self.injected = Some(transport);
        self.rebuild_connectors();
        self
    }

    /// Registers the QR-pairing SDK transport.
    #[must_use]
    pub fn with_pairing(mut self, transport: Arc<dyn PairingTransport>) -> Self {
        self.pairing = Some(transport);
        self.rebuild_connectors();
        self
    }

    /// Overrides the provider connection parameters.
    #[must_use]
    pub fn with_provider_config(mut self, config: ProviderConfig) -> Self {
        self.providers = ProviderFactory::new(config);
        self
    }

    /// The registry this session selects chains from.
    #[must_use]
    pub const fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// The currently selected chain, if any.
    #[must_use]
    pub fn selected_chain(&self) -> Option<&ChainDescriptor> {
        self.selected.and_then(|i| self.registry.get(i).ok())
    }

    /// The active wallet connection, if any.
    #[must_use]
    pub const fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// Selects the chain at `index` and rebuilds both connector handles
    /// bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the registry has no such
    /// entry; the prior selection and connector handles stay untouched.
    pub fn select_chain(&mut self, index: usize) -> Result<&ChainDescriptor, Error> {
        self.registry.get(index)?;
        self.selected = Some(index);
        self.rebuild_connectors();
        let chain = self.registry.get(index)?;
        tracing::info!(chain_id = chain.chain_id, chain = %chain.name, "chain selected");
        Ok(chain)
    }

    /// Logs in through the browser-injected wallet.
    ///
    /// Never raises; see [`LoginOutcome`] for the possible results.
    pub async fn login_injected(&mut self) -> LoginOutcome {
        let Some(set) = &self.connectors else {
            tracing::warn!("login attempted before any chain was selected");
            return LoginOutcome::ConnectorNotConfigured;
        };
        match set.injected.clone() {
            Some(connector) => self.run_activation(&connector).await,
            None => {
                tracing::warn!("unable to find a connector, the connector config is wrong");
                LoginOutcome::MisconfiguredConnector
            }
        }
    }

    /// Logs in through the QR-pairing wallet.
    ///
    /// Never raises; see [`LoginOutcome`] for the possible results.
    pub async fn login_qr_pairing(&mut self) -> LoginOutcome {
        let Some(set) = &self.connectors else {
            tracing::warn!("login attempted before any chain was selected");
            return LoginOutcome::ConnectorNotConfigured;
        };
        let connector = set.qr.clone();

        // Selection is validated against the registry, so this holds by
        // construction; kept as a guard against future selection paths.
        let supported = self
            .selected_chain()
            .is_some_and(|c| self.registry.contains(c.chain_id));
        if !supported {
            tracing::warn!("selected network is not supported by the pairing wallet");
            return LoginOutcome::UnsupportedNetwork;
        }

        match connector {
            Some(connector) => self.run_activation(&connector).await,
            None => {
                tracing::warn!("unable to find a connector, the connector config is wrong");
                LoginOutcome::MisconfiguredConnector
            }
        }
    }

    /// Ends the active connection.
    ///
    /// Always disconnects and never raises; a deactivation error is
    /// logged and reported as [`LogoutOutcome::Faulted`].
    pub async fn logout(&mut self) -> LogoutOutcome {
        let Some(connection) = self.connection.take() else {
            tracing::debug!("logout with no active connection");
            return LogoutOutcome::Clean;
        };

        let result = match (&self.connectors, connection.connector) {
            (Some(set), ConnectorKind::Injected) => match &set.injected {
                Some(connector) => connector.deactivate().await,
                None => Ok(()),
            },
            (Some(set), ConnectorKind::QrPairing) => match &set.qr {
                Some(connector) => connector.deactivate().await,
                None => Ok(()),
            },
            (None, _) => Ok(()),
        };

        match result {
            Ok(()) => {
                tracing::info!(connector = %connection.connector, "wallet disconnected");
                LogoutOutcome::Clean
            }
            Err(err) => {
                tracing::warn!(error = %err, "deactivation failed during logout");
                LogoutOutcome::Faulted {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Returns the read-only provider for the selected chain (or the
    /// first registry entry before any selection), cached per chain id.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is empty or the provider cannot
    /// be constructed.
    pub async fn get_provider(&mut self) -> Result<Arc<ProviderHandle>, Error> {
        let chain = self.registry.get(self.selected.unwrap_or(0))?;
        self.providers.get(chain).await
    }

    /// Rebinds both connector handles to the selected chain. Handles are
    /// rebuilt from the registered transports, never mutated in place.
    fn rebuild_connectors(&mut self) {
        let Some(chain) = self.selected.and_then(|i| self.registry.get(i).ok()) else {
            self.connectors = None;
            return;
        };
        self.connectors = Some(ConnectorSet {
            injected: self
                .injected
                .as_ref()
                .map(|t| InjectedConnector::new(Arc::clone(t), chain.chain_id)),
            qr: self
                .pairing
                .as_ref()
                .map(|t| QrPairingConnector::new(Arc::clone(t), chain)),
        });
    }

    /// Shared activation protocol: activate, resolve a chain mismatch
    /// through network setup with a single retried activation, classify
    /// everything else.
    async fn run_activation(&mut self, connector: &dyn Connector) -> LoginOutcome {
        let Some(chain) = self.selected_chain().cloned() else {
            return LoginOutcome::ConnectorNotConfigured;
        };

        match connector.activate().await {
            Ok(activation) => self.record(connector.kind(), activation.account, activation.chain_id),
            Err(ActivationError::UnsupportedChain { required, actual }) => {
                tracing::info!(
                    required,
                    actual,
                    connector = %connector.name(),
                    "chain mismatch, attempting network setup"
                );
                match network::setup_network(self.injected.as_deref(), &chain).await {
                    Ok(()) => match connector.activate().await {
                        Ok(activation) => {
                            self.record(connector.kind(), activation.account, activation.chain_id)
                        }
                        // One retry only; a repeated failure is terminal.
                        Err(err) => self.reject(connector, &err),
                    },
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            chain_id = chain.chain_id,
                            "network setup failed"
                        );
                        LoginOutcome::NetworkSetupFailed {
                            reason: err.to_string(),
                        }
                    }
                }
            }
            Err(err) => self.reject(connector, &err),
        }
    }

    fn record(&mut self, connector: ConnectorKind, account: Address, chain_id: u64) -> LoginOutcome {
        tracing::info!(%connector, %account, chain_id, "wallet connected");
        self.connection = Some(Connection {
            connector,
            account,
            chain_id,
        });
        LoginOutcome::Connected {
            connector,
            account,
            chain_id,
        }
    }

    fn reject(&self, connector: &dyn Connector, err: &ActivationError) -> LoginOutcome {
        match err {
            ActivationError::NoProvider => {
                tracing::warn!(connector = %connector.name(), "no wallet provider found");
                LoginOutcome::NoWalletAvailable
            }
            ActivationError::UserRejected => {
                tracing::warn!(
                    connector = %connector.name(),
                    "authorization denied, please authorize access to the account"
                );
                LoginOutcome::AuthorizationDenied
            }
            ActivationError::UnsupportedChain { required, actual } => {
                tracing::warn!(
                    connector = %connector.name(),
                    required,
                    actual,
                    "wallet stayed on a mismatched chain"
                );
                LoginOutcome::ConnectorError {
                    name: "unsupported_chain".to_owned(),
                    message: err.to_string(),
                }
            }
            ActivationError::Other { name, message } => {
                tracing::warn!(connector = %connector.name(), %name, %message, "connector error");
                LoginOutcome::ConnectorError {
                    name: name.clone(),
                    message: message.clone(),
                }
            }
        }
    }
}
