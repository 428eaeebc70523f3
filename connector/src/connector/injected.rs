//! Browser-injected wallet connector.

use std::sync::Arc;

use alloy_json_rpc::ErrorPayload;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Activation, ActivationError, Connector, ConnectorKind};
use crate::eip1193::{Eip1193Provider, parse_chain_id};

/// Connector for a browser-injected wallet, restricted to a single
/// supported chain id.
///
/// Activation requests account authorization (`eth_requestAccounts`) and
/// then verifies the wallet's chain (`eth_chainId`); a wallet on any
/// other chain fails with [`ActivationError::UnsupportedChain`], which
/// the session resolves through network setup.
#[derive(Clone)]
pub struct InjectedConnector {
    transport: Arc<dyn Eip1193Provider>,
    supported_chain_id: u64,
}

impl InjectedConnector {
    /// Creates a connector over the given transport, restricted to
    /// `supported_chain_id`.
    pub fn new(transport: Arc<dyn Eip1193Provider>, supported_chain_id: u64) -> Self {
        Self {
            transport,
            supported_chain_id,
        }
    }

    /// The single chain id this connector accepts.
    #[must_use]
    pub const fn supported_chain_id(&self) -> u64 {
        self.supported_chain_id
    }
}

impl std::fmt::Debug for InjectedConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectedConnector")
            .field("supported_chain_id", &self.supported_chain_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Connector for InjectedConnector {
    fn name(&self) -> &str {
        "injected"
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Injected
    }

    async fn activate(&self) -> Result<Activation, ActivationError> {
        if !self.transport.available() {
            return Err(ActivationError::NoProvider);
        }

        let accounts = self
            .transport
            .request("eth_requestAccounts", Value::Null)
            .await
            .map_err(|e| ActivationError::from_payload(&e))?;
        let account: Address = accounts
            .get(0)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                ActivationError::invalid_response(format!(
                    "eth_requestAccounts returned no usable account: {accounts}"
                ))
            })?;

        let reported = self
            .transport
            .request("eth_chainId", Value::Null)
            .await
            .map_err(|e| ActivationError::from_payload(&e))?;
        let actual = parse_chain_id(&reported).ok_or_else(|| {
            ActivationError::invalid_response(format!(
                "eth_chainId returned a malformed quantity: {reported}"
            ))
        })?;

        if actual != self.supported_chain_id {
            return Err(ActivationError::UnsupportedChain {
                required: self.supported_chain_id,
                actual,
            });
        }

        Ok(Activation {
            account,
            chain_id: actual,
        })
    }

    async fn deactivate(&self) -> Result<(), ErrorPayload> {
        // Injected wallets keep the page authorized until told otherwise;
        // revoking the accounts permission is the closest thing to a
        // disconnect the provider API offers.
        self.transport
            .request("wallet_revokePermissions", json!([{ "eth_accounts": {} }]))
            .await
            .map(drop)
    }
}
