//! QR-pairing wallet connector.
//!
//! Remote wallets pair through a scannable code instead of a browser
//! extension. The pairing handshake itself (relay transport, session
//! approval, code rendering) lives in an external SDK behind the
//! [`PairingTransport`] seam; the connector restricts the proposal to
//! the selected chain's RPC endpoint and classifies the outcome.

use std::collections::BTreeMap;
use std::sync::Arc;

use alloy_json_rpc::ErrorPayload;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{Activation, ActivationError, Connector, ConnectorKind};
use crate::chain::ChainDescriptor;

/// Default relay polling interval in milliseconds.
pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 12_000;

/// Pairing proposal handed to the QR SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingProposal {
    /// Chain ids the session is restricted to.
    pub chains: Vec<u64>,
    /// RPC endpoint per chain id, for the remote wallet's use.
    pub rpc: BTreeMap<u64, Url>,
    /// Whether the SDK should render a scannable code.
    pub qrcode: bool,
    /// Relay polling interval in milliseconds.
    pub polling_interval_ms: u64,
}

impl PairingProposal {
    /// Builds a proposal restricted to a single chain.
    #[must_use]
    pub fn for_chain(chain: &ChainDescriptor) -> Self {
        Self {
            chains: vec![chain.chain_id],
            rpc: BTreeMap::from([(chain.chain_id, chain.rpc_url.clone())]),
            qrcode: true,
            polling_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
        }
    }
}

/// Approved pairing session, as reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingApproval {
    /// The account the remote wallet exposed.
    pub account: Address,
    /// Chain the remote wallet settled on.
    pub chain_id: u64,
}

/// The QR-pairing SDK seam.
///
/// Implementations own the relay connection and the user-facing pairing
/// flow; errors surface as provider-style payloads so the same code
/// classification applies as for injected wallets.
#[async_trait]
pub trait PairingTransport: Send + Sync {
    /// Proposes a session and suspends until the remote wallet approves
    /// or the user abandons the pairing.
    ///
    /// # Errors
    ///
    /// Returns the SDK's error payload when pairing fails.
    async fn propose(&self, proposal: &PairingProposal) -> Result<PairingApproval, ErrorPayload>;

    /// Tears down the paired session.
    ///
    /// # Errors
    ///
    /// Returns the SDK's error payload when the teardown fails.
    async fn disconnect(&self) -> Result<(), ErrorPayload>;
}

/// Connector for a QR-paired remote wallet, restricted to the selected
/// chain's RPC endpoint.
#[derive(Clone)]
pub struct QrPairingConnector {
    transport: Arc<dyn PairingTransport>,
    proposal: PairingProposal,
}

impl QrPairingConnector {
    /// Creates a connector over the given pairing SDK, bound to `chain`.
    pub fn new(transport: Arc<dyn PairingTransport>, chain: &ChainDescriptor) -> Self {
        Self {
            transport,
            proposal: PairingProposal::for_chain(chain),
        }
    }

    /// The proposal this connector pairs with.
    #[must_use]
    pub const fn proposal(&self) -> &PairingProposal {
        &self.proposal
    }
}

impl std::fmt::Debug for QrPairingConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrPairingConnector")
            .field("proposal", &self.proposal)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Connector for QrPairingConnector {
    fn name(&self) -> &str {
        "qr-pairing"
    }

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::QrPairing
    }

    async fn activate(&self) -> Result<Activation, ActivationError> {
        let approval = self
            .transport
            .propose(&self.proposal)
            .await
            .map_err(|e| ActivationError::from_payload(&e))?;

        // The proposal names exactly one chain; a wallet that settles
        // elsewhere is a mismatch even if the SDK approved the session.
        let required = self.proposal.chains[0];
        if approval.chain_id != required {
            return Err(ActivationError::UnsupportedChain {
                required,
                actual: approval.chain_id,
            });
        }

        Ok(Activation {
            account: approval.account,
            chain_id: approval.chain_id,
        })
    }

    async fn deactivate(&self) -> Result<(), ErrorPayload> {
        self.transport.disconnect().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainRegistry;

    #[test]
    fn proposal_is_restricted_to_one_chain() {
        let registry = ChainRegistry::testnet();
        let chain = registry.get(1).unwrap();
        let proposal = PairingProposal::for_chain(chain);

        assert_eq!(proposal.chains, vec![97]);
        assert_eq!(proposal.rpc.len(), 1);
        assert_eq!(proposal.rpc[&97], chain.rpc_url);
        assert!(proposal.qrcode);
        assert_eq!(proposal.polling_interval_ms, DEFAULT_POLLING_INTERVAL_MS);
    }

    #[test]
    fn proposal_serialises_with_wire_casing() {
        let registry = ChainRegistry::testnet();
        let proposal = PairingProposal::for_chain(registry.get(0).unwrap());
        let value = serde_json::to_value(&proposal).unwrap();

        assert_eq!(value["chains"][0], 11_155_111);
        assert_eq!(value["qrcode"], true);
        assert!(value.get("pollingIntervalMs").is_some());
        assert_eq!(value["rpc"]["11155111"], "https://rpc.sepolia.org/");
    }
}
