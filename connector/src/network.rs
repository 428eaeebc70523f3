//! Wallet network-management RPCs: switch to a chain, adding it first
//! when the wallet does not know it.
//!
//! The sub-protocol mirrors what injected wallets expose:
//!
//! 1. `wallet_switchEthereumChain` (EIP-3326) with the hex-encoded
//!    chain id.
//! 2. On the dedicated "unrecognized chain" code (`4902`),
//!    `wallet_addEthereumChain` (EIP-3085) with the full chain
//!    parameters; a successful add also switches the wallet.
//! 3. Any other switch failure is terminal; no add is attempted.

use alloy_json_rpc::ErrorPayload;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::chain::ChainDescriptor;
use crate::eip1193::{CODE_UNRECOGNIZED_CHAIN, Eip1193Provider};

/// Encodes a chain id as the `0x`-prefixed hexadecimal string the wallet
/// RPCs expect.
#[must_use]
pub fn chain_id_hex(chain_id: u64) -> String {
    format!("{chain_id:#x}")
}

/// `wallet_switchEthereumChain` parameter object (EIP-3326).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParams {
    /// Target chain id, hex-encoded.
    pub chain_id: String,
}

impl SwitchChainParams {
    /// Builds the switch request for a chain.
    #[must_use]
    pub fn for_chain(chain: &ChainDescriptor) -> Self {
        Self {
            chain_id: chain_id_hex(chain.chain_id),
        }
    }
}

/// Native currency metadata inside [`AddChainParams`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Display name of the currency.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places.
    pub decimals: u8,
}

/// `wallet_addEthereumChain` parameter object (EIP-3085).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    /// Chain id, hex-encoded.
    pub chain_id: String,
    /// Display name of the chain.
    pub chain_name: String,
    /// Native currency metadata.
    pub native_currency: NativeCurrency,
    /// RPC endpoints the wallet may use for the chain.
    pub rpc_urls: Vec<String>,
    /// Block explorer URLs for the chain.
    pub block_explorer_urls: Vec<String>,
}

impl AddChainParams {
    /// Builds the add request for a chain.
    ///
    /// Wallets display the currency symbol where a name is expected, so
    /// the symbol doubles as the currency name.
    #[must_use]
    pub fn for_chain(chain: &ChainDescriptor) -> Self {
        Self {
            chain_id: chain_id_hex(chain.chain_id),
            chain_name: chain.name.clone(),
            native_currency: NativeCurrency {
                name: chain.currency_symbol.clone(),
                symbol: chain.currency_symbol.clone(),
                decimals: chain.currency_decimals,
            },
            rpc_urls: vec![chain.rpc_url.to_string()],
            block_explorer_urls: vec![chain.explorer_url.to_string()],
        }
    }
}

/// Failure of the network setup sub-protocol.
#[derive(Debug, Clone, Error)]
pub enum SetupError {
    /// No browser-injected wallet transport is available to carry the
    /// network-management RPCs.
    #[error("no injected wallet transport available")]
    NoInjectedWallet,

    /// The wallet rejected the switch request with a terminal code.
    #[error("chain switch rejected: {0}")]
    Switch(ErrorPayload),

    /// The wallet rejected the add-chain fallback.
    #[error("chain add rejected: {0}")]
    Add(ErrorPayload),
}

/// Asks the wallet to move to `chain`, registering the chain with the
/// wallet first when it is unknown there.
///
/// # Errors
///
/// Returns [`SetupError::NoInjectedWallet`] without issuing any request
/// when no injected transport is present, [`SetupError::Switch`] when the
/// wallet rejects the switch for any reason other than an unrecognized
/// chain, and [`SetupError::Add`] when the add-chain fallback fails.
pub async fn setup_network(
    transport: Option<&dyn Eip1193Provider>,
    chain: &ChainDescriptor,
) -> Result<(), SetupError> {
    let Some(transport) = transport else {
        return Err(SetupError::NoInjectedWallet);
    };
    if !transport.available() {
        return Err(SetupError::NoInjectedWallet);
    }

    let switch = SwitchChainParams::for_chain(chain);
    match transport
        .request("wallet_switchEthereumChain", json!([switch]))
        .await
    {
        Ok(_) => {
            tracing::debug!(chain_id = chain.chain_id, "wallet switched chains");
            Ok(())
        }
        Err(err) if err.code == CODE_UNRECOGNIZED_CHAIN => {
            tracing::debug!(
                chain_id = chain.chain_id,
                "chain unknown to wallet, requesting add"
            );
            let add = AddChainParams::for_chain(chain);
            transport
                .request("wallet_addEthereumChain", json!([add]))
                .await
                .map(drop)
                .map_err(SetupError::Add)
        }
        Err(err) => Err(SetupError::Switch(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainRegistry;

    #[test]
    fn chain_id_hex_is_lowercase_and_prefixed() {
        assert_eq!(chain_id_hex(97), "0x61");
        assert_eq!(chain_id_hex(11_155_111), "0xaa36a7");
        assert_eq!(chain_id_hex(1), "0x1");
    }

    #[test]
    fn add_params_follow_the_wallet_wire_shape() {
        let registry = ChainRegistry::testnet();
        let params = AddChainParams::for_chain(registry.get(1).unwrap());
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value["chainId"], "0x61");
        assert_eq!(value["chainName"], "BSC Testnet");
        assert_eq!(value["nativeCurrency"]["name"], "BNB");
        assert_eq!(value["nativeCurrency"]["symbol"], "BNB");
        assert_eq!(value["nativeCurrency"]["decimals"], 18);
        assert_eq!(
            value["rpcUrls"][0],
            "https://data-seed-prebsc-1-s1.binance.org:8545/"
        );
        assert_eq!(value["blockExplorerUrls"][0], "https://testnet.bscscan.com/");
    }

    #[test]
    fn switch_params_carry_only_the_chain_id() {
        let registry = ChainRegistry::testnet();
        let params = SwitchChainParams::for_chain(registry.get(0).unwrap());
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({ "chainId": "0xaa36a7" }));
    }

    #[tokio::test]
    async fn setup_without_transport_fails_before_any_request() {
        let registry = ChainRegistry::testnet();
        let result = setup_network(None, registry.get(0).unwrap()).await;
        assert!(matches!(result, Err(SetupError::NoInjectedWallet)));
    }
}
