//! EIP-1193 wallet transport seam.
//!
//! Browser-injected wallets expose a JSON-RPC style `request` method on a
//! page-global provider object. This crate does not talk to a browser
//! itself; hosting applications (or SDK adapter crates) implement
//! [`Eip1193Provider`] over whatever runtime they have, and the
//! connectors drive the handshake through it.

use std::borrow::Cow;

use alloy_json_rpc::ErrorPayload;
use async_trait::async_trait;
use serde_json::Value;

/// Provider error code: the user rejected the request (EIP-1193).
pub const CODE_USER_REJECTED: i64 = 4001;
/// Provider error code: the requested method is not authorized (EIP-1193).
pub const CODE_UNAUTHORIZED: i64 = 4100;
/// Provider error code: the provider is disconnected from all chains
/// (EIP-1193).
pub const CODE_DISCONNECTED: i64 = 4900;
/// Provider error code: the chain is unknown to the wallet; returned by
/// `wallet_switchEthereumChain` (EIP-3326).
pub const CODE_UNRECOGNIZED_CHAIN: i64 = 4902;

/// A browser-injected wallet transport.
///
/// Implementations forward `method`/`params` pairs to the page provider
/// and surface its result or error payload unchanged; classification of
/// error codes is the connectors' concern.
#[async_trait]
pub trait Eip1193Provider: Send + Sync {
    /// Submits a single wallet RPC request and awaits its outcome.
    ///
    /// # Errors
    ///
    /// Returns the provider-defined error payload when the wallet rejects
    /// the request.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ErrorPayload>;

    /// Whether a wallet provider is present in the hosting environment.
    ///
    /// Returns `false` when no wallet extension is installed; the default
    /// assumes presence.
    fn available(&self) -> bool {
        true
    }
}

/// Builds an [`ErrorPayload`] from a code and message.
///
/// Convenience for transport implementations and tests; the crate itself
/// only ever reads payloads.
#[must_use]
pub fn rpc_error(code: i64, message: impl Into<Cow<'static, str>>) -> ErrorPayload {
    ErrorPayload {
        code,
        message: message.into(),
        data: None,
    }
}

/// Parses an `eth_chainId` hex-quantity response (`"0x..."`) into a
/// numeric chain id.
pub(crate) fn parse_chain_id(value: &Value) -> Option<u64> {
    let hex = value.as_str()?;
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}
