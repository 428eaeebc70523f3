//! Read-only chain provider handles and their per-chain cache.
//!
//! A [`ProviderHandle`] wraps an [`alloy`](alloy_provider) provider bound
//! to one chain's RPC endpoint. The transport is derived from the
//! endpoint URL scheme by the underlying connection builder (`ws`/`wss`
//! streams over a socket, `http`/`https` uses request/response).
//!
//! [`ProviderFactory`] caches handles per chain id, so a handle is
//! created at most once per chain unless the cache is explicitly
//! [`reset`](ProviderFactory::reset).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use alloy_network::Ethereum;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use tokio::time::timeout;
use url::Url;

use super::ChainDescriptor;
use crate::error::Error;

/// Connection parameters applied when constructing provider handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Upper bound on establishing the RPC connection.
    pub connect_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// A lazily-created, shared, read-only handle to a chain RPC endpoint.
#[derive(Clone)]
pub struct ProviderHandle {
    chain_id: u64,
    endpoint: Url,
    inner: DynProvider,
}

impl ProviderHandle {
    /// Connects a handle for the given chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint scheme is unsupported or the
    /// connection cannot be established within `connect_timeout`.
    pub async fn connect(chain: &ChainDescriptor, connect_timeout: Duration) -> Result<Self, Error> {
        let connecting = ProviderBuilder::new()
            .network::<Ethereum>()
            .connect(chain.rpc_url.as_str());
        let provider = timeout(connect_timeout, connecting)
            .await
            .map_err(|_| {
                Error::chain(format!(
                    "connecting to '{}' timed out after {connect_timeout:?}",
                    chain.rpc_url
                ))
            })?
            .map_err(|e| {
                Error::chain_with(
                    format!("failed to connect provider for chain {}", chain.chain_id),
                    e,
                )
            })?;

        Ok(Self {
            chain_id: chain.chain_id,
            endpoint: chain.rpc_url.clone(),
            inner: provider.erased(),
        })
    }

    /// Chain id this handle is bound to.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// RPC endpoint this handle is bound to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The underlying provider, for read-only chain queries.
    #[must_use]
    pub const fn provider(&self) -> &DynProvider {
        &self.inner
    }
}

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("chain_id", &self.chain_id)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

/// Builds and caches [`ProviderHandle`]s, keyed by chain id.
#[derive(Debug, Default)]
pub struct ProviderFactory {
    config: ProviderConfig,
    cache: HashMap<u64, Arc<ProviderHandle>>,
}

impl ProviderFactory {
    /// Creates a factory with the given connection parameters.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    /// Returns the cached handle for the chain, constructing one first if
    /// none exists. Repeated calls for the same chain return the identical
    /// shared handle.
    ///
    /// # Errors
    ///
    /// Returns an error if a new handle needs to be constructed and the
    /// connection fails.
    pub async fn get(&mut self, chain: &ChainDescriptor) -> Result<Arc<ProviderHandle>, Error> {
        if let Some(handle) = self.cache.get(&chain.chain_id) {
            return Ok(Arc::clone(handle));
        }
        let handle = Arc::new(ProviderHandle::connect(chain, self.config.connect_timeout).await?);
        self.cache.insert(chain.chain_id, Arc::clone(&handle));
        Ok(handle)
    }

    /// Drops all cached handles; the next [`get`](Self::get) per chain
    /// reconnects.
    pub fn reset(&mut self) {
        self.cache.clear();
    }
}
