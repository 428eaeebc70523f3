//! Blockchain chain descriptors, registry, configuration, and providers.
//!
//! - [`config`] — chain-id keyed TOML (de)serialisation of a registry.
//! - [`provider`] — read-only RPC provider handles and their per-chain cache.

mod config;
pub mod provider;

pub use self::config::*;

use url::Url;

use crate::error::Error;

/// Parameters of a single supported chain.
///
/// Immutable once constructed; two descriptors describe the same network
/// exactly when their [`chain_id`](Self::chain_id) matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDescriptor {
    /// Numeric EIP-155 chain id.
    pub chain_id: u64,
    /// JSON-RPC endpoint. The URL scheme decides the provider transport
    /// (`ws`/`wss` for socket streaming, `http`/`https` for request/response).
    pub rpc_url: Url,
    /// Block explorer base URL.
    pub explorer_url: Url,
    /// Human-readable network name.
    pub name: String,
    /// Native currency ticker symbol.
    pub currency_symbol: String,
    /// Native currency decimal places.
    pub currency_decimals: u8,
}

/// Ordered, read-only table of supported chains.
///
/// Chains are addressed by index; appending entries is the only supported
/// way to add networks. The built-in [`testnet`](Self::testnet) and
/// [`mainnet`](Self::mainnet) presets each carry an Ethereum network and
/// a BNB Smart Chain network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainRegistry(Vec<ChainDescriptor>);

impl ChainRegistry {
    /// Creates a registry from an ordered list of descriptors.
    #[must_use]
    pub const fn new(chains: Vec<ChainDescriptor>) -> Self {
        Self(chains)
    }

    /// Returns the descriptor at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if the registry has no such entry.
    pub fn get(&self, index: usize) -> Result<&ChainDescriptor, Error> {
        self.0.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.0.len(),
        })
    }

    /// Returns `true` if any entry carries the given chain id.
    #[must_use]
    pub fn contains(&self, chain_id: u64) -> bool {
        self.0.iter().any(|c| c.chain_id == chain_id)
    }

    /// Number of registered chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the registered descriptors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChainDescriptor> {
        self.0.iter()
    }

    /// The testnet preset: Sepolia and BSC testnet.
    #[must_use]
    pub fn testnet() -> Self {
        Self(vec![
            descriptor(
                11_155_111,
                "https://rpc.sepolia.org",
                "https://sepolia.etherscan.io",
                "Sepolia",
                "ETH",
            ),
            descriptor(
                97,
                "https://data-seed-prebsc-1-s1.binance.org:8545",
                "https://testnet.bscscan.com",
                "BSC Testnet",
                "BNB",
            ),
        ])
    }

    /// The mainnet preset: Ethereum mainnet and BNB Smart Chain.
    #[must_use]
    pub fn mainnet() -> Self {
        Self(vec![
            descriptor(
                1,
                "https://eth.llamarpc.com",
                "https://etherscan.io",
                "Ethereum Mainnet",
                "ETH",
            ),
            descriptor(
                56,
                "https://bsc-dataseed1.ninicoin.io",
                "https://bscscan.com",
                "BNB Smart Chain",
                "BNB",
            ),
        ])
    }
}

impl<'a> IntoIterator for &'a ChainRegistry {
    type Item = &'a ChainDescriptor;
    type IntoIter = std::slice::Iter<'a, ChainDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a preset descriptor. All native currencies in the presets use
/// 18 decimals.
fn descriptor(
    chain_id: u64,
    rpc_url: &str,
    explorer_url: &str,
    name: &str,
    symbol: &str,
) -> ChainDescriptor {
    ChainDescriptor {
        chain_id,
        rpc_url: Url::parse(rpc_url).expect("preset RPC URL is valid"),
        explorer_url: Url::parse(explorer_url).expect("preset explorer URL is valid"),
        name: name.to_owned(),
        currency_symbol: symbol.to_owned(),
        currency_decimals: 18,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_index() {
        let registry = ChainRegistry::testnet();
        assert_eq!(registry.get(0).unwrap().chain_id, 11_155_111);
        assert_eq!(registry.get(1).unwrap().chain_id, 97);
    }

    #[test]
    fn lookup_out_of_range() {
        let registry = ChainRegistry::testnet();
        match registry.get(2) {
            Err(Error::IndexOutOfRange { index: 2, len: 2 }) => {}
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn contains_by_chain_id() {
        let registry = ChainRegistry::testnet();
        assert!(registry.contains(97));
        assert!(!registry.contains(1));
    }

    #[test]
    fn presets_have_two_entries() {
        assert_eq!(ChainRegistry::testnet().len(), 2);
        assert_eq!(ChainRegistry::mainnet().len(), 2);
    }

    #[test]
    fn empty_registry() {
        let registry = ChainRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get(0).is_err());
    }
}
