//! Chain registry TOML (de)serialisation, keyed by chain id.
//!
//! The registry is stored as a TOML map whose keys are decimal EIP-155
//! chain ids and whose document order is preserved, since chains are
//! addressed by index:
//!
//! ```toml
//! [chains.11155111]
//! name = "Sepolia"
//! rpc_url = "https://rpc.sepolia.org"
//! explorer_url = "https://sepolia.etherscan.io"
//! currency_symbol = "ETH"
//! currency_decimals = 18
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ChainDescriptor, ChainRegistry};
use crate::error::Error;

/// TOML-level entry for one chain; the chain id lives in the map key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChainEntry {
    name: String,
    rpc_url: Url,
    explorer_url: Url,
    currency_symbol: String,
    #[serde(default = "default_decimals")]
    currency_decimals: u8,
}

const fn default_decimals() -> u8 {
    18
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    chains: ChainRegistry,
}

impl Serialize for ChainRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        #[derive(Serialize)]
        struct ChainEntryRef<'a> {
            name: &'a str,
            rpc_url: &'a Url,
            explorer_url: &'a Url,
            currency_symbol: &'a str,
            currency_decimals: u8,
        }

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for chain in self {
            let entry = ChainEntryRef {
                name: &chain.name,
                rpc_url: &chain.rpc_url,
                explorer_url: &chain.explorer_url,
                currency_symbol: &chain.currency_symbol,
                currency_decimals: chain.currency_decimals,
            };
            map.serialize_entry(&chain.chain_id.to_string(), &entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChainRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt;

        use serde::de::{MapAccess, Visitor};

        struct ChainsVisitor;

        impl<'de> Visitor<'de> for ChainsVisitor {
            type Value = ChainRegistry;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of chain ids to chain parameters")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut chains = Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some(key) = access.next_key::<String>()? {
                    let chain_id: u64 = key.parse().map_err(|e| {
                        serde::de::Error::custom(format!("invalid chain id key '{key}': {e}"))
                    })?;
                    let entry: ChainEntry = access.next_value()?;
                    chains.push(ChainDescriptor {
                        chain_id,
                        rpc_url: entry.rpc_url,
                        explorer_url: entry.explorer_url,
                        name: entry.name,
                        currency_symbol: entry.currency_symbol,
                        currency_decimals: entry.currency_decimals,
                    });
                }

                Ok(ChainRegistry::new(chains))
            }
        }

        deserializer.deserialize_map(ChainsVisitor)
    }
}

/// Load a chain registry from a TOML file at the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved, read, or parsed.
pub fn load_registry(path: &Path) -> Result<ChainRegistry, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::config_with(format!("failed to resolve config path '{}'", path.display()), e)
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    let file: RegistryFile = toml::from_str(&content).map_err(|e| {
        Error::config_with(
            format!("failed to parse TOML config '{}'", config_path.display()),
            e,
        )
    })?;
    Ok(file.chains)
}

/// Generate a default TOML configuration template carrying the testnet
/// preset.
#[must_use]
pub fn default_config() -> String {
    String::from(
        r#"# Wallet connector chain registry.
#
# Chains are addressed by their position in this file; append entries
# to add networks. Key format: decimal EIP-155 chain id.

[chains.11155111]
name = "Sepolia"
rpc_url = "https://rpc.sepolia.org"
explorer_url = "https://sepolia.etherscan.io"
currency_symbol = "ETH"
currency_decimals = 18

[chains.97]
name = "BSC Testnet"
rpc_url = "https://data-seed-prebsc-1-s1.binance.org:8545"
explorer_url = "https://testnet.bscscan.com"
currency_symbol = "BNB"
currency_decimals = 18
"#,
    )
}
