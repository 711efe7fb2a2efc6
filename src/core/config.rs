// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Node configuration.
//!
//! ## Format (TOML)
//!
//! ```text
//! [node]
//! name = "warpledger-a"
//! data_dir = "./data"
//! log_json = false
//!
//! [chain]
//! network_id = 1337
//! chain_id_hex = "<64 hex chars>"
//! symbol = "WLG"
//! decimals = 9
//!
//! [[genesis.allocations]]
//! address = "<base58>"
//! balance = 1000000
//! ```

use crate::core::genesis::Genesis;
use crate::core::types::{Address, Id};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// Config errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Cannot read config file.
    #[error("read config")]
    Read,
    /// Cannot parse TOML.
    #[error("parse config: {0}")]
    Parse(String),
    /// `chain_id_hex` is not a 32-byte hex id.
    #[error("bad chain id")]
    ChainId,
    /// Genesis address is not a 32-byte base58 address.
    #[error("bad genesis address {0}")]
    Address(String),
}

/// `[node]` section.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NodeConfig {
    /// Human-readable node name, used in logs.
    #[serde(default = "default_name")]
    pub name: String,
    /// sled directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Emit JSON log lines instead of compact text.
    #[serde(default)]
    pub log_json: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_json: false,
        }
    }
}

/// `[chain]` section.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ChainConfig {
    /// Network id stamped on outgoing warp messages.
    pub network_id: u32,
    /// Local chain id (hex).
    pub chain_id_hex: String,
    /// Native asset symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Native asset decimals.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

/// One genesis allocation.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AllocationConfig {
    /// Owner (base58).
    pub address: String,
    /// Native balance.
    pub balance: u64,
}

/// `[genesis]` section.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GenesisConfig {
    /// Initial balances.
    #[serde(default)]
    pub allocations: Vec<AllocationConfig>,
}

/// Whole config file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Node settings.
    #[serde(default)]
    pub node: NodeConfig,
    /// Chain identity.
    pub chain: ChainConfig,
    /// Genesis allocations.
    #[serde(default)]
    pub genesis: GenesisConfig,
}

fn default_name() -> String {
    "warpledger".into()
}

fn default_data_dir() -> String {
    "./data".into()
}

fn default_symbol() -> String {
    "WLG".into()
}

fn default_decimals() -> u8 {
    9
}

impl LedgerConfig {
    /// Read and parse `path`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|_| ConfigError::Read)?;
        Self::parse(&raw)
    }

    /// Parse a TOML document and validate the ids it carries.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let cfg: LedgerConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.message().to_string()))?;
        cfg.chain_id()?;
        cfg.genesis()?;
        Ok(cfg)
    }

    /// Local chain id.
    pub fn chain_id(&self) -> Result<Id, ConfigError> {
        self.chain
            .chain_id_hex
            .parse::<Id>()
            .map_err(|_| ConfigError::ChainId)
    }

    /// Genesis built from `[chain]` and `[genesis]`.
    pub fn genesis(&self) -> Result<Genesis, ConfigError> {
        let allocations = self
            .genesis
            .allocations
            .iter()
            .map(|a| {
                a.address
                    .parse::<Address>()
                    .map(|addr| (addr, a.balance))
                    .map_err(|_| ConfigError::Address(a.address.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Genesis {
            symbol: self.chain.symbol.clone(),
            decimals: self.chain.decimals,
            allocations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ADDRESS_LEN;

    fn doc(chain_hex: &str, address: &str) -> String {
        format!(
            r#"
[node]
name = "a"
log_json = true

[chain]
network_id = 7
chain_id_hex = "{chain_hex}"

[[genesis.allocations]]
address = "{address}"
balance = 100
"#
        )
    }

    #[test]
    fn parses_with_defaults() {
        let chain = Id::digest(b"chain");
        let owner = Address::from_bytes([3u8; ADDRESS_LEN]);
        let cfg = LedgerConfig::parse(&doc(&chain.to_string(), &owner.to_string())).unwrap();
        assert_eq!(cfg.node.name, "a");
        assert_eq!(cfg.node.data_dir, "./data");
        assert!(cfg.node.log_json);
        assert_eq!(cfg.chain.network_id, 7);
        assert_eq!(cfg.chain_id().unwrap(), chain);
        let g = cfg.genesis().unwrap();
        assert_eq!(g.symbol, "WLG");
        assert_eq!(g.allocations, vec![(owner, 100)]);
    }

    #[test]
    fn rejects_bad_ids() {
        let owner = Address::from_bytes([3u8; ADDRESS_LEN]).to_string();
        assert!(matches!(
            LedgerConfig::parse(&doc("abcd", &owner)),
            Err(ConfigError::ChainId)
        ));
        let chain = Id::digest(b"chain").to_string();
        assert!(matches!(
            LedgerConfig::parse(&doc(&chain, "0OIl")),
            Err(ConfigError::Address(_))
        ));
        assert!(matches!(
            LedgerConfig::parse("[chain]\nnetwork_id = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warpledger.toml");
        let chain = Id::digest(b"chain").to_string();
        let owner = Address::from_bytes([3u8; ADDRESS_LEN]).to_string();
        fs::write(&path, doc(&chain, &owner)).unwrap();
        assert!(LedgerConfig::load(path.to_str().unwrap()).is_ok());
        assert!(matches!(
            LedgerConfig::load("/nonexistent/warpledger.toml"),
            Err(ConfigError::Read)
        ));
    }
}
