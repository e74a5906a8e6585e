//! CLI configuration management

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::CliError;

/// Endpoints of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEndpoints {
    /// Full-node REST API
    pub fullnode: String,
    /// Indexer GraphQL API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer: Option<String>,
    /// Faucet; never present on mainnet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faucet: Option<String>,
}

impl NetworkEndpoints {
    fn new(fullnode: &str, indexer: &str, faucet: Option<&str>) -> Self {
        Self {
            fullnode: fullnode.to_string(),
            indexer: Some(indexer.to_string()),
            faucet: faucet.map(str::to_string),
        }
    }
}

/// Built-in network endpoints
pub struct NetworkTable;

impl NetworkTable {
    /// Names of the built-in networks
    pub const NAMES: [&'static str; 4] = ["mainnet", "testnet", "devnet", "local"];

    /// Endpoints of a built-in network
    pub fn builtin(name: &str) -> Option<NetworkEndpoints> {
        let endpoints = match name {
            "mainnet" => NetworkEndpoints::new(
                "https://fullnode.mainnet.aptoslabs.com/v1",
                "https://api.mainnet.aptoslabs.com/v1/graphql",
                None,
            ),
            "testnet" => NetworkEndpoints::new(
                "https://fullnode.testnet.aptoslabs.com/v1",
                "https://api.testnet.aptoslabs.com/v1/graphql",
                Some("https://faucet.testnet.aptoslabs.com"),
            ),
            "devnet" => NetworkEndpoints::new(
                "https://fullnode.devnet.aptoslabs.com/v1",
                "https://api.devnet.aptoslabs.com/v1/graphql",
                Some("https://faucet.devnet.aptoslabs.com"),
            ),
            "local" => NetworkEndpoints::new(
                "http://127.0.0.1:8080/v1",
                "http://127.0.0.1:8090/v1/graphql",
                Some("http://127.0.0.1:8081"),
            ),
            _ => return None,
        };
        Some(endpoints)
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default network
    #[serde(default = "default_network")]
    pub network: String,
    /// Full-node URL overriding the network's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_url: Option<String>,
    /// Per-network endpoint overrides and custom networks
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, NetworkEndpoints>,
}

fn default_network() -> String {
    "mainnet".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: default_network(),
            node_url: None,
            networks: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".aptflow"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from file or return default
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("ignoring malformed config file: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), CliError> {
        let path = Self::config_path()
            .ok_or_else(|| CliError::Config("cannot determine config path".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Every known network name: built-ins first, then custom ones
    pub fn network_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NetworkTable::NAMES.iter().map(|n| n.to_string()).collect();
        names.extend(
            self.networks
                .keys()
                .filter(|k| !NetworkTable::NAMES.contains(&k.as_str()))
                .cloned(),
        );
        names
    }

    /// Endpoints of a network, user overrides first
    pub fn endpoints(&self, name: &str) -> Result<NetworkEndpoints, CliError> {
        self.networks
            .get(name)
            .cloned()
            .or_else(|| NetworkTable::builtin(name))
            .ok_or_else(|| CliError::Config(format!("unknown network: {}", name)))
    }

    /// Endpoints of the selected network with the node URL override applied
    pub fn active_endpoints(&self) -> Result<NetworkEndpoints, CliError> {
        let mut endpoints = self.endpoints(&self.network)?;
        if let Some(url) = &self.node_url {
            endpoints.fullnode = url.clone();
        }
        Ok(endpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.network, "mainnet");
        assert!(config.node_url.is_none());
        let endpoints = config.active_endpoints().unwrap();
        assert_eq!(endpoints.fullnode, "https://fullnode.mainnet.aptoslabs.com/v1");
        assert!(endpoints.faucet.is_none());
    }

    #[test]
    fn test_builtin_networks() {
        for name in NetworkTable::NAMES {
            let endpoints = NetworkTable::builtin(name).unwrap();
            assert!(endpoints.fullnode.ends_with("/v1"));
            assert_eq!(endpoints.faucet.is_none(), name == "mainnet");
        }
        assert!(NetworkTable::builtin("moonnet").is_none());
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("network"));
        assert!(!toml.contains("node_url"));
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            network = "testnet"
            node_url = "http://example.com:8080/v1"

            [networks.testnet]
            fullnode = "http://mirror.example.com/v1"

            [networks.staging]
            fullnode = "http://staging.example.com/v1"
            faucet = "http://staging.example.com/faucet"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.network, "testnet");
        assert_eq!(
            config.endpoints("testnet").unwrap().fullnode,
            "http://mirror.example.com/v1"
        );
        assert_eq!(
            config.active_endpoints().unwrap().fullnode,
            "http://example.com:8080/v1"
        );
        assert_eq!(config.network_names().last().unwrap(), "staging");
        assert_eq!(config.network_names().len(), 5);
    }

    #[test]
    fn test_unknown_network() {
        let config = Config {
            network: "moonnet".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.active_endpoints(), Err(CliError::Config(_))));
    }
}
