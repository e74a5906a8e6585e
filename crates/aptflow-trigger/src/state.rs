//! State persisted by the host between polls

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::TriggerError;

/// What the previous poll saw
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerState {
    /// Set once the first poll has recorded a baseline
    #[serde(default)]
    pub initialized: bool,
    /// Last seen ledger height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_height: Option<u64>,
    /// Last seen epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u64>,
    /// Balances in smallest units keyed by [`balance_key`]
    #[serde(default)]
    pub balances: BTreeMap<String, String>,
    /// Hashes of transactions already reported as final
    #[serde(default)]
    pub settled: BTreeSet<String>,
}

impl TriggerState {
    /// Parse state saved by [`TriggerState::to_json`]; empty input is a fresh state
    pub fn from_json(s: &str) -> Result<Self, TriggerError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String, TriggerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Stored balance for a normalized address and coin type
    pub fn balance(&self, address: &str, coin_type: &str) -> Option<&str> {
        self.balances
            .get(&balance_key(address, coin_type))
            .map(String::as_str)
    }
}

/// Map key of a tracked balance
pub fn balance_key(address: &str, coin_type: &str) -> String {
    format!("{}/{}", address, coin_type)
}
