//! Snapshots of chain state supplied by the host on each poll

use aptflow_primitives::{APTOS_COIN_TYPE, APT_DECIMALS};
use serde::{Deserialize, Serialize};

/// Everything the host fetched for one poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Current ledger height (latest block)
    pub ledger_height: u64,
    /// Current epoch
    pub epoch: u64,
    /// Tracked balances
    #[serde(default)]
    pub balances: Vec<BalanceObservation>,
    /// Tracked transactions
    #[serde(default)]
    pub transactions: Vec<TransactionObservation>,
}

/// Balance of one coin held by one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceObservation {
    /// Account address, any accepted spelling
    pub address: String,
    /// Coin type; the native coin when omitted
    #[serde(default = "default_coin_type")]
    pub coin_type: String,
    /// Amount in smallest units, as the decimal string the node returns
    pub amount: String,
    /// Decimals of the coin, used to render deltas
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl BalanceObservation {
    /// Balance of the native coin
    pub fn native(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            coin_type: default_coin_type(),
            amount: amount.into(),
            decimals: APT_DECIMALS,
        }
    }
}

/// Status of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Not yet committed
    Pending,
    /// Committed and executed successfully
    Success,
    /// Committed but aborted
    Failure,
}

impl TransactionStatus {
    /// Whether the transaction has left the mempool
    pub fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// A tracked transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionObservation {
    /// Transaction hash
    pub hash: String,
    /// Current status
    pub status: TransactionStatus,
    /// VM status text once committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_status: Option<String>,
    /// Ledger version once committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

fn default_coin_type() -> String {
    APTOS_COIN_TYPE.to_string()
}

fn default_decimals() -> u32 {
    APT_DECIMALS
}
