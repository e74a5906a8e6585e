//! Events emitted by the detector

use std::fmt;
use std::str::FromStr;

use aptflow_primitives::AccountAddress;
use serde::{Deserialize, Serialize};

/// Which way a balance moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Balance went up
    Increase,
    /// Balance went down
    Decrease,
}

/// Event kinds, for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// [`TriggerEvent::NewBlock`]
    NewBlock,
    /// [`TriggerEvent::NewEpoch`]
    NewEpoch,
    /// [`TriggerEvent::BalanceChanged`]
    BalanceChanged,
    /// [`TriggerEvent::TransactionConfirmed`]
    TransactionConfirmed,
}

impl EventKind {
    /// All kinds
    pub const ALL: [EventKind; 4] = [
        EventKind::NewBlock,
        EventKind::NewEpoch,
        EventKind::BalanceChanged,
        EventKind::TransactionConfirmed,
    ];

    /// snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::NewBlock => "new_block",
            EventKind::NewEpoch => "new_epoch",
            EventKind::BalanceChanged => "balance_changed",
            EventKind::TransactionConfirmed => "transaction_confirmed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| format!("unknown event kind: {}", s))
    }
}

/// A change observed between two polls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TriggerEvent {
    /// Ledger height increased
    NewBlock {
        /// Height at the previous poll
        previous_height: u64,
        /// Current height
        height: u64,
        /// Blocks produced since the previous poll
        blocks_elapsed: u64,
    },
    /// Epoch increased
    NewEpoch {
        /// Epoch at the previous poll
        previous_epoch: u64,
        /// Current epoch
        epoch: u64,
    },
    /// A tracked balance moved
    BalanceChanged {
        /// Account address
        address: AccountAddress,
        /// Coin type
        coin_type: String,
        /// Previous balance, smallest units
        previous: String,
        /// Current balance, smallest units
        current: String,
        /// Increase or decrease
        direction: Direction,
        /// Absolute change, smallest units
        delta: String,
        /// Absolute change in whole units
        delta_display: String,
    },
    /// A tracked transaction left the mempool
    TransactionConfirmed {
        /// Transaction hash
        hash: String,
        /// Executed successfully
        success: bool,
        /// VM status text
        #[serde(skip_serializing_if = "Option::is_none")]
        vm_status: Option<String>,
        /// Ledger version
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<u64>,
    },
}

impl TriggerEvent {
    /// Kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            TriggerEvent::NewBlock { .. } => EventKind::NewBlock,
            TriggerEvent::NewEpoch { .. } => EventKind::NewEpoch,
            TriggerEvent::BalanceChanged { .. } => EventKind::BalanceChanged,
            TriggerEvent::TransactionConfirmed { .. } => EventKind::TransactionConfirmed,
        }
    }
}
