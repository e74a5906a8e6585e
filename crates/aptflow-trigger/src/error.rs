//! Trigger errors

use aptflow_primitives::AddressError;
use aptflow_units::UnitError;
use thiserror::Error;

/// Errors raised while comparing an observation against stored state
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Tracked address is malformed
    #[error("invalid tracked address: {0}")]
    Address(#[from] AddressError),

    /// Balance is not a non-negative integer amount
    #[error("invalid balance for {key}: {source}")]
    Amount {
        /// `address/coin_type` of the offending balance
        key: String,
        /// Underlying conversion error
        #[source]
        source: UnitError,
    },

    /// The same balance appears twice in one observation
    #[error("balance {0} observed more than once")]
    DuplicateBalance(String),

    /// Stored state or observation is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
