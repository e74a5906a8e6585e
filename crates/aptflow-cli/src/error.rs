//! CLI error types

use aptflow_bcs::CodecError;
use aptflow_primitives::{AddressError, HexError};
use aptflow_trigger::TriggerError;
use aptflow_units::UnitError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// BCS encoding or decoding failed
    #[error("{0}")]
    Codec(#[from] CodecError),

    /// Unit conversion failed
    #[error("{0}")]
    Units(#[from] UnitError),

    /// Trigger state or observation rejected
    #[error("{0}")]
    Trigger(#[from] TriggerError),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    Hex(#[from] HexError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
