//! Common error types for primitives

use thiserror::Error;
use crate::address::AddressError;
use crate::hexutil::HexError;

/// Primitive operation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Hex error
    #[error("hex error: {0}")]
    Hex(#[from] HexError),
}
