//! Per-coin denomination

use aptflow_primitives::{U256, APT_DECIMALS};

use crate::amount::{pow10, Amount};
use crate::convert::{format_units, to_smallest_units, to_whole_units};
use crate::UnitError;

/// Decimals of a coin and the matching scale factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinDenomination {
    decimals: u32,
    scale: U256,
}

impl CoinDenomination {
    /// Denomination for a coin with the given decimals, as read from its metadata
    pub fn new(decimals: u32) -> Result<Self, UnitError> {
        Ok(Self {
            decimals,
            scale: pow10(decimals)?,
        })
    }

    /// The native token (8 decimals)
    pub fn native() -> Self {
        Self {
            decimals: APT_DECIMALS,
            scale: U256::from(aptflow_primitives::OCTAS_PER_APT),
        }
    }

    /// Fractional digits
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Smallest units per whole token
    pub fn smallest_per_whole(&self) -> U256 {
        self.scale
    }

    /// Whole units → smallest units, rounded
    pub fn to_smallest(&self, amount: impl Into<Amount>) -> Result<U256, UnitError> {
        to_smallest_units(amount, self.decimals)
    }

    /// Smallest units → whole units, for display
    pub fn to_whole(&self, amount: impl Into<Amount>) -> Result<f64, UnitError> {
        to_whole_units(amount, self.decimals)
    }

    /// Smallest units → fixed-point text
    pub fn format(&self, amount: impl Into<Amount>) -> Result<String, UnitError> {
        format_units(amount, self.decimals, None)
    }
}

impl Default for CoinDenomination {
    fn default() -> Self {
        Self::native()
    }
}
