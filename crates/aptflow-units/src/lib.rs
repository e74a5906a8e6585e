//! # aptflow-units
//!
//! Conversions between whole-token amounts and integer smallest units.
//!
//! Whole → smallest rounds to nearest; smallest → smallest rescaling
//! truncates; smallest → whole floats are for display only and must never
//! be submitted on chain.
//!
//! ```rust
//! use aptflow_units::{apt_to_octas, format_apt, compare_amounts};
//! use std::cmp::Ordering;
//!
//! let octas = apt_to_octas("1.5").unwrap();
//! assert_eq!(format_apt(octas).unwrap(), "1.50000000");
//! assert_eq!(compare_amounts("1", 2.0).unwrap(), Ordering::Less);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod amount;
mod convert;
mod denomination;
mod error;

pub use amount::{pow10, Amount, MAX_DECIMALS};
pub use convert::{
    apt_to_octas, compare_amounts, convert_between_decimals, format_apt, format_units,
    is_valid_amount, octas_to_apt, parse_apt, parse_whole_str, to_smallest_units, to_whole_units,
};
pub use denomination::CoinDenomination;
pub use error::UnitError;

pub use aptflow_primitives::{APT_DECIMALS, U256};
