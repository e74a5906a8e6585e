//! Whole-unit ⇄ smallest-unit conversions
//!
//! Rounding differs on purpose: decimal → integer conversions round to
//! nearest, integer → integer rescaling truncates.

use std::cmp::Ordering;

use aptflow_primitives::{U256, APT_DECIMALS};

use crate::amount::{pow10, Amount};
use crate::UnitError;

/// Convert a whole-unit amount to smallest units, rounding to nearest.
///
/// Floats are multiplied by 10^decimals and then rounded. Decimal text is
/// scaled digit by digit and rounded half up, so `"0.1"` never turns into
/// `9999999`.
pub fn to_smallest_units(amount: impl Into<Amount>, decimals: u32) -> Result<U256, UnitError> {
    amount.into().scale_up_rounded(decimals)
}

/// Convert smallest units to a floating whole-unit value, for display only
pub fn to_whole_units(amount: impl Into<Amount>, decimals: u32) -> Result<f64, UnitError> {
    let exact = format_units(amount, decimals, None)?;
    exact
        .parse::<f64>()
        .map_err(|_| UnitError::InvalidNumber(exact))
}

/// Format smallest units as a fixed-point decimal string.
///
/// Uses `decimals` fractional digits unless `precision` asks for another
/// count; dropped digits round half up.
pub fn format_units(
    amount: impl Into<Amount>,
    decimals: u32,
    precision: Option<u32>,
) -> Result<String, UnitError> {
    let value = amount.into().to_integer()?;
    let digits = precision.unwrap_or(decimals);

    // Re-express the value in units of 10^-digits
    let scaled = match digits.cmp(&decimals) {
        Ordering::Less => {
            let drop = pow10(decimals - digits)?;
            let half = drop / U256::from(2u8);
            value.checked_add(half).ok_or(UnitError::Overflow)? / drop
        }
        Ordering::Equal => value,
        Ordering::Greater => value
            .checked_mul(pow10(digits - decimals)?)
            .ok_or(UnitError::Overflow)?,
    };

    let scale = pow10(digits)?;
    let (whole, frac) = scaled.div_mod(scale);
    if digits == 0 {
        return Ok(whole.to_string());
    }
    Ok(format!(
        "{}.{:0>width$}",
        whole,
        frac.to_string(),
        width = digits as usize
    ))
}

/// Parse user-entered whole-unit text, ignoring thousands separators
pub fn parse_whole_str(s: &str, decimals: u32) -> Result<U256, UnitError> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    to_smallest_units(cleaned, decimals)
}

/// Rescale an integer amount between fixed-point precisions.
///
/// Downscaling is integer division and truncates; upscaling is exact.
pub fn convert_between_decimals(
    amount: impl Into<Amount>,
    from_decimals: u32,
    to_decimals: u32,
) -> Result<U256, UnitError> {
    let value = amount.into().to_integer()?;
    match to_decimals.cmp(&from_decimals) {
        Ordering::Equal => Ok(value),
        Ordering::Greater => value
            .checked_mul(pow10(to_decimals - from_decimals)?)
            .ok_or(UnitError::Overflow),
        Ordering::Less => {
            let divisor = pow10(from_decimals - to_decimals)?;
            let truncated = value / divisor;
            if truncated * divisor != value {
                tracing::debug!(%value, from_decimals, to_decimals, "rescale dropped precision");
            }
            Ok(truncated)
        }
    }
}

/// Whether the amount is a non-negative number. Never fails.
pub fn is_valid_amount(amount: impl Into<Amount>) -> bool {
    amount.into().check_valid().is_ok()
}

/// Order two amounts by exact integer value, whatever their representation
pub fn compare_amounts(a: impl Into<Amount>, b: impl Into<Amount>) -> Result<Ordering, UnitError> {
    let a = a.into().to_integer()?;
    let b = b.into().to_integer()?;
    Ok(a.cmp(&b))
}

/// APT → octas
pub fn apt_to_octas(amount: impl Into<Amount>) -> Result<U256, UnitError> {
    to_smallest_units(amount, APT_DECIMALS)
}

/// Octas → APT, for display only
pub fn octas_to_apt(amount: impl Into<Amount>) -> Result<f64, UnitError> {
    to_whole_units(amount, APT_DECIMALS)
}

/// Octas formatted with 8 fractional digits
pub fn format_apt(amount: impl Into<Amount>) -> Result<String, UnitError> {
    format_units(amount, APT_DECIMALS, None)
}

/// User-entered APT text → octas
pub fn parse_apt(s: &str) -> Result<U256, UnitError> {
    parse_whole_str(s, APT_DECIMALS)
}
