//! Amount inputs in any of their accepted representations

use aptflow_primitives::U256;

use crate::UnitError;

/// Largest supported number of decimals (10^77 < 2^256 < 10^78)
pub const MAX_DECIMALS: u32 = 77;

/// An amount as handed over by a caller
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    /// Floating value, e.g. a number typed into a form
    Float(f64),
    /// Native integer
    Int(i128),
    /// Arbitrary-precision integer
    Big(U256),
    /// Decimal text, e.g. `"1.5"` or `"100000000"`
    Text(String),
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::Int(value.into())
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Int(value.into())
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::Int(value.into())
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::Int(value.into())
    }
}

impl From<i128> for Amount {
    fn from(value: i128) -> Self {
        Amount::Int(value)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount::Big(U256::from(value))
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount::Big(value)
    }
}

impl From<&U256> for Amount {
    fn from(value: &U256) -> Self {
        Amount::Big(*value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Text(value)
    }
}

impl Amount {
    /// Exact non-negative integer value.
    ///
    /// Floats and text must be integral (`"5.0"` is fine, `"5.5"` is not).
    pub fn to_integer(&self) -> Result<U256, UnitError> {
        match self {
            Amount::Float(f) => float_to_integer(*f),
            Amount::Int(n) => {
                if *n < 0 {
                    return Err(UnitError::Negative(n.to_string()));
                }
                Ok(U256::from(n.unsigned_abs()))
            }
            Amount::Big(n) => Ok(*n),
            Amount::Text(s) => {
                if has_exponent(s) {
                    return float_to_integer(parse_float(s)?);
                }
                let text = DecimalText::parse(s)?;
                if text.frac.bytes().any(|b| b != b'0') {
                    return Err(UnitError::NotAnInteger(s.trim().to_string()));
                }
                text.reject_negative(s)?;
                digits_to_u256(&text.whole)
            }
        }
    }

    /// Scale a whole-unit amount to smallest units, rounding to nearest
    pub(crate) fn scale_up_rounded(&self, decimals: u32) -> Result<U256, UnitError> {
        let scale = pow10(decimals)?;
        match self {
            Amount::Float(f) => {
                check_float(*f)?;
                let product = f * 10f64.powi(decimals as i32);
                if !product.is_finite() {
                    return Err(UnitError::Overflow);
                }
                float_to_integer(product.round())
            }
            Amount::Int(_) | Amount::Big(_) => self
                .to_integer()?
                .checked_mul(scale)
                .ok_or(UnitError::Overflow),
            Amount::Text(s) => {
                if has_exponent(s) {
                    return Amount::Float(parse_float(s)?).scale_up_rounded(decimals);
                }
                let text = DecimalText::parse(s)?;
                text.reject_negative(s)?;
                text.scaled_rounded(decimals, scale)
            }
        }
    }

    /// Non-negative and a number, in whatever representation
    pub(crate) fn check_valid(&self) -> Result<(), UnitError> {
        match self {
            Amount::Float(f) => check_float(*f),
            Amount::Int(n) if *n < 0 => Err(UnitError::Negative(n.to_string())),
            Amount::Int(_) | Amount::Big(_) => Ok(()),
            Amount::Text(s) => {
                if has_exponent(s) {
                    return check_float(parse_float(s)?);
                }
                DecimalText::parse(s)?.reject_negative(s)
            }
        }
    }
}

/// 10^decimals, rejecting exponents that overflow 256 bits
pub fn pow10(decimals: u32) -> Result<U256, UnitError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitError::DecimalsTooLarge(decimals));
    }
    let ten = U256::from(10u8);
    Ok((0..decimals).fold(U256::one(), |acc, _| acc * ten))
}

fn check_float(f: f64) -> Result<(), UnitError> {
    if f.is_nan() {
        return Err(UnitError::NotANumber);
    }
    if f < 0.0 {
        return Err(UnitError::Negative(f.to_string()));
    }
    if f.is_infinite() {
        return Err(UnitError::Overflow);
    }
    Ok(())
}

fn float_to_integer(f: f64) -> Result<U256, UnitError> {
    check_float(f)?;
    if f.fract() != 0.0 {
        return Err(UnitError::NotAnInteger(f.to_string()));
    }
    if f == 0.0 {
        return Ok(U256::zero());
    }
    // Display of an integral f64 prints every digit, never an exponent
    U256::from_dec_str(&format!("{:.0}", f)).map_err(|_| UnitError::Overflow)
}

fn has_exponent(s: &str) -> bool {
    s.contains(['e', 'E'])
}

fn parse_float(s: &str) -> Result<f64, UnitError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| UnitError::InvalidNumber(s.trim().to_string()))
}

fn digits_to_u256(digits: &str) -> Result<U256, UnitError> {
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_dec_str(digits).map_err(|_| UnitError::Overflow)
}

/// Sign, whole digits and fraction digits of a plain decimal literal
#[derive(Debug, PartialEq, Eq)]
struct DecimalText {
    negative: bool,
    whole: String,
    frac: String,
}

impl DecimalText {
    fn parse(s: &str) -> Result<Self, UnitError> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("nan") {
            return Err(UnitError::NotANumber);
        }
        let invalid = || UnitError::InvalidNumber(trimmed.to_string());

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid());
        }

        Ok(Self {
            negative,
            whole: whole.trim_start_matches('0').to_string(),
            frac: frac.to_string(),
        })
    }

    fn is_zero(&self) -> bool {
        self.whole.is_empty() && self.frac.bytes().all(|b| b == b'0')
    }

    fn reject_negative(&self, original: &str) -> Result<(), UnitError> {
        if self.negative && !self.is_zero() {
            return Err(UnitError::Negative(original.trim().to_string()));
        }
        Ok(())
    }

    /// whole.frac × 10^decimals, rounded half up at the first dropped digit
    fn scaled_rounded(&self, decimals: u32, scale: U256) -> Result<U256, UnitError> {
        let keep = decimals as usize;
        let whole = digits_to_u256(&self.whole)?
            .checked_mul(scale)
            .ok_or(UnitError::Overflow)?;

        let kept: String = self.frac.chars().chain(std::iter::repeat('0')).take(keep).collect();
        let frac = digits_to_u256(kept.trim_start_matches('0'))?;

        let round_up = self.frac.as_bytes().get(keep).is_some_and(|d| *d >= b'5');
        let mut total = whole.checked_add(frac).ok_or(UnitError::Overflow)?;
        if round_up {
            total = total.checked_add(U256::one()).ok_or(UnitError::Overflow)?;
        }
        Ok(total)
    }
}
