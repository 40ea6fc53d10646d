use thiserror::Error;

/// Fixed-point decimals used by every token the pool lists.
pub const TOKEN_DECIMALS: u32 = 18;
pub const TOKEN_SCALE_F64: f64 = 1_000_000_000_000_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("empty base-unit amount")]
    Empty,
    #[error("malformed base-unit amount {0:?}")]
    Malformed(String),
}

/// Parses a base-unit integer string such as `"2500000000000000000"`.
pub fn parse_base_units(raw: &str) -> Result<u128, UnitsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::Empty);
    }
    trimmed
        .parse::<u128>()
        .map_err(|_| UnitsError::Malformed(raw.to_string()))
}

/// Lenient form of [`parse_base_units`]. Digit strings past `u128` are
/// approximated and a fractional part is truncated, so `"12.9"` reads as 12
/// base units. Anything else is still malformed.
pub fn parse_base_units_lossy(raw: &str) -> Result<f64, UnitsError> {
    let err = match parse_base_units(raw) {
        Ok(units) => return Ok(units as f64),
        Err(UnitsError::Empty) => return Err(UnitsError::Empty),
        Err(e) => e,
    };
    let trimmed = raw.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return Err(err);
    }
    whole.parse::<f64>().map_err(|_| err)
}

#[inline]
pub fn base_units_to_f64(value: f64, decimals: u32) -> f64 {
    if decimals == TOKEN_DECIMALS {
        value / TOKEN_SCALE_F64
    } else {
        value / 10f64.powi(decimals as i32)
    }
}
