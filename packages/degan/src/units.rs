//! Conversion between human readable decimal strings and fixed-point token amounts.
//!
//! Token amounts are kept on chain as integers of the smallest unit. With [`DECIMALS`]
//! fractional digits `"1.5"` is stored as `1_500_000_000_000_000_000`. Clients scale values
//! entered by users with [`parse_units`] before submitting them, and rescale amounts read back
//! from the contract with [`format_units`].
use cosmwasm_std::{StdError, StdResult, Uint128};

/// Number of fractional digits of the DGN token
pub const DECIMALS: u8 = 18;

fn invalid_amount(value: &str) -> StdError {
    StdError::generic_err(format!("Invalid decimal amount: '{}'", value))
}

/// Parses decimal string like `"12.5"` into amount of smallest units, given number of
/// fractional digits. Fails if there are more fractional digits than `decimals`, or if the
/// value doesn't fit into `Uint128`.
pub fn parse_units(value: &str, decimals: u8) -> StdResult<Uint128> {
    let value = value.trim();
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid_amount(value));
    }

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid_amount(value));
    }

    if fraction.len() > decimals as usize {
        return Err(StdError::generic_err(format!(
            "Too many decimal places in '{}', at most {} allowed",
            value, decimals
        )));
    }

    let unit = 10u128
        .checked_pow(decimals as u32)
        .map(Uint128::new)
        .ok_or_else(|| {
            StdError::generic_err(format!("Unsupported number of decimals: {}", decimals))
        })?;

    let whole = if whole.is_empty() {
        Uint128::zero()
    } else {
        whole
            .parse::<u128>()
            .map(Uint128::new)
            .map_err(|_| invalid_amount(value))?
    };

    let fraction = format!("{:0<width$}", fraction, width = decimals as usize);
    let fraction = if fraction.is_empty() {
        Uint128::zero()
    } else {
        fraction
            .parse::<u128>()
            .map(Uint128::new)
            .map_err(|_| invalid_amount(value))?
    };

    Ok(whole.checked_mul(unit)?.checked_add(fraction)?)
}

/// Formats amount of smallest units as decimal string. Trailing zeros of fractional part are
/// trimmed, but at least one fractional digit is always kept, so `10^18` with 18 decimals
/// becomes `"1.0"`.
pub fn format_units(amount: Uint128, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;

    let digits = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}
