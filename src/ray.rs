use std::str::FromStr;

use bigdecimal::{num_bigint::BigInt, ToPrimitive};

use crate::error::Error;

pub const RAY_DECIMALS: u32 = 27;

/// Basis points of a percent, used to keep two decimals of a percentage
/// exact before converting to floating point.
pub const PERCENT_SCALE: u32 = 10_000;

pub fn ray() -> BigInt {
    BigInt::from(10u8).pow(RAY_DECIMALS)
}

/// Parses a non-negative integer amount as sent by the subgraph.
pub fn parse_amount(value: &str) -> Result<BigInt, Error> {
    let value = value.trim();
    if value.is_empty() || value.starts_with('-') || value.starts_with('+') {
        return Err(Error::ParseAmount(format!(
            "invalid integer amount `{}`",
            value
        )));
    }

    BigInt::from_str(value).map_err(|e| {
        Error::ParseAmount(format!("invalid integer amount `{}`: {}", value, e))
    })
}

/// `scaled_balance * index / RAY`, truncated.
pub fn resolve_balance(scaled_balance: &BigInt, index: &BigInt) -> BigInt {
    scaled_balance * index / ray()
}

pub fn resolve_balance_str(
    scaled_balance: &str,
    index: &str,
) -> Result<BigInt, Error> {
    let scaled_balance = parse_amount(scaled_balance)?;
    let index = parse_amount(index)?;
    Ok(resolve_balance(&scaled_balance, &index))
}

/// `(part * 10000 / whole) / 100`: the integer division happens before any
/// float conversion. A zero `whole` yields 0.
pub fn percentage_of(part: &BigInt, whole: &BigInt) -> f64 {
    if whole == &BigInt::from(0) {
        return 0.0;
    }

    let scaled = part * BigInt::from(PERCENT_SCALE) / whole;
    scaled.to_f64().unwrap_or_default() / 100.0
}
