use bigdecimal::num_bigint::BigInt;
use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Error;

pub const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;
pub const HUMAN_FRACTION_DIGITS: usize = 6;

#[derive(Debug)]
pub enum Formatter {
    Str(String),
    Number(i64),
}

/// Replaces `$0`, `$1`, ... in `parser` with the matching argument.
pub fn formatter(mut parser: String, args: &[Formatter]) -> String {
    for (index, value) in args.iter().enumerate() {
        let key = format!("${}", index);
        match value {
            Formatter::Str(s) => {
                parser = parser.replace(key.as_str(), s);
            },
            Formatter::Number(n) => {
                parser = parser.replace(key.as_str(), &n.to_string());
            },
        }
    }
    parser
}

/// Splits `(a,b),(c,d)` into `["a,b", "c,d"]`.
pub fn parse_tuple_string(data: String) -> Result<Vec<String>, Error> {
    let data = data.trim();
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let str = data.strip_prefix('(').ok_or_else(|| {
        Error::ConfigurationError(format!(
            "tuple list `{}` must start with `(`",
            data
        ))
    })?;
    let splited = str.split(",(");
    let mut items: Vec<String> = Vec::new();

    for c in splited {
        if let Some(index) = c.find(')') {
            let tuple_data = &c[0..index];
            items.push(tuple_data.to_owned());
        }
    }

    Ok(items)
}

/// Formats a smallest-unit amount with at most six fractional digits.
/// Digits past the sixth are cut, never rounded.
pub fn to_human(amount: &BigInt, decimals: u32) -> String {
    let zero = BigInt::from(0);
    let (sign, amount) = if amount < &zero {
        ("-", -amount.clone())
    } else {
        ("", amount.clone())
    };

    let base = BigInt::from(10u8).pow(decimals);
    let whole = &amount / &base;
    let frac = &amount % &base;

    let mut frac_str = format!(
        "{:0>width$}",
        frac.to_string(),
        width = decimals as usize
    );
    frac_str.truncate(HUMAN_FRACTION_DIGITS.min(decimals as usize));

    let value = format!("{}{}.{}", sign, whole, frac_str);
    let value = value.trim_end_matches('0');
    value.trim_end_matches('.').to_owned()
}

pub fn unix_to_date(timestamp: i64) -> Result<NaiveDate, Error> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| {
            Error::DecodeDateTimeError(format!(
                "timestamp {} out of range",
                timestamp
            ))
        })
}

pub fn unix_to_iso_date(timestamp: i64) -> Result<String, Error> {
    Ok(unix_to_date(timestamp)?.format("%Y-%m-%d").to_string())
}

pub fn years_between(from: i64, to: i64) -> f64 {
    (to - from) as f64 / SECONDS_PER_YEAR as f64
}

/// Fixed-point rendering that rounds ties away from zero (`2.25` -> `2.3`).
/// `format!("{:.1}")` would round ties to even.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    format!("{:.*}", digits, (value * scale).round() / scale)
}

/// Subgraph scalars (`BigInt`, `BigDecimal`, `Int`) arrive either as JSON
/// strings or as JSON numbers depending on the field.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
