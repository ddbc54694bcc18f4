use bigdecimal::num_bigint::BigInt;

use crate::{
    error::Error,
    helpers::{to_fixed, to_human, unix_to_iso_date, years_between},
    model::ResolvedUser,
    ray::percentage_of,
};

pub const DEFAULT_DECIMALS: u32 = 6;

/// Largest current balance first. `sort_by` is stable, so equal balances
/// keep their incoming order.
pub fn rank(mut users: Vec<ResolvedUser>) -> Vec<ResolvedUser> {
    users.sort_by(|a, b| b.current_balance.cmp(&a.current_balance));
    users
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTotals {
    pub users: usize,
    pub current_balance: BigInt,
    pub historical_balance: BigInt,
    pub yield_earned: BigInt,
    pub yield_percentage: f64,
}

/// Aggregates weighted by balance: the average yield is total yield over
/// total history, not the mean of per-user percentages.
pub fn totals(users: &[ResolvedUser]) -> ReportTotals {
    let current_balance: BigInt =
        users.iter().map(|u| &u.current_balance).sum();
    let historical_balance: BigInt =
        users.iter().map(|u| &u.historical_balance).sum();
    let yield_earned: BigInt = users.iter().map(|u| &u.yield_earned).sum();
    let yield_percentage = percentage_of(&yield_earned, &historical_balance);

    ReportTotals {
        users: users.len(),
        current_balance,
        historical_balance,
        yield_earned,
        yield_percentage,
    }
}

pub fn render(
    users: &[ResolvedUser],
    token_symbol: &str,
    cutoff: i64,
    now: i64,
) -> Result<String, Error> {
    let cutoff_date = unix_to_iso_date(cutoff)?;
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        String::from("User Address"),
        format!("Current {} Balance", token_symbol),
        format!("{} {} Balance", cutoff_date, token_symbol),
        String::from("Exact Yield Earned"),
        String::from("Yield %"),
        String::from("Years Inactive"),
        String::from("Historical Date"),
    ])
    .map_err(|e| Error::ReportError(format!("CSV write error: {}", e)))?;

    for user in users {
        wtr.write_record([
            user.address.to_owned(),
            to_human(&user.current_balance, user.decimals),
            to_human(&user.historical_balance, user.decimals),
            to_human(&user.yield_earned, user.decimals),
            format!("{:.2}", user.yield_percentage),
            to_fixed(years_between(user.last_update_timestamp, now), 1),
            unix_to_iso_date(user.historical_timestamp)?,
        ])
        .map_err(|e| Error::ReportError(format!("CSV write error: {}", e)))?;
    }

    let decimals = users.first().map_or(DEFAULT_DECIMALS, |u| u.decimals);
    let totals = totals(users);

    wtr.write_record([
        format!("TOTALS ({} users)", totals.users),
        to_human(&totals.current_balance, decimals),
        to_human(&totals.historical_balance, decimals),
        to_human(&totals.yield_earned, decimals),
        format!("{:.2}", totals.yield_percentage),
        String::new(),
        String::new(),
    ])
    .map_err(|e| Error::ReportError(format!("CSV write error: {}", e)))?;

    let csv_data = wtr
        .into_inner()
        .map_err(|e| Error::ReportError(format!("CSV writer error: {}", e)))?;
    let csv_string = String::from_utf8(csv_data)?;

    Ok(csv_string.trim_end_matches(&['\r', '\n'][..]).to_owned())
}
