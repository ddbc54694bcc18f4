use tracing::debug;

use crate::{
    error::Error,
    model::{AssetDebtTally, DebtTallies, EligibleUser},
    types::{AmountEventType, CandidateRecord, CandidateUser},
};

/// Outstanding debt (in human units) still treated as fully repaid.
/// Repeated partial repayments leave float noise behind.
pub const DEBT_TOLERANCE: f64 = 0.01;

/// Sums pre-cutoff borrows and repays per asset symbol.
pub fn tally_debt(
    borrows: &[AmountEventType],
    repays: &[AmountEventType],
    cutoff: i64,
) -> Result<DebtTallies, Error> {
    let mut tallies = DebtTallies::new();

    for borrow in borrows {
        let timestamp: i64 = borrow.timestamp.parse()?;
        if timestamp < cutoff {
            let amount: f64 = borrow.amount.parse()?;
            tallies
                .entry(borrow.reserve.symbol.to_owned())
                .or_insert_with(AssetDebtTally::default)
                .borrowed += amount;
        }
    }

    for repay in repays {
        let timestamp: i64 = repay.timestamp.parse()?;
        if timestamp < cutoff {
            let amount: f64 = repay.amount.parse()?;
            tallies
                .entry(repay.reserve.symbol.to_owned())
                .or_insert_with(AssetDebtTally::default)
                .repaid += amount;
        }
    }

    Ok(tallies)
}

pub fn had_no_open_debt_at_cutoff(
    borrows: &[AmountEventType],
    repays: &[AmountEventType],
    cutoff: i64,
) -> Result<bool, Error> {
    let tallies = tally_debt(borrows, repays, cutoff)?;

    for (asset, tally) in &tallies {
        if tally.outstanding() > DEBT_TOLERANCE {
            debug!(
                "Open {} debt at cutoff: {}",
                asset,
                tally.outstanding()
            );
            return Ok(false);
        }
    }

    Ok(true)
}

fn has_recent_activity(user: &CandidateUser) -> bool {
    !user.recent_supplies.is_empty()
        || !user.recent_withdrawals.is_empty()
        || !user.recent_borrows.is_empty()
        || !user.recent_repays.is_empty()
}

fn has_current_debt(user: &CandidateUser) -> bool {
    !user.reserves.is_empty() || !user.variable_debt_reserves.is_empty()
}

pub fn is_dead_liquidity(
    record: &CandidateRecord,
    cutoff: i64,
) -> Result<bool, Error> {
    let user = &record.user;

    if has_recent_activity(user) || has_current_debt(user) {
        return Ok(false);
    }

    if user.historical_token_supplies.is_empty() {
        return Ok(false);
    }

    let last_update_timestamp: i64 = record.last_update_timestamp.parse()?;
    if last_update_timestamp >= cutoff {
        return Ok(false);
    }

    had_no_open_debt_at_cutoff(
        &user.historical_borrows,
        &user.historical_repays,
        cutoff,
    )
}

/// Keeps only the candidates that pass every dead liquidity check.
pub fn select_eligible(
    records: &[CandidateRecord],
    token_symbol: &str,
    cutoff: i64,
) -> Result<Vec<EligibleUser>, Error> {
    let mut users = Vec::new();

    for record in records {
        if !is_dead_liquidity(record, cutoff)? {
            continue;
        }

        users.push(EligibleUser {
            address: record.user.id.to_owned(),
            decimals: record.reserve.decimals,
            token_symbol: token_symbol.to_owned(),
            last_update_timestamp: record.last_update_timestamp.parse()?,
            user_reserve_id: record.id.to_owned(),
        });
    }

    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::fixtures::{candidate, event, CUTOFF};
    use crate::types::{IdType, TimestampedType};

    fn id() -> IdType {
        IdType {
            id: String::from("0x01"),
        }
    }

    #[test]
    fn test_no_events_means_no_debt() {
        assert!(had_no_open_debt_at_cutoff(&[], &[], CUTOFF).unwrap());
    }

    #[test]
    fn test_fully_repaid_debt() {
        let borrows = vec![event("USDC", "100.5", CUTOFF - 500)];
        let repays = vec![
            event("USDC", "50", CUTOFF - 400),
            event("USDC", "50.5", CUTOFF - 300),
        ];
        assert!(had_no_open_debt_at_cutoff(&borrows, &repays, CUTOFF).unwrap());
    }

    #[test]
    fn test_open_debt_on_one_asset() {
        let borrows = vec![
            event("USDC", "10", CUTOFF - 500),
            event("WETH", "1.5", CUTOFF - 500),
        ];
        let repays = vec![event("USDC", "10", CUTOFF - 100)];
        assert!(!had_no_open_debt_at_cutoff(&borrows, &repays, CUTOFF).unwrap());
    }

    #[test]
    fn test_debt_tolerance() {
        let borrows = vec![event("DAI", "100.01", CUTOFF - 10)];
        let repays = vec![event("DAI", "100.005", CUTOFF - 5)];
        assert!(had_no_open_debt_at_cutoff(&borrows, &repays, CUTOFF).unwrap());

        let borrows = vec![event("DAI", "100.02", CUTOFF - 10)];
        let repays = vec![event("DAI", "100", CUTOFF - 5)];
        assert!(!had_no_open_debt_at_cutoff(&borrows, &repays, CUTOFF).unwrap());
    }

    #[test]
    fn test_debt_tolerance_boundary() {
        let borrows = vec![event("DAI", "0.01", CUTOFF - 10)];
        assert!(had_no_open_debt_at_cutoff(&borrows, &[], CUTOFF).unwrap());

        let borrows = vec![event("DAI", "0.0101", CUTOFF - 10)];
        assert!(!had_no_open_debt_at_cutoff(&borrows, &[], CUTOFF).unwrap());
    }

    #[test]
    fn test_one_sided_tallies() {
        let repays = vec![event("USDT", "25", CUTOFF - 10)];
        let tallies = tally_debt(&[], &repays, CUTOFF).unwrap();
        assert_eq!(
            tallies.get("USDT"),
            Some(&AssetDebtTally {
                borrowed: 0.0,
                repaid: 25.0
            })
        );
        assert!(had_no_open_debt_at_cutoff(&[], &repays, CUTOFF).unwrap());

        let borrows = vec![event("USDT", "25", CUTOFF - 10)];
        assert!(!had_no_open_debt_at_cutoff(&borrows, &[], CUTOFF).unwrap());
    }

    #[test]
    fn test_events_at_or_after_cutoff_are_ignored() {
        let borrows = vec![
            event("USDC", "10", CUTOFF),
            event("USDC", "10", CUTOFF + 1),
        ];
        let tallies = tally_debt(&borrows, &[], CUTOFF).unwrap();
        assert!(tallies.is_empty());
        assert!(had_no_open_debt_at_cutoff(&borrows, &[], CUTOFF).unwrap());
    }

    #[test]
    fn test_malformed_amount_is_an_error() {
        let borrows = vec![event("USDC", "ten", CUTOFF - 1)];
        assert!(matches!(
            had_no_open_debt_at_cutoff(&borrows, &[], CUTOFF),
            Err(Error::FLOAT(_))
        ));
    }

    #[test]
    fn test_dead_liquidity_baseline() {
        assert!(is_dead_liquidity(&candidate("a", "100"), CUTOFF).unwrap());
    }

    #[test]
    fn test_dead_liquidity_each_condition_is_required() {
        let mut recent = candidate("a", "100");
        recent.user.recent_withdrawals.push(id());
        assert!(!is_dead_liquidity(&recent, CUTOFF).unwrap());

        let mutations: [fn(&mut CandidateRecord); 3] = [
            |r| r.user.recent_supplies.push(id()),
            |r| r.user.recent_borrows.push(id()),
            |r| r.user.recent_repays.push(id()),
        ];

        for mutate in mutations {
            let mut record = candidate("a", "100");
            mutate(&mut record);
            assert!(!is_dead_liquidity(&record, CUTOFF).unwrap());
        }

        let mut stable_debt = candidate("a", "100");
        stable_debt.user.reserves.push(id());
        assert!(!is_dead_liquidity(&stable_debt, CUTOFF).unwrap());

        let mut variable_debt = candidate("a", "100");
        variable_debt.user.variable_debt_reserves.push(id());
        assert!(!is_dead_liquidity(&variable_debt, CUTOFF).unwrap());

        let mut no_history = candidate("a", "100");
        no_history.user.historical_token_supplies.clear();
        assert!(!is_dead_liquidity(&no_history, CUTOFF).unwrap());

        let mut fresh = candidate("a", "100");
        fresh.last_update_timestamp = CUTOFF.to_string();
        assert!(!is_dead_liquidity(&fresh, CUTOFF).unwrap());

        let mut open_debt = candidate("a", "100");
        open_debt
            .user
            .historical_borrows
            .push(event("USDC", "5", CUTOFF - 100));
        assert!(!is_dead_liquidity(&open_debt, CUTOFF).unwrap());
    }

    #[test]
    fn test_select_eligible() {
        let mut active = candidate("b", "200");
        active.user.recent_supplies.push(id());
        let mut supplied = candidate("c", "300");
        supplied.user.historical_token_supplies = vec![TimestampedType {
            id: String::from("s"),
            timestamp: (CUTOFF - 10).to_string(),
        }];

        let users = select_eligible(
            &[candidate("a", "100"), active, supplied],
            "USDC",
            CUTOFF,
        )
        .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].address, "0xa");
        assert_eq!(users[0].user_reserve_id, "0xa-usdc");
        assert_eq!(users[0].token_symbol, "USDC");
        assert_eq!(users[0].decimals, 6);
        assert_eq!(users[1].address, "0xc");
    }
}
