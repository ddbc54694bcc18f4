use bigdecimal::num_bigint::BigInt;
use tracing::{debug, error, info};

use crate::{
    error::Error,
    model::{BalanceLookups, EligibleUser, ResolvedUser},
    provider::BalanceHistorySource,
    ray::{percentage_of, resolve_balance_str},
};

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Looks balances up batch by batch. A failing batch is logged and its
/// users simply end up missing from the result.
pub async fn fetch_balances<S: BalanceHistorySource>(
    source: &S,
    user_reserve_ids: &[String],
    cutoff: i64,
    batch_size: usize,
) -> BalanceLookups {
    let mut lookups = BalanceLookups::new();
    let batch_size = batch_size.max(1);

    for (index, batch) in user_reserve_ids.chunks(batch_size).enumerate() {
        match source.fetch_historical_balances(batch, cutoff).await {
            Ok(items) => {
                lookups.extend(items);
            },
            Err(e) => {
                error!(
                    "Error fetching balances for batch {} ({} users): {}",
                    index,
                    batch.len(),
                    e
                );
            },
        }
    }

    lookups
}

/// Computes current and cutoff balances for every user that has a
/// snapshot, keeping only positive history with non-negative yield.
pub fn resolve_users(
    users: Vec<EligibleUser>,
    lookups: &BalanceLookups,
) -> Result<Vec<ResolvedUser>, Error> {
    let zero = BigInt::from(0);
    let mut resolved = Vec::with_capacity(users.len());

    for user in users {
        let Some(lookup) = lookups.get(&user.user_reserve_id) else {
            continue;
        };
        let Some(snapshot) = &lookup.snapshot else {
            continue;
        };

        let current_balance = resolve_balance_str(
            &lookup.scaled_balance,
            &lookup.liquidity_index,
        )?;
        debug!(
            "{} balance snapshot taken at {}",
            user.user_reserve_id, snapshot.timestamp
        );
        let historical_balance =
            resolve_balance_str(&snapshot.scaled_balance, &snapshot.index)?;
        let yield_earned = &current_balance - &historical_balance;

        if historical_balance <= zero || yield_earned < zero {
            continue;
        }

        let yield_percentage =
            percentage_of(&yield_earned, &historical_balance);

        resolved.push(ResolvedUser {
            address: user.address,
            decimals: user.decimals,
            token_symbol: user.token_symbol,
            user_reserve_id: user.user_reserve_id,
            last_update_timestamp: user.last_update_timestamp,
            historical_timestamp: user.last_update_timestamp,
            current_balance,
            historical_balance,
            yield_earned,
            yield_percentage,
        });
    }

    Ok(resolved)
}

pub async fn fetch_and_resolve<S: BalanceHistorySource>(
    source: &S,
    users: Vec<EligibleUser>,
    cutoff: i64,
    batch_size: usize,
) -> Result<Vec<ResolvedUser>, Error> {
    let ids = users
        .iter()
        .map(|user| user.user_reserve_id.to_owned())
        .collect::<Vec<String>>();

    let lookups = fetch_balances(source, &ids, cutoff, batch_size).await;
    info!("Fetched balances for {} of {} users", lookups.len(), ids.len());

    resolve_users(users, &lookups)
}
