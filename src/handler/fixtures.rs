use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    error::Error,
    model::{BalanceLookup, BalanceLookups, BalanceSnapshot},
    provider::{BalanceHistorySource, CandidateSource},
    types::{
        AmountEventType, CandidateRecord, CandidateUser, ReserveType,
        SymbolType, TimestampedType,
    },
};

pub const CUTOFF: i64 = 1_666_000_000;
pub const RAY: &str = "1000000000000000000000000000";

pub fn event(symbol: &str, amount: &str, timestamp: i64) -> AmountEventType {
    AmountEventType {
        id: format!("{}-{}", symbol, timestamp),
        timestamp: timestamp.to_string(),
        amount: amount.to_owned(),
        reserve: SymbolType {
            symbol: symbol.to_owned(),
        },
    }
}

/// A position that passes every eligibility check.
pub fn candidate(suffix: &str, scaled_balance: &str) -> CandidateRecord {
    CandidateRecord {
        id: format!("0x{}-usdc", suffix),
        current_a_token_balance: scaled_balance.to_owned(),
        scaled_a_token_balance: scaled_balance.to_owned(),
        last_update_timestamp: (CUTOFF - 1_000).to_string(),
        user: CandidateUser {
            id: format!("0x{}", suffix),
            historical_token_supplies: vec![TimestampedType {
                id: String::from("supply"),
                timestamp: (CUTOFF - 2_000).to_string(),
            }],
            ..Default::default()
        },
        reserve: ReserveType {
            id: String::from("usdc-reserve"),
            symbol: String::from("USDC"),
            decimals: 6,
            underlying_asset: String::from(
                "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            ),
            liquidity_index: RAY.to_owned(),
        },
    }
}

pub fn lookup(
    scaled_balance: &str,
    index: &str,
    snapshot: Option<(&str, &str)>,
) -> BalanceLookup {
    BalanceLookup {
        scaled_balance: scaled_balance.to_owned(),
        liquidity_index: index.to_owned(),
        snapshot: snapshot.map(|(scaled_balance, index)| BalanceSnapshot {
            timestamp: (CUTOFF - 100).to_string(),
            scaled_balance: scaled_balance.to_owned(),
            index: index.to_owned(),
        }),
    }
}

/// In-memory subgraph. Candidate pages are served by `skip`; balance
/// batches containing a key from `failing_keys` fail as a whole.
#[derive(Default)]
pub struct MockSource {
    pub candidates: Vec<CandidateRecord>,
    pub balances: HashMap<String, BalanceLookup>,
    pub failing_keys: Vec<String>,
    pub fail_candidates_at: Option<u32>,
    pub candidate_calls: Mutex<Vec<(u32, u32)>>,
    pub balance_calls: Mutex<Vec<usize>>,
}

impl CandidateSource for MockSource {
    async fn fetch_candidates(
        &self,
        _token_address: &str,
        _cutoff: i64,
        page_size: u32,
        skip: u32,
    ) -> Result<Vec<CandidateRecord>, Error> {
        self.candidate_calls
            .lock()
            .unwrap()
            .push((page_size, skip));

        if self.fail_candidates_at == Some(skip) {
            return Err(Error::GraphQLError(String::from("indexer down")));
        }

        Ok(self
            .candidates
            .iter()
            .skip(skip as usize)
            .take(page_size as usize)
            .cloned()
            .collect())
    }
}

impl BalanceHistorySource for MockSource {
    async fn fetch_historical_balances(
        &self,
        user_reserve_ids: &[String],
        _cutoff: i64,
    ) -> Result<BalanceLookups, Error> {
        self.balance_calls
            .lock()
            .unwrap()
            .push(user_reserve_ids.len());

        if user_reserve_ids
            .iter()
            .any(|id| self.failing_keys.contains(id))
        {
            return Err(Error::GraphQLError(String::from("batch too large")));
        }

        Ok(user_reserve_ids
            .iter()
            .filter_map(|id| {
                self.balances
                    .get(id)
                    .map(|lookup| (id.to_owned(), lookup.clone()))
            })
            .collect())
    }
}
