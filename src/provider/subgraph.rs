use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    configuration::Config,
    error::{self, Error},
    model::{BalanceLookup, BalanceLookups, BalanceSnapshot},
    provider::queries::{DEAD_LIQUIDITY_USERS, USER_RESERVES_HISTORY},
    types::{
        CandidatePage, CandidateRecord, GraphQLBody, GraphQLRequest,
        ReserveHistoryPage,
    },
};

/// Paginated source of positions that might be dead liquidity.
pub trait CandidateSource {
    fn fetch_candidates(
        &self,
        token_address: &str,
        cutoff: i64,
        page_size: u32,
        skip: u32,
    ) -> impl Future<Output = Result<Vec<CandidateRecord>, Error>> + Send;
}

/// Exact balances for a bounded batch of user reserves.
pub trait BalanceHistorySource {
    fn fetch_historical_balances(
        &self,
        user_reserve_ids: &[String],
        cutoff: i64,
    ) -> impl Future<Output = Result<BalanceLookups, Error>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidateVariables<'a> {
    token_address: &'a str,
    cutoff: i64,
    first: u32,
    skip: u32,
    lookback: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryVariables<'a> {
    user_reserve_ids: &'a [String],
    cutoff: i64,
}

#[derive(Debug)]
pub struct Subgraph {
    pub config: Config,
    pub http: Client,
}

impl Subgraph {
    pub fn new(config: Config) -> Result<Subgraph, Error> {
        let http = match Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(error::Error::ReqwestError(e));
            },
        };

        Ok(Subgraph { config, http })
    }

    async fn query<V, T>(&self, query: &str, variables: V) -> Result<T, Error>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = self
            .http
            .post(&self.config.subgraph_url)
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?
            .error_for_status()?
            .json::<GraphQLBody<T>>()
            .await?;

        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let messages = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<String>>()
                    .join("; ");
                return Err(Error::GraphQLError(messages));
            }
        }

        body.data.ok_or_else(|| {
            Error::GraphQLError(String::from("response without data"))
        })
    }
}

impl CandidateSource for Subgraph {
    async fn fetch_candidates(
        &self,
        token_address: &str,
        cutoff: i64,
        page_size: u32,
        skip: u32,
    ) -> Result<Vec<CandidateRecord>, Error> {
        let variables = CandidateVariables {
            token_address,
            cutoff,
            first: page_size,
            skip,
            lookback: self.config.history_lookback,
        };

        let page: CandidatePage =
            self.query(DEAD_LIQUIDITY_USERS, variables).await?;
        debug!(
            "Fetched {} candidates for {} (skip {})",
            page.user_reserves.len(),
            token_address,
            skip
        );

        Ok(page.user_reserves)
    }
}

impl BalanceHistorySource for Subgraph {
    async fn fetch_historical_balances(
        &self,
        user_reserve_ids: &[String],
        cutoff: i64,
    ) -> Result<BalanceLookups, Error> {
        let variables = HistoryVariables {
            user_reserve_ids,
            cutoff,
        };

        let page: ReserveHistoryPage =
            self.query(USER_RESERVES_HISTORY, variables).await?;
        let mut lookups = BalanceLookups::new();

        for item in page.user_reserves {
            let snapshot = item.historical_balance.into_iter().next().map(
                |history| BalanceSnapshot {
                    timestamp: history.timestamp,
                    scaled_balance: history.scaled_a_token_balance,
                    index: history.index,
                },
            );

            lookups.insert(
                item.id,
                BalanceLookup {
                    scaled_balance: item.scaled_a_token_balance,
                    liquidity_index: item.reserve.liquidity_index,
                    snapshot,
                },
            );
        }

        Ok(lookups)
    }
}
