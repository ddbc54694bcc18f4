use tracing::{debug, info};

use crate::{
    configuration::Config,
    error::Error,
    handler::{balances, eligibility, report},
    model::{Token, TokenReport},
    provider::{BalanceHistorySource, CandidateSource},
    types::CandidateRecord,
};

/// Pages through the candidate source until it returns an empty page.
pub async fn fetch_all_candidates<S: CandidateSource>(
    source: &S,
    token_address: &str,
    cutoff: i64,
    page_size: u32,
) -> Result<Vec<CandidateRecord>, Error> {
    let mut records = Vec::new();
    let mut skip: u32 = 0;

    loop {
        let page = source
            .fetch_candidates(token_address, cutoff, page_size, skip)
            .await?;

        if page.is_empty() {
            break;
        }

        skip += u32::try_from(page.len())?;
        debug!("{} candidates fetched so far", skip);
        records.extend(page);
    }

    Ok(records)
}

pub async fn analyze_token<S>(
    source: &S,
    token: &Token,
    config: &Config,
    cutoff: i64,
    now: i64,
) -> Result<TokenReport, Error>
where
    S: CandidateSource + BalanceHistorySource,
{
    info!("Fetching {} users...", token.symbol);
    let records =
        fetch_all_candidates(source, &token.address, cutoff, config.page_size)
            .await?;
    info!("Found {} potential {} users", records.len(), token.symbol);

    let eligible =
        eligibility::select_eligible(&records, &token.symbol, cutoff)?;
    info!("{} {} users pass the inactivity checks", eligible.len(), token.symbol);

    let resolved =
        balances::fetch_and_resolve(source, eligible, cutoff, config.batch_size)
            .await?;
    let users = report::rank(resolved);
    info!("Found {} dead liquidity {} users", users.len(), token.symbol);

    let csv = report::render(&users, &token.symbol, cutoff, now)?;

    Ok(TokenReport {
        candidates: records.len(),
        users,
        csv,
    })
}
