pub mod balances;
pub mod dead_liquidity;
pub mod eligibility;
pub mod report;
pub mod report_file;

#[cfg(test)]
pub(crate) mod fixtures;
