//! Dead liquidity domain records
//!
//! Every stage of the pipeline consumes one collection of these and
//! produces the next one. Nothing here is shared or mutated after
//! construction.

use std::collections::HashMap;

use bigdecimal::num_bigint::BigInt;

// =============================================================================
// CONFIGURATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub address: String,
    pub symbol: String,
}

// =============================================================================
// ELIGIBILITY
// =============================================================================

/// Borrowed and repaid totals for one asset, before the cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssetDebtTally {
    pub borrowed: f64,
    pub repaid: f64,
}

impl AssetDebtTally {
    pub fn outstanding(&self) -> f64 {
        self.borrowed - self.repaid
    }
}

pub type DebtTallies = HashMap<String, AssetDebtTally>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleUser {
    pub address: String,
    pub decimals: u32,
    pub token_symbol: String,
    pub last_update_timestamp: i64,
    /// User-reserve id, used to re-query exact balances.
    pub user_reserve_id: String,
}

// =============================================================================
// BALANCES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub timestamp: String,
    pub scaled_balance: String,
    pub index: String,
}

/// Current state of a user reserve plus the latest snapshot at or before
/// the cutoff, if the subgraph has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceLookup {
    pub scaled_balance: String,
    pub liquidity_index: String,
    pub snapshot: Option<BalanceSnapshot>,
}

pub type BalanceLookups = HashMap<String, BalanceLookup>;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUser {
    pub address: String,
    pub decimals: u32,
    pub token_symbol: String,
    pub user_reserve_id: String,
    pub last_update_timestamp: i64,
    pub historical_timestamp: i64,
    pub current_balance: BigInt,
    pub historical_balance: BigInt,
    pub yield_earned: BigInt,
    pub yield_percentage: f64,
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Clone)]
pub struct TokenReport {
    pub candidates: usize,
    pub users: Vec<ResolvedUser>,
    pub csv: String,
}
