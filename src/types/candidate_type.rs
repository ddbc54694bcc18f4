use serde::Deserialize;

use crate::helpers::string_or_number;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePage {
    #[serde(default)]
    pub user_reserves: Vec<CandidateRecord>,
}

/// One user/asset position from the subgraph, with every nested history
/// list the eligibility check needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub current_a_token_balance: String,
    #[serde(deserialize_with = "string_or_number")]
    pub scaled_a_token_balance: String,
    #[serde(deserialize_with = "string_or_number")]
    pub last_update_timestamp: String,
    pub user: CandidateUser,
    pub reserve: ReserveType,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUser {
    pub id: String,
    /// Reserves with a positive stable debt.
    #[serde(default)]
    pub reserves: Vec<IdType>,
    #[serde(default)]
    pub variable_debt_reserves: Vec<IdType>,
    #[serde(default)]
    pub recent_supplies: Vec<IdType>,
    #[serde(default)]
    pub recent_withdrawals: Vec<IdType>,
    #[serde(default)]
    pub recent_borrows: Vec<IdType>,
    #[serde(default)]
    pub recent_repays: Vec<IdType>,
    #[serde(default)]
    pub historical_token_supplies: Vec<TimestampedType>,
    #[serde(default)]
    pub historical_borrows: Vec<AmountEventType>,
    #[serde(default)]
    pub historical_repays: Vec<AmountEventType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdType {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimestampedType {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AmountEventType {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub timestamp: String,
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub reserve: SymbolType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolType {
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveType {
    pub id: String,
    pub symbol: String,
    pub decimals: u32,
    pub underlying_asset: String,
    #[serde(deserialize_with = "string_or_number")]
    pub liquidity_index: String,
}
