use serde::Deserialize;

use crate::helpers::string_or_number;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveHistoryPage {
    #[serde(default)]
    pub user_reserves: Vec<ReserveHistoryType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveHistoryType {
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub scaled_a_token_balance: String,
    pub reserve: ReserveIndexType,
    #[serde(default)]
    pub historical_balance: Vec<BalanceHistoryType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveIndexType {
    #[serde(deserialize_with = "string_or_number")]
    pub liquidity_index: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceHistoryType {
    #[serde(deserialize_with = "string_or_number")]
    pub timestamp: String,
    #[serde(deserialize_with = "string_or_number")]
    pub scaled_a_token_balance: String,
    #[serde(deserialize_with = "string_or_number")]
    pub index: String,
}
