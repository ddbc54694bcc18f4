/// Positions of one underlying asset with a positive balance, together with
/// every history list needed to prove inactivity.
pub const DEAD_LIQUIDITY_USERS: &str = r#"
query getDeadLiquidityUsers(
  $tokenAddress: Bytes!
  $cutoff: Int!
  $first: Int!
  $skip: Int!
  $lookback: Int!
) {
  userReserves(
    where: {
      currentATokenBalance_gt: "0"
      reserve_: { underlyingAsset: $tokenAddress }
    }
    orderBy: currentATokenBalance
    orderDirection: desc
    first: $first
    skip: $skip
  ) {
    id
    currentATokenBalance
    scaledATokenBalance
    lastUpdateTimestamp
    user {
      id
      reserves(where: { currentStableDebt_gt: "0" }) {
        id
      }
      variableDebtReserves: reserves(where: { currentVariableDebt_gt: "0" }) {
        id
      }
      recentSupplies: supplyHistory(where: { timestamp_gte: $cutoff }, first: 1) {
        id
      }
      recentWithdrawals: redeemUnderlyingHistory(
        where: { timestamp_gte: $cutoff }
        first: 1
      ) {
        id
      }
      recentBorrows: borrowHistory(where: { timestamp_gte: $cutoff }, first: 1) {
        id
      }
      recentRepays: repayHistory(where: { timestamp_gte: $cutoff }, first: 1) {
        id
      }
      historicalTokenSupplies: supplyHistory(
        where: {
          timestamp_lt: $cutoff
          reserve_: { underlyingAsset: $tokenAddress }
        }
        first: 1
      ) {
        id
        timestamp
      }
      historicalBorrows: borrowHistory(
        where: { timestamp_lt: $cutoff }
        orderBy: timestamp
        orderDirection: desc
        first: $lookback
      ) {
        id
        timestamp
        amount
        reserve {
          symbol
        }
      }
      historicalRepays: repayHistory(
        where: { timestamp_lt: $cutoff }
        orderBy: timestamp
        orderDirection: desc
        first: $lookback
      ) {
        id
        timestamp
        amount
        reserve {
          symbol
        }
      }
    }
    reserve {
      id
      symbol
      decimals
      underlyingAsset
      liquidityIndex
    }
  }
}
"#;

/// Current scaled balance and index of each user reserve, plus the last
/// balance snapshot at or before the cutoff.
pub const USER_RESERVES_HISTORY: &str = r#"
query getUserReservesHistory($userReserveIds: [String!]!, $cutoff: Int!) {
  userReserves(where: { id_in: $userReserveIds }) {
    id
    scaledATokenBalance
    reserve {
      liquidityIndex
    }
    historicalBalance: aTokenBalanceHistory(
      where: { timestamp_lte: $cutoff }
      orderBy: timestamp
      orderDirection: desc
      first: 1
    ) {
      timestamp
      scaledATokenBalance
      index
    }
  }
}
"#;
