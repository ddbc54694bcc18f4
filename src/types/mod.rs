pub use self::{
    candidate_type::{
        AmountEventType, CandidatePage, CandidateRecord, CandidateUser,
        IdType, ReserveType, SymbolType, TimestampedType,
    },
    graphql_response::{GraphQLBody, GraphQLMessage, GraphQLRequest},
    reserve_history_type::{
        BalanceHistoryType, ReserveHistoryPage, ReserveHistoryType,
        ReserveIndexType,
    },
};

mod candidate_type;
mod graphql_response;
mod reserve_history_type;
