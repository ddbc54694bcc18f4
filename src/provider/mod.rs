pub use self::subgraph::{BalanceHistorySource, CandidateSource, Subgraph};

pub mod queries;
mod subgraph;
