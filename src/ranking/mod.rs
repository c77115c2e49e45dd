pub mod engine;
pub mod score;
pub mod search_client;

pub use engine::{assign_ranks, RankingEngine, RankingReport};
pub use score::{score, ScoreWeights, MAX_SCORE};
pub use search_client::{DegradeReason, FetchState, KeywordFetch, RetryPolicy, SearchClient};
