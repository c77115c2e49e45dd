//! # Video SEO Engine
//!
//! Keyword opportunity ranking for video SEO:
//! - Transcript → keyword extraction (stopword or summarizer-backed)
//! - Live search/engagement data from the YouTube Data API
//! - Bounded `tanh` opportunity score per keyword
//! - Retry with exponential backoff on rate limiting, zero-score degradation
//!   on every other per-keyword failure
//! - Interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use video_seo_engine::{EngineConfig, SeoEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = SeoEngine::new(EngineConfig::from_env()).await?;
//!
//!     let report = engine
//!         .rank_keywords(&["fitness tips".to_string(), "home workout".to_string()], None)
//!         .await;
//!
//!     for entry in &report.rankings {
//!         println!("{}", entry.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod providers;
pub mod ranking;

// Re-export primary types
pub use analytics::{parse_video_id, AnalyticsLookup};
pub use config::EngineConfig;
pub use crate::core::{EngagementAggregate, RankedKeyword, ScoredKeyword, VideoAnalytics, NO_DATA};
pub use engine::{ProcessReport, SeoEngine};
pub use error::{Result, SeoEngineError};
pub use events::RequestLog;
pub use providers::SearchProvider;
pub use ranking::{score, RankingEngine, RankingReport, RetryPolicy, ScoreWeights};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
