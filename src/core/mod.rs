pub mod engagement;
pub mod keyword_ranking;
pub mod video;

pub use engagement::{EngagementAggregate, TopVideo};
pub use keyword_ranking::{RankedKeyword, ScoredKeyword};
pub use video::{VideoAnalytics, VideoDetails, VideoHit, VideoStatistics};

/// Placeholder for data that is genuinely absent (distinct from a zero count)
pub const NO_DATA: &str = "N/A";
