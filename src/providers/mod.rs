pub mod scripted;
pub mod youtube;

use async_trait::async_trait;
use crate::core::{VideoDetails, VideoHit, VideoStatistics};
use crate::error::Result;

pub use scripted::ScriptedProvider;
pub use youtube::YouTubeProvider;

/// Trait for video search/engagement data providers (YouTube, ...)
///
/// Implementations report throttling as `SeoEngineError::RateLimited` and
/// every other failure as a non-retryable error.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search videos by query, relevance-ordered, capped at `max_results`
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>>;

    /// Batched statistics lookup for a list of video ids (one call)
    async fn video_statistics(&self, ids: &[String]) -> Result<Vec<VideoStatistics>>;

    /// Snippet + statistics for one video, `None` if the provider has no such item
    async fn video_details(&self, id: &str) -> Result<Option<VideoDetails>>;

    /// Whether a credential is configured; without one no call is attempted
    fn has_credentials(&self) -> bool;

    /// Get provider name
    fn name(&self) -> &str;
}
