use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::core::VideoAnalytics;
use crate::error::{Result, SeoEngineError};
use crate::providers::SearchProvider;

/// `v=ID`, `youtu.be/ID` and `youtube.com/watch?v=ID`, ids are 11 chars
const VIDEO_ID_PATTERN: &str = r"(?:v=|youtu\.be/|youtube\.com/watch\?v=)([a-zA-Z0-9_-]{11})";

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VIDEO_ID_PATTERN).expect("video id pattern is valid"))
}

/// Extract the 11-character video id from a watch/short URL
pub fn parse_video_id(url: &str) -> Option<&str> {
    video_id_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Fetches display statistics for a single video; no scoring involved
pub struct AnalyticsLookup {
    provider: Arc<dyn SearchProvider>,
}

impl AnalyticsLookup {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Look up a video by URL.
    ///
    /// Errors with `InvalidVideoUrl` (no provider call made) or
    /// `VideoNotFound`; both satisfy `is_not_found()`.
    pub async fn lookup(&self, video_url: &str) -> Result<VideoAnalytics> {
        if !self.provider.has_credentials() {
            tracing::error!("❌ No API key for provider '{}'", self.provider.name());
            return Err(SeoEngineError::Configuration(format!(
                "no API key for provider '{}'",
                self.provider.name()
            )));
        }

        let video_id = parse_video_id(video_url).ok_or_else(|| {
            tracing::error!("❌ Invalid video URL: {}", video_url);
            SeoEngineError::InvalidVideoUrl(video_url.to_string())
        })?;

        let details = self
            .provider
            .video_details(video_id)
            .await?
            .ok_or_else(|| SeoEngineError::VideoNotFound(video_id.to_string()))?;

        tracing::info!("✅ Fetched analytics for video ID: {}", video_id);
        Ok(VideoAnalytics::from(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{VideoDetails, VideoStatistics};
    use crate::providers::ScriptedProvider;

    #[test]
    fn test_parse_known_shapes() {
        assert_eq!(parse_video_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(parse_video_id("https://youtu.be/5_EJwYeQusM?feature=shared"), Some("5_EJwYeQusM"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_video_id("not a url"), None);
        assert_eq!(parse_video_id("https://youtu.be/short"), None);
        assert_eq!(parse_video_id(""), None);
    }

    #[tokio::test]
    async fn test_malformed_url_makes_no_call() {
        let provider = Arc::new(ScriptedProvider::new());
        let lookup = AnalyticsLookup::new(provider.clone());

        let err = lookup.lookup("not a url").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_video_is_not_found() {
        let provider = Arc::new(ScriptedProvider::new());
        let lookup = AnalyticsLookup::new(provider.clone());

        let err = lookup.lookup("https://youtu.be/dQw4w9WgXcQ").await.unwrap_err();

        assert!(matches!(err, SeoEngineError::VideoNotFound(ref id) if id == "dQw4w9WgXcQ"));
        assert_eq!(provider.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_statistics_stay_unavailable() {
        let provider = Arc::new(ScriptedProvider::new().with_video_details(VideoDetails {
            id: "dQw4w9WgXcQ".to_string(),
            title: Some("Never Gonna Give You Up".to_string()),
            published_at: Some("2009-10-25T06:57:33Z".to_string()),
            statistics: VideoStatistics {
                id: "dQw4w9WgXcQ".to_string(),
                views: Some(1_000),
                likes: None,
                comments: Some(3),
            },
        }));
        let lookup = AnalyticsLookup::new(provider);

        let analytics = lookup
            .lookup("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(analytics.views, Some(1_000));
        assert_eq!(analytics.likes, None);
        assert_eq!(analytics.comments, Some(3));
    }

    #[tokio::test]
    async fn test_no_credentials_is_configuration_error() {
        let provider = Arc::new(ScriptedProvider::new().without_credentials());
        let lookup = AnalyticsLookup::new(provider.clone());

        let err = lookup.lookup("https://youtu.be/dQw4w9WgXcQ").await.unwrap_err();

        assert!(matches!(err, SeoEngineError::Configuration(_)));
        assert_eq!(provider.total_calls(), 0);
    }
}
