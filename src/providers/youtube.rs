use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::core::{VideoDetails, VideoHit, VideoStatistics};
use crate::error::{Result, SeoEngineError};
use crate::providers::SearchProvider;

const PROVIDER: &str = "youtube";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Error reasons the Data API uses for throttling (retryable).
/// `quotaExceeded` is not one of them.
const RATE_LIMIT_REASONS: &[&str] = &["rateLimitExceeded", "userRateLimitExceeded"];

/// YouTube Data API v3 provider
pub struct YouTubeProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Snippet {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Option<Snippet>,
    #[serde(default)]
    statistics: Statistics,
}

/// Counts arrive as decimal strings; any of them may be omitted
#[derive(Debug, Deserialize, Default)]
struct Statistics {
    #[serde(rename = "viewCount", default)]
    view_count: Option<String>,
    #[serde(rename = "likeCount", default)]
    like_count: Option<String>,
    #[serde(rename = "commentCount", default)]
    comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: String,
}

/// An omitted count is `None`; a present one must be a number
fn parse_count(id: &str, field: &str, raw: &Option<String>) -> Result<Option<u64>> {
    match raw.as_deref() {
        None => Ok(None),
        Some(s) => s.trim().parse::<u64>().map(Some).map_err(|_| SeoEngineError::Provider {
            provider: PROVIDER.to_string(),
            message: format!("Invalid {} for video {}: {:?}", field, id, s),
        }),
    }
}

impl VideoItem {
    fn statistics(&self) -> Result<VideoStatistics> {
        Ok(VideoStatistics {
            id: self.id.clone(),
            views: parse_count(&self.id, "viewCount", &self.statistics.view_count)?,
            likes: parse_count(&self.id, "likeCount", &self.statistics.like_count)?,
            comments: parse_count(&self.id, "commentCount", &self.statistics.comment_count)?,
        })
    }
}

/// Map a non-success response onto the engine's error taxonomy
fn classify_error(status: StatusCode, body: &str) -> SeoEngineError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let throttled = status == StatusCode::TOO_MANY_REQUESTS
        || envelope.as_ref().map_or(false, |env| {
            env.error
                .errors
                .iter()
                .any(|d| RATE_LIMIT_REASONS.contains(&d.reason.as_str()))
        });

    if throttled {
        return SeoEngineError::RateLimited {
            provider: PROVIDER.to_string(),
        };
    }

    let detail = match envelope {
        Some(env) => {
            let reasons: Vec<&str> = env.error.errors.iter().map(|d| d.reason.as_str()).collect();
            format!("{} [{}]", env.error.message, reasons.join(", "))
        }
        None => body.chars().take(200).collect(),
    };

    SeoEngineError::Provider {
        provider: PROVIDER.to_string(),
        message: format!("HTTP {}: {}", status, detail),
    }
}

impl YouTubeProvider {
    /// Create new YouTube provider with a 10s request timeout
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(api_key, Duration::from_secs(10))
    }

    pub fn with_timeout(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different API root (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            SeoEngineError::Configuration("YOUTUBE_API_KEY not set".to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SeoEngineError::Provider {
                provider: PROVIDER.to_string(),
                message: format!("Request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }

        response.json::<T>().await.map_err(|e| SeoEngineError::Provider {
            provider: PROVIDER.to_string(),
            message: format!("Invalid JSON: {}", e),
        })
    }
}

#[async_trait]
impl SearchProvider for YouTubeProvider {
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>> {
        let url = format!(
            "{}/search?part=snippet&type=video&order=relevance&maxResults={}&q={}&key={}",
            self.base_url,
            max_results,
            urlencoding::encode(query),
            urlencoding::encode(self.key()?)
        );

        let response: SearchListResponse = self.get_json(&url).await?;

        let hits: Vec<VideoHit> = response
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                let title = item.snippet.title.unwrap_or_default();
                Some(VideoHit { id, title })
            })
            .collect();

        tracing::debug!("🔎 '{}' → {} videos", query, hits.len());
        Ok(hits)
    }

    async fn video_statistics(&self, ids: &[String]) -> Result<Vec<VideoStatistics>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/videos?part=statistics&id={}&key={}",
            self.base_url,
            urlencoding::encode(&ids.join(",")),
            urlencoding::encode(self.key()?)
        );

        let response: VideoListResponse = self.get_json(&url).await?;
        response.items.iter().map(VideoItem::statistics).collect()
    }

    async fn video_details(&self, id: &str) -> Result<Option<VideoDetails>> {
        let url = format!(
            "{}/videos?part=snippet,statistics&id={}&key={}",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(self.key()?)
        );

        let response: VideoListResponse = self.get_json(&url).await?;

        let Some(item) = response.items.into_iter().next() else {
            return Ok(None);
        };

        let statistics = item.statistics()?;
        let snippet = item.snippet.unwrap_or_default();
        Ok(Some(VideoDetails {
            id: item.id,
            title: snippet.title,
            published_at: snippet.published_at,
            statistics,
        }))
    }

    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_429_is_rate_limited() {
        let err = classify_error(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_403_rate_limit_reason_is_rate_limited() {
        let body = r#"{"error":{"code":403,"message":"slow down","errors":[{"reason":"userRateLimitExceeded"}]}}"#;
        assert!(classify_error(StatusCode::FORBIDDEN, body).is_rate_limited());
    }

    #[test]
    fn test_quota_exceeded_is_not_retryable() {
        let body = r#"{"error":{"code":403,"message":"quota","errors":[{"reason":"quotaExceeded"}]}}"#;
        let err = classify_error(StatusCode::FORBIDDEN, body);

        assert!(!err.is_rate_limited());
        assert!(err.to_string().contains("quotaExceeded"));
    }

    #[test]
    fn test_statistics_parsing() {
        let json = r#"{"items":[{"id":"abc","statistics":{"viewCount":"1000","likeCount":"50"}}]}"#;
        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        let stats = response.items[0].statistics().unwrap();

        assert_eq!(stats.views, Some(1000));
        assert_eq!(stats.likes, Some(50));
        assert_eq!(stats.comments, None);
    }

    #[test]
    fn test_malformed_count_is_provider_error() {
        let json = r#"{"items":[{"id":"abc","statistics":{"viewCount":"1000","likeCount":"lots"}}]}"#;
        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        let err = response.items[0].statistics().unwrap_err();

        assert!(matches!(err, SeoEngineError::Provider { .. }));
        assert!(!err.is_rate_limited());
        assert!(err.to_string().contains("likeCount"));
    }

    #[test]
    fn test_search_parsing_skips_non_video_ids() {
        let json = r#"{"items":[
            {"id":{"kind":"youtube#video","videoId":"vid123"},"snippet":{"title":"Get Fit Now"}},
            {"id":{"kind":"youtube#channel","channelId":"UC1"},"snippet":{"title":"A channel"}}
        ]}"#;
        let response: SearchListResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = response.items.into_iter().filter_map(|i| i.id.video_id).collect();

        assert_eq!(ids, vec!["vid123".to_string()]);
    }

    #[test]
    fn test_blank_key_means_no_credentials() {
        let provider = YouTubeProvider::new(Some("  ".to_string())).unwrap();
        assert!(!provider.has_credentials());

        let provider = YouTubeProvider::new(Some("key".to_string())).unwrap();
        assert!(provider.has_credentials());
    }

    #[tokio::test]
    #[ignore] // Requires network access and YOUTUBE_API_KEY
    async fn test_youtube_search() {
        let provider = YouTubeProvider::new(std::env::var("YOUTUBE_API_KEY").ok()).unwrap();
        let hits = provider.search_videos("rust programming", 3).await.unwrap();

        assert!(!hits.is_empty());
        assert!(hits.len() <= 3);
    }
}
