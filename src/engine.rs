use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::analytics::AnalyticsLookup;
use crate::config::EngineConfig;
use crate::core::{RankedKeyword, VideoAnalytics};
use crate::error::{Result, SeoEngineError};
use crate::events::RequestLog;
use crate::pipeline::{
    select_transcriber, seo_description, KeywordExtractor, StopwordKeywordExtractor,
    SummarizingKeywordExtractor, Transcriber,
};
use crate::providers::{SearchProvider, YouTubeProvider};
use crate::ranking::{RankingEngine, RankingReport};

/// Accepted upload container
const MEDIA_EXTENSION: &str = "mp4";

/// Main SEO engine orchestrator
pub struct SeoEngine {
    config: EngineConfig,
    ranking: RankingEngine,
    analytics: AnalyticsLookup,
    transcriber: Arc<dyn Transcriber>,
    extractor: Arc<dyn KeywordExtractor>,
}

/// Everything produced from one processed video
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub transcription: String,
    pub keywords: Vec<String>,
    pub seo_description: String,
    pub rankings: Vec<RankedKeyword>,
    pub logs: String,
    pub latency_ms: f64,
}

impl SeoEngine {
    /// Create engine with the YouTube provider and the best transcriber
    /// available on this host (chosen once, here).
    pub async fn new(config: EngineConfig) -> Result<Self> {
        let provider = Arc::new(YouTubeProvider::with_timeout(
            config.api_key.clone(),
            std::time::Duration::from_secs(config.http_timeout_secs),
        )?);

        if !provider.has_credentials() {
            tracing::warn!("⚠️ YOUTUBE_API_KEY not set, rankings and analytics will be empty");
        }

        let transcriber = select_transcriber(&config).await;

        let extractor: Arc<dyn KeywordExtractor> =
            match SummarizingKeywordExtractor::from_config(&config)? {
                Some(summarizer) => {
                    tracing::info!(
                        "✅ Summarizing keyword extractor at {}",
                        config.summarizer_endpoint.as_deref().unwrap_or_default()
                    );
                    Arc::new(summarizer)
                }
                None => Arc::new(StopwordKeywordExtractor),
            };

        Ok(Self::with_components(config, provider, transcriber, extractor))
    }

    /// Assemble from explicit collaborators
    pub fn with_components(
        config: EngineConfig,
        provider: Arc<dyn SearchProvider>,
        transcriber: Arc<dyn Transcriber>,
        extractor: Arc<dyn KeywordExtractor>,
    ) -> Self {
        let ranking = RankingEngine::new(provider.clone(), config.weights, config.retry);
        let analytics = AnalyticsLookup::new(provider);

        Self {
            config,
            ranking,
            analytics,
            transcriber,
            extractor,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn transcriber_name(&self) -> &str {
        self.transcriber.name()
    }

    /// Rank keywords by opportunity; `max_results` defaults to the configured sample size
    pub async fn rank_keywords(&self, keywords: &[String], max_results: Option<u32>) -> RankingReport {
        let max_results = max_results.unwrap_or(self.config.max_results);
        self.ranking.rank(keywords, max_results).await
    }

    /// Display analytics for a single video URL
    pub async fn analyze(&self, video_url: &str) -> Result<VideoAnalytics> {
        self.analytics.lookup(video_url).await
    }

    /// Transcribe a local `.mp4`, extract keywords, describe and rank them
    pub async fn process_video(&self, media: &Path) -> Result<ProcessReport> {
        let start = Instant::now();
        let mut log = RequestLog::new();

        let is_mp4 = media
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case(MEDIA_EXTENSION));
        if !is_mp4 {
            log.error("❌ Invalid file format. Only .mp4 files are accepted");
            return Err(SeoEngineError::InvalidMediaFormat(media.display().to_string()));
        }

        log.info(format!(
            "🎥 Processing {} with {} transcriber",
            media.display(),
            self.transcriber.name()
        ));

        let transcription = match self.transcriber.transcribe(media).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                log.error("❌ Transcription produced no text");
                return Err(SeoEngineError::TranscriptionFailed(
                    "no speech recognized".to_string(),
                ));
            }
            Err(e) => {
                log.error(format!("❌ Transcription failed: {}", e));
                return Err(e);
            }
        };
        log.info(format!("✅ Transcribed {} characters", transcription.len()));

        let keywords = self.extractor.extract(&transcription).await;
        log.info(format!(
            "🔑 {} keywords via {}: {}",
            keywords.len(),
            self.extractor.name(),
            keywords.join(", ")
        ));

        let seo_description = seo_description(Some(&transcription), &keywords);

        let report = self.rank_keywords(&keywords, None).await;
        log.extend(report.log);

        Ok(ProcessReport {
            transcription,
            keywords,
            seo_description,
            rankings: report.rankings,
            logs: log.render(),
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SidecarTranscriber;
    use crate::providers::ScriptedProvider;

    #[tokio::test]
    async fn test_engine_creation_without_key() {
        let config = EngineConfig {
            ffmpeg_path: "/nonexistent/ffmpeg".to_string(),
            ..Default::default()
        };

        let engine = SeoEngine::new(config).await.unwrap();
        assert_eq!(engine.transcriber_name(), "sidecar");

        let report = engine.rank_keywords(&["rust".to_string()], None).await;
        assert!(report.rankings.is_empty());
    }

    #[tokio::test]
    async fn test_engine_uses_configured_summarizer() {
        let config = EngineConfig {
            ffmpeg_path: "/nonexistent/ffmpeg".to_string(),
            summarizer_endpoint: Some("http://127.0.0.1:9/v1/chat/completions".to_string()),
            summarizer_api_key: Some("sk-local".to_string()),
            ..Default::default()
        };

        let engine = SeoEngine::new(config).await.unwrap();
        assert_eq!(engine.extractor.name(), "summarizer");
    }

    #[tokio::test]
    async fn test_rejects_non_mp4() {
        let engine = SeoEngine::with_components(
            EngineConfig::default(),
            Arc::new(ScriptedProvider::new()),
            Arc::new(SidecarTranscriber::new()),
            Arc::new(StopwordKeywordExtractor),
        );

        let err = engine.process_video(Path::new("clip.mov")).await.unwrap_err();
        assert!(matches!(err, SeoEngineError::InvalidMediaFormat(_)));
    }
}
