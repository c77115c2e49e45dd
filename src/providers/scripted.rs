use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::core::{VideoDetails, VideoHit, VideoStatistics};
use crate::error::{Result, SeoEngineError};
use crate::providers::SearchProvider;

const PROVIDER: &str = "scripted";

/// Canned reply to one search call
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Search succeeds with these videos (first = top hit)
    Videos(Vec<(VideoHit, VideoStatistics)>),
    /// Provider signals throttling
    RateLimited,
    /// Non-retryable provider failure
    Failure(String),
}

/// In-memory provider replaying scripted replies, for tests and offline runs.
///
/// Replies are queued per query; the last queued reply repeats once the
/// queue is down to one. Unscripted queries return no videos.
pub struct ScriptedProvider {
    replies: Mutex<HashMap<String, VecDeque<ScriptedReply>>>,
    statistics: Mutex<HashMap<String, VideoStatistics>>,
    details: HashMap<String, VideoDetails>,
    credentials: bool,
    search_calls: Mutex<HashMap<String, usize>>,
    statistics_calls: AtomicUsize,
    details_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            statistics: Mutex::new(HashMap::new()),
            details: HashMap::new(),
            credentials: true,
            search_calls: Mutex::new(HashMap::new()),
            statistics_calls: AtomicUsize::new(0),
            details_calls: AtomicUsize::new(0),
        }
    }

    /// Script a single successful search
    pub fn with_videos(self, query: &str, videos: Vec<(VideoHit, VideoStatistics)>) -> Self {
        self.with_replies(query, vec![ScriptedReply::Videos(videos)])
    }

    /// Script a sequence of replies for consecutive searches of `query`
    pub fn with_replies(mut self, query: &str, replies: Vec<ScriptedReply>) -> Self {
        if let Ok(map) = self.replies.get_mut() {
            map.insert(query.to_string(), replies.into_iter().collect());
        }
        self
    }

    pub fn with_video_details(mut self, details: VideoDetails) -> Self {
        self.details.insert(details.id.clone(), details);
        self
    }

    /// Behave as if no API key were configured
    pub fn without_credentials(mut self) -> Self {
        self.credentials = false;
        self
    }

    /// Search calls made for one query
    pub fn search_calls_for(&self, query: &str) -> usize {
        self.search_calls
            .lock()
            .map(|calls| calls.get(query).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Provider calls of any kind
    pub fn total_calls(&self) -> usize {
        let searches: usize = self
            .search_calls
            .lock()
            .map(|calls| calls.values().sum())
            .unwrap_or(0);
        searches
            + self.statistics_calls.load(Ordering::SeqCst)
            + self.details_calls.load(Ordering::SeqCst)
    }

    pub fn statistics_calls(&self) -> usize {
        self.statistics_calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self, query: &str) -> Option<ScriptedReply> {
        let mut map = self.replies.lock().ok()?;
        let queue = map.get_mut(query)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<VideoHit>> {
        if let Ok(mut calls) = self.search_calls.lock() {
            *calls.entry(query.to_string()).or_insert(0) += 1;
        }

        match self.next_reply(query) {
            None => Ok(Vec::new()),
            Some(ScriptedReply::RateLimited) => Err(SeoEngineError::RateLimited {
                provider: PROVIDER.to_string(),
            }),
            Some(ScriptedReply::Failure(message)) => Err(SeoEngineError::Provider {
                provider: PROVIDER.to_string(),
                message,
            }),
            Some(ScriptedReply::Videos(videos)) => {
                let mut stats = self
                    .statistics
                    .lock()
                    .map_err(|_| SeoEngineError::Other("statistics lock poisoned".into()))?;

                Ok(videos
                    .into_iter()
                    .take(max_results as usize)
                    .map(|(hit, s)| {
                        stats.insert(hit.id.clone(), s);
                        hit
                    })
                    .collect())
            }
        }
    }

    async fn video_statistics(&self, ids: &[String]) -> Result<Vec<VideoStatistics>> {
        self.statistics_calls.fetch_add(1, Ordering::SeqCst);

        let stats = self
            .statistics
            .lock()
            .map_err(|_| SeoEngineError::Other("statistics lock poisoned".into()))?;

        Ok(ids.iter().filter_map(|id| stats.get(id).cloned()).collect())
    }

    async fn video_details(&self, id: &str) -> Result<Option<VideoDetails>> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.details.get(id).cloned())
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
