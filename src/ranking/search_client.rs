use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::core::EngagementAggregate;
use crate::error::Result;
use crate::providers::SearchProvider;

/// Bounded retry with exponential backoff for throttled searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts per keyword, first try included
    pub max_attempts: u32,
    /// Backoff time unit; throttled attempt n (0-based) waits `unit * 2^n`
    pub backoff_unit_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Delay after the rate-limited attempt `attempt` (0-based): 1, 2, 4, ... units
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.backoff_unit_ms.saturating_mul(factor))
    }
}

/// Why a keyword ended up without data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// Every attempt was throttled
    RateLimitExhausted { attempts: u32 },
    /// Non-retryable provider failure
    ProviderError(String),
}

impl std::fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegradeReason::RateLimitExhausted { attempts } => {
                write!(f, "rate limited on all {} attempts", attempts)
            }
            DegradeReason::ProviderError(message) => write!(f, "{}", message),
        }
    }
}

/// Per-keyword fetch state machine: `Pending → Retrying(n) → Succeeded | Degraded`
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Pending,
    /// Backed off after a throttled attempt; attempt `n` (0-based) runs next
    Retrying(u32),
    Succeeded(EngagementAggregate),
    Degraded(DegradeReason),
}

/// Terminal result of fetching one keyword
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordFetch {
    pub keyword: String,
    /// Search attempts actually made
    pub attempts: u32,
    /// `Ok` with a (possibly empty) aggregate, or why data was unobtainable
    pub outcome: std::result::Result<EngagementAggregate, DegradeReason>,
}

/// Wraps a `SearchProvider` with the retry policy and result aggregation
pub struct SearchClient {
    provider: Arc<dyn SearchProvider>,
    policy: RetryPolicy,
}

impl SearchClient {
    pub fn new(provider: Arc<dyn SearchProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn provider(&self) -> &Arc<dyn SearchProvider> {
        &self.provider
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch the engagement aggregate for one keyword, driving the state
    /// machine to a terminal state. Never fails: errors become `Degraded`.
    pub async fn fetch(&self, keyword: &str, max_results: u32) -> KeywordFetch {
        let mut state = FetchState::Pending;
        let mut attempts = 0;

        loop {
            state = match state {
                FetchState::Pending => {
                    attempts += 1;
                    self.attempt(keyword, max_results, 0).await
                }
                FetchState::Retrying(attempt) => {
                    attempts += 1;
                    self.attempt(keyword, max_results, attempt).await
                }
                FetchState::Succeeded(aggregate) => {
                    return KeywordFetch {
                        keyword: keyword.to_string(),
                        attempts,
                        outcome: Ok(aggregate),
                    };
                }
                FetchState::Degraded(reason) => {
                    return KeywordFetch {
                        keyword: keyword.to_string(),
                        attempts,
                        outcome: Err(reason),
                    };
                }
            };
        }
    }

    /// Run attempt `attempt` (0-based) and return the next state. A throttled
    /// attempt backs off before the next state, the last one included.
    async fn attempt(&self, keyword: &str, max_results: u32, attempt: u32) -> FetchState {
        match self.search_and_aggregate(keyword, max_results).await {
            Ok(aggregate) => FetchState::Succeeded(aggregate),
            Err(e) if e.is_rate_limited() => {
                let delay = self.policy.backoff_delay(attempt);
                tracing::warn!(
                    "⏳ Rate limited for '{}' (attempt {}/{}), backing off {:?}",
                    keyword,
                    attempt + 1,
                    self.policy.max_attempts,
                    delay
                );
                tokio::time::sleep(delay).await;

                if attempt + 1 < self.policy.max_attempts {
                    FetchState::Retrying(attempt + 1)
                } else {
                    FetchState::Degraded(DegradeReason::RateLimitExhausted {
                        attempts: attempt + 1,
                    })
                }
            }
            Err(e) => FetchState::Degraded(DegradeReason::ProviderError(e.to_string())),
        }
    }

    /// One search call plus one batched statistics call
    async fn search_and_aggregate(
        &self,
        keyword: &str,
        max_results: u32,
    ) -> Result<EngagementAggregate> {
        let hits = self.provider.search_videos(keyword, max_results).await?;

        if hits.is_empty() {
            return Ok(EngagementAggregate::empty());
        }

        let ids: Vec<String> = hits.iter().map(|h| h.id.clone()).collect();
        let stats = self.provider.video_statistics(&ids).await?;

        if stats.is_empty() {
            tracing::debug!("No statistics returned for '{}' ({} hits)", keyword, ids.len());
        }

        Ok(EngagementAggregate::from_results(&hits, &stats))
    }
}
