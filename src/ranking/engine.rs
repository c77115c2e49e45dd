use serde::Serialize;
use std::sync::Arc;

use crate::core::{RankedKeyword, ScoredKeyword};
use crate::events::RequestLog;
use crate::providers::SearchProvider;
use crate::ranking::{RetryPolicy, ScoreWeights, SearchClient};

/// Rankings for one request plus the events recorded while producing them
#[derive(Debug, Clone, Default, Serialize)]
pub struct RankingReport {
    pub rankings: Vec<RankedKeyword>,
    #[serde(skip)]
    pub log: RequestLog,
}

/// Scores keywords against live search engagement and orders them by opportunity
pub struct RankingEngine {
    client: SearchClient,
    weights: ScoreWeights,
}

impl RankingEngine {
    pub fn new(provider: Arc<dyn SearchProvider>, weights: ScoreWeights, retry: RetryPolicy) -> Self {
        Self {
            client: SearchClient::new(provider, retry),
            weights,
        }
    }

    /// Rank `keywords`, one provider round-trip at a time in input order.
    ///
    /// Returns exactly one entry per keyword (zero-score where data was
    /// unobtainable), sorted by score descending with ties in input order.
    /// Without provider credentials nothing is fetched and the list is empty.
    pub async fn rank(&self, keywords: &[String], max_results: u32) -> RankingReport {
        let mut log = RequestLog::new();
        let provider = self.client.provider();

        if !provider.has_credentials() {
            log.error(format!(
                "❌ Configuration error: no API key for provider '{}'",
                provider.name()
            ));
            return RankingReport {
                rankings: Vec::new(),
                log,
            };
        }

        let mut scored = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            scored.push(self.score_keyword(keyword, max_results, &mut log).await);
        }

        let rankings = assign_ranks(scored);
        log.info(format!("✅ Ranked {} keywords", rankings.len()));

        RankingReport { rankings, log }
    }

    async fn score_keyword(
        &self,
        keyword: &str,
        max_results: u32,
        log: &mut RequestLog,
    ) -> ScoredKeyword {
        let fetch = self.client.fetch(keyword, max_results).await;

        if fetch.attempts > 1 {
            log.warn(format!(
                "⏳ '{}' was rate limited, {} attempts made",
                keyword, fetch.attempts
            ));
        }

        match fetch.outcome {
            Ok(aggregate) if aggregate.has_results() => {
                let score = self
                    .weights
                    .score(aggregate.likes, aggregate.comments, aggregate.views);
                log.info(format!(
                    "✅ '{}': {} videos, raw {:.4}, score {:.3}",
                    keyword,
                    aggregate.sample_size,
                    self.weights.raw(aggregate.likes, aggregate.comments, aggregate.views),
                    score
                ));
                ScoredKeyword::from_aggregate(keyword, &aggregate, score)
            }
            Ok(_) => {
                log.info(format!("'{}': no videos found", keyword));
                ScoredKeyword::degraded(keyword)
            }
            Err(reason) => {
                log.error(format!("❌ '{}' degraded to zero score: {}", keyword, reason));
                ScoredKeyword::degraded(keyword)
            }
        }
    }
}

/// Stable sort by score descending, then dense 1-based ranks by position
pub fn assign_ranks(mut scored: Vec<ScoredKeyword>) -> Vec<RankedKeyword> {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedKeyword::new(entry, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keyword: &str, score: f64) -> ScoredKeyword {
        ScoredKeyword {
            keyword: keyword.to_string(),
            score,
            top_video_title: "t".to_string(),
            top_video_id: "i".to_string(),
        }
    }

    #[test]
    fn test_assign_ranks_orders_descending() {
        let ranked = assign_ranks(vec![entry("a", 0.1), entry("b", 0.9), entry("c", 0.5)]);

        let keywords: Vec<&str> = ranked.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["b", "c", "a"]);
        assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = assign_ranks(vec![
            entry("first", 0.0),
            entry("top", 0.4),
            entry("second", 0.0),
            entry("third", 0.0),
        ]);

        let keywords: Vec<&str> = ranked.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(assign_ranks(Vec::new()).is_empty());
    }
}
