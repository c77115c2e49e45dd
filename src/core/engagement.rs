use serde::{Deserialize, Serialize};

use crate::core::{VideoHit, VideoStatistics};

/// First hit of a keyword search, shown as the keyword's representative video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopVideo {
    pub id: String,
    pub title: String,
}

impl From<&VideoHit> for TopVideo {
    fn from(hit: &VideoHit) -> Self {
        Self {
            id: hit.id.clone(),
            title: hit.title.clone(),
        }
    }
}

/// Summed engagement over the sampled result page of one keyword.
///
/// `top_video` is `None` when the search returned nothing; the counters are
/// then all zero and the keyword scores exactly 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementAggregate {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub top_video: Option<TopVideo>,
    /// Number of videos whose statistics were summed
    pub sample_size: usize,
}

impl EngagementAggregate {
    /// Aggregate for a search with zero results
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sum statistics across every returned video; the first hit is the top video.
    ///
    /// Missing counters contribute zero here, since they feed arithmetic.
    pub fn from_results(hits: &[VideoHit], stats: &[VideoStatistics]) -> Self {
        let Some(first) = hits.first() else {
            return Self::empty();
        };

        let mut aggregate = Self {
            top_video: Some(TopVideo::from(first)),
            sample_size: stats.len(),
            ..Self::default()
        };

        for s in stats {
            aggregate.views = aggregate.views.saturating_add(s.views.unwrap_or(0));
            aggregate.likes = aggregate.likes.saturating_add(s.likes.unwrap_or(0));
            aggregate.comments = aggregate.comments.saturating_add(s.comments.unwrap_or(0));
        }

        aggregate
    }

    pub fn has_results(&self) -> bool {
        self.top_video.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_across_all_videos() {
        let hits = vec![
            VideoHit::new("a", "First"),
            VideoHit::new("b", "Second"),
        ];
        let stats = vec![
            VideoStatistics::new("a", 1000, 50, 10),
            VideoStatistics::new("b", 500, 20, 5),
        ];

        let aggregate = EngagementAggregate::from_results(&hits, &stats);

        assert_eq!(aggregate.views, 1500);
        assert_eq!(aggregate.likes, 70);
        assert_eq!(aggregate.comments, 15);
        assert_eq!(aggregate.sample_size, 2);
        assert_eq!(aggregate.top_video.unwrap().id, "a");
    }

    #[test]
    fn test_missing_counters_count_as_zero() {
        let hits = vec![VideoHit::new("a", "First")];
        let stats = vec![VideoStatistics {
            id: "a".to_string(),
            views: Some(100),
            likes: None,
            comments: None,
        }];

        let aggregate = EngagementAggregate::from_results(&hits, &stats);
        assert_eq!(aggregate.views, 100);
        assert_eq!(aggregate.likes, 0);
        assert_eq!(aggregate.comments, 0);
    }

    #[test]
    fn test_no_hits_is_empty() {
        let aggregate = EngagementAggregate::from_results(&[], &[]);
        assert!(!aggregate.has_results());
        assert_eq!(aggregate, EngagementAggregate::empty());
    }
}
