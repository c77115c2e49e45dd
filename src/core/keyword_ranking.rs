use serde::{Deserialize, Serialize};

use crate::core::{EngagementAggregate, NO_DATA};

/// A keyword with its opportunity score and representative video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKeyword {
    pub keyword: String,

    /// Opportunity score in [0, 1), rounded to 3 decimals
    pub score: f64,

    pub top_video_title: String,
    pub top_video_id: String,
}

impl ScoredKeyword {
    /// Entry for a keyword whose data was unobtainable or empty
    pub fn degraded(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            score: 0.0,
            top_video_title: NO_DATA.to_string(),
            top_video_id: NO_DATA.to_string(),
        }
    }

    /// Entry built from a fetched aggregate and its computed score
    pub fn from_aggregate(
        keyword: impl Into<String>,
        aggregate: &EngagementAggregate,
        score: f64,
    ) -> Self {
        match &aggregate.top_video {
            Some(top) => Self {
                keyword: keyword.into(),
                score,
                top_video_title: top.title.clone(),
                top_video_id: top.id.clone(),
            },
            None => Self::degraded(keyword),
        }
    }

    pub fn has_data(&self) -> bool {
        self.top_video_id != NO_DATA
    }
}

/// A scored keyword with its dense, 1-based position in the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub rank: usize,
    pub score: f64,
    pub top_video_title: String,
    pub top_video_id: String,
}

impl RankedKeyword {
    pub fn new(scored: ScoredKeyword, rank: usize) -> Self {
        Self {
            keyword: scored.keyword,
            rank,
            score: scored.score,
            top_video_title: scored.top_video_title,
            top_video_id: scored.top_video_id,
        }
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        format!(
            "#{} {} - {:.3} ({} / {})",
            self.rank, self.keyword, self.score, self.top_video_title, self.top_video_id
        )
    }
}
