use serde::{Deserialize, Serialize, Serializer};

use crate::core::NO_DATA;

/// Serialize an optional display value, writing the "N/A" sentinel for `None`
fn or_na<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_str(NO_DATA),
    }
}

/// One search hit: a video id and its title, in provider relevance order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoHit {
    pub id: String,
    pub title: String,
}

impl VideoHit {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Engagement counters for one video.
///
/// Each counter is `None` when the provider omitted it (e.g. likes hidden by
/// the uploader). Aggregation treats `None` as zero; display does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatistics {
    pub id: String,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
}

impl VideoStatistics {
    /// Statistics with every counter present
    pub fn new(id: impl Into<String>, views: u64, likes: u64, comments: u64) -> Self {
        Self {
            id: id.into(),
            views: Some(views),
            likes: Some(likes),
            comments: Some(comments),
        }
    }
}

/// Snippet plus statistics for a single video
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDetails {
    pub id: String,
    pub title: Option<String>,
    pub published_at: Option<String>,
    pub statistics: VideoStatistics,
}

/// Display-ready analytics for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoAnalytics {
    #[serde(skip)]
    pub video_id: String,

    #[serde(serialize_with = "or_na")]
    pub title: Option<String>,

    #[serde(serialize_with = "or_na")]
    pub views: Option<u64>,

    #[serde(serialize_with = "or_na")]
    pub likes: Option<u64>,

    #[serde(serialize_with = "or_na")]
    pub comments: Option<u64>,

    #[serde(serialize_with = "or_na")]
    pub published: Option<String>,
}

impl From<VideoDetails> for VideoAnalytics {
    fn from(details: VideoDetails) -> Self {
        Self {
            video_id: details.id,
            title: details.title,
            views: details.statistics.views,
            likes: details.statistics.likes,
            comments: details.statistics.comments,
            published: details.published_at,
        }
    }
}
