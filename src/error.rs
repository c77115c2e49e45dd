use thiserror::Error;

/// Main error type for the SEO engine
#[derive(Error, Debug)]
pub enum SeoEngineError {
    /// Missing or unusable configuration (e.g. no API key)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider signalled rate limiting (HTTP 429 semantics)
    #[error("Provider '{provider}' rate limited the request")]
    RateLimited { provider: String },

    /// Provider errors (bad request, quota, permission, malformed payload)
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem / subprocess errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Video URL did not contain a recognizable video id
    #[error("Invalid video URL: {0}")]
    InvalidVideoUrl(String),

    /// Provider returned no item for the video id
    #[error("No video found for id: {0}")]
    VideoNotFound(String),

    /// Uploaded media is not in an accepted format
    #[error("Unsupported media format: {0}")]
    InvalidMediaFormat(String),

    /// Transcriber produced no text
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl SeoEngineError {
    /// Whether the failure is worth retrying with backoff
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SeoEngineError::RateLimited { .. })
    }

    /// Malformed URL or missing video both read as "not found" to callers
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SeoEngineError::InvalidVideoUrl(_) | SeoEngineError::VideoNotFound(_)
        )
    }
}

impl From<String> for SeoEngineError {
    fn from(s: String) -> Self {
        SeoEngineError::Other(s)
    }
}

impl From<&str> for SeoEngineError {
    fn from(s: &str) -> Self {
        SeoEngineError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SeoEngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        let err = SeoEngineError::RateLimited { provider: "youtube".to_string() };
        assert!(err.is_rate_limited());

        let err = SeoEngineError::Provider {
            provider: "youtube".to_string(),
            message: "HTTP 403 Forbidden: quotaExceeded".to_string(),
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(SeoEngineError::InvalidVideoUrl("not a url".into()).is_not_found());
        assert!(SeoEngineError::VideoNotFound("dQw4w9WgXcQ".into()).is_not_found());
        assert!(!SeoEngineError::Configuration("no key".into()).is_not_found());
    }
}
