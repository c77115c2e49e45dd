//! Engine configuration.
//!
//! Values come from the process environment (a `.env` file is honoured by
//! the binaries through `dotenvy`). Every field has a default, so a partial
//! environment only overrides what it names:
//!
//! | Variable                    | Field                      | Default |
//! |-----------------------------|----------------------------|---------|
//! | `YOUTUBE_API_KEY`           | `api_key`                  | unset   |
//! | `SEO_MAX_RESULTS`           | `max_results`              | 5       |
//! | `SEO_HTTP_TIMEOUT_SECS`     | `http_timeout_secs`        | 10      |
//! | `SEO_RETRY_MAX_ATTEMPTS`    | `retry.max_attempts`       | 3       |
//! | `SEO_RETRY_BACKOFF_UNIT_MS` | `retry.backoff_unit_ms`    | 1000    |
//! | `SEO_WEIGHT_LIKES`          | `weights.likes`            | 1.0     |
//! | `SEO_WEIGHT_COMMENTS`       | `weights.comments`         | 2.0     |
//! | `SEO_WEIGHT_VIEWS`          | `weights.views`            | 0.05    |
//! | `SEO_SCORE_SATURATION`      | `weights.saturation`       | 5000    |
//! | `FFMPEG_PATH`               | `ffmpeg_path`              | ffmpeg  |
//! | `WHISPER_PATH`              | `whisper_path`             | whisper |
//! | `WHISPER_MODEL`             | `whisper_model`            | base    |
//! | `SEO_SUMMARIZER_ENDPOINT`   | `summarizer_endpoint`      | unset   |
//! | `SEO_SUMMARIZER_MODEL`      | `summarizer_model`         | local-model |
//! | `SEO_SUMMARIZER_API_KEY`    | `summarizer_api_key`       | unset   |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::ranking::{RetryPolicy, ScoreWeights};

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search provider credential; `None` disables ranking and analytics
    pub api_key: Option<String>,

    /// Videos sampled per keyword
    pub max_results: u32,

    /// Per-request HTTP timeout for provider calls
    pub http_timeout_secs: u64,

    pub weights: ScoreWeights,

    pub retry: RetryPolicy,

    /// Audio extraction binary used by the whisper transcriber
    pub ffmpeg_path: String,

    pub whisper_path: String,

    pub whisper_model: String,

    /// OpenAI-compatible chat completions URL; unset means no summarization
    pub summarizer_endpoint: Option<String>,

    pub summarizer_model: String,

    /// Bearer token for the summarizer endpoint
    pub summarizer_api_key: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: 5,
            http_timeout_secs: 10,
            weights: ScoreWeights::default(),
            retry: RetryPolicy::default(),
            ffmpeg_path: "ffmpeg".to_string(),
            whisper_path: "whisper".to_string(),
            whisper_model: "base".to_string(),
            summarizer_endpoint: None,
            summarizer_model: "local-model".to_string(),
            summarizer_api_key: None,
        }
    }
}

impl EngineConfig {
    /// Build from the current process environment.
    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build from an explicit variable map, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let api_key = non_blank(vars, API_KEY_VAR);

        Self {
            api_key,
            max_results: parse_or(vars, "SEO_MAX_RESULTS", defaults.max_results),
            http_timeout_secs: parse_or(vars, "SEO_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            weights: ScoreWeights {
                likes: parse_or(vars, "SEO_WEIGHT_LIKES", defaults.weights.likes),
                comments: parse_or(vars, "SEO_WEIGHT_COMMENTS", defaults.weights.comments),
                views: parse_or(vars, "SEO_WEIGHT_VIEWS", defaults.weights.views),
                epsilon: defaults.weights.epsilon,
                saturation: parse_or(vars, "SEO_SCORE_SATURATION", defaults.weights.saturation),
            },
            retry: RetryPolicy {
                max_attempts: parse_or(vars, "SEO_RETRY_MAX_ATTEMPTS", defaults.retry.max_attempts)
                    .max(1),
                backoff_unit_ms: parse_or(
                    vars,
                    "SEO_RETRY_BACKOFF_UNIT_MS",
                    defaults.retry.backoff_unit_ms,
                ),
            },
            ffmpeg_path: non_blank(vars, "FFMPEG_PATH").unwrap_or(defaults.ffmpeg_path),
            whisper_path: non_blank(vars, "WHISPER_PATH").unwrap_or(defaults.whisper_path),
            whisper_model: non_blank(vars, "WHISPER_MODEL").unwrap_or(defaults.whisper_model),
            summarizer_endpoint: non_blank(vars, "SEO_SUMMARIZER_ENDPOINT"),
            summarizer_model: non_blank(vars, "SEO_SUMMARIZER_MODEL")
                .unwrap_or(defaults.summarizer_model),
            summarizer_api_key: non_blank(vars, "SEO_SUMMARIZER_API_KEY"),
        }
    }

    /// Whether a provider credential is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_blank(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(vars: &HashMap<String, String>, key: &str, default: T) -> T {
    match vars.get(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("⚠️ Ignoring unparseable {}={:?}", key, raw);
                default
            }
        },
        None => default,
    }
}

impl std::fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "api_key={}, max_results={}, timeout={}s, retry={}x{}ms, weights=({}, {}, {}, K={})",
            if self.has_api_key() { "set" } else { "missing" },
            self.max_results,
            self.http_timeout_secs,
            self.retry.max_attempts,
            self.retry.backoff_unit_ms,
            self.weights.likes,
            self.weights.comments,
            self.weights.views,
            self.weights.saturation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.weights.comments, 2.0);
    }

    #[test]
    fn test_from_vars_partial() {
        let config = EngineConfig::from_vars(&vars(&[
            ("YOUTUBE_API_KEY", "abc123"),
            ("SEO_MAX_RESULTS", "10"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.max_results, 10);
        assert_eq!(config.http_timeout_secs, 10); // default
        assert_eq!(config.weights, ScoreWeights::default());
        assert_eq!(config.whisper_model, "base");
        assert_eq!(config.summarizer_endpoint, None);
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = EngineConfig::from_vars(&vars(&[("YOUTUBE_API_KEY", "   ")]));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = EngineConfig::from_vars(&vars(&[
            ("SEO_MAX_RESULTS", "lots"),
            ("SEO_RETRY_MAX_ATTEMPTS", "0"),
        ]));

        assert_eq!(config.max_results, 5);
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_display_hides_key() {
        let config = EngineConfig::from_vars(&vars(&[
            ("YOUTUBE_API_KEY", "secret"),
            ("SEO_SUMMARIZER_API_KEY", "hidden"),
        ]));
        let display = config.to_string();
        assert!(display.contains("api_key=set"));
        assert!(!display.contains("secret"));
        assert!(!display.contains("hidden"));
    }

    #[test]
    fn test_summarizer_settings() {
        let config = EngineConfig::from_vars(&vars(&[
            ("SEO_SUMMARIZER_ENDPOINT", "http://localhost:1234/v1/chat/completions"),
            ("SEO_SUMMARIZER_API_KEY", "sk-local"),
        ]));

        assert_eq!(
            config.summarizer_endpoint.as_deref(),
            Some("http://localhost:1234/v1/chat/completions")
        );
        assert_eq!(config.summarizer_api_key.as_deref(), Some("sk-local"));
        assert_eq!(config.summarizer_model, "local-model");
    }
}
