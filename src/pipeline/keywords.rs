use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::{Result, SeoEngineError};

pub const MAX_KEYWORDS: usize = 10;

/// Used whenever extraction has nothing to work with
pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "seo",
    "video",
    "optimization",
    "ranking",
    "keywords",
    "content",
    "analysis",
    "strategy",
    "traffic",
    "digital",
];

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "did", "didn", "do", "does", "doesn", "doing", "don",
    "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has", "hasn",
    "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his",
    "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "ma", "me",
    "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "re", "same", "shan", "she", "should", "shouldn", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "ve", "very", "was", "wasn", "we",
    "were", "weren", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "won", "wouldn", "you", "your", "yours", "yourself", "yourselves",
];

pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Lowercased alphanumeric tokens minus stopwords and tokens of <= 2 chars,
/// de-duplicated in first-seen order, at most `MAX_KEYWORDS`.
pub fn keywords_from_text(text: &str) -> Vec<String> {
    let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();

    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() > 2 && !stopwords.contains(token))
        .filter(|token| seen.insert(token.to_string()))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Turns transcript text into ranking candidates
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Up to `MAX_KEYWORDS` distinct keywords; never empty
    async fn extract(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &str;
}

/// Keywords straight from the transcript
pub struct StopwordKeywordExtractor;

#[async_trait]
impl KeywordExtractor for StopwordKeywordExtractor {
    async fn extract(&self, text: &str) -> Vec<String> {
        let keywords = keywords_from_text(text);
        if keywords.is_empty() {
            tracing::warn!("⚠️ No keywords in text, using fallback keywords");
            return default_keywords();
        }
        keywords
    }

    fn name(&self) -> &str {
        "stopword"
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

const SUMMARY_PROMPT: &str = "Summarize the following video transcript in 40 to 150 words. \
Keep the concrete topics, names and terms a viewer would search for.";

/// Transcript characters sent for summarization
const MAX_INPUT_CHARS: usize = 4000;

/// Summarizes through an OpenAI-compatible chat endpoint, then extracts
/// keywords from the summary. Any failure yields `DEFAULT_KEYWORDS`.
pub struct SummarizingKeywordExtractor {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl SummarizingKeywordExtractor {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
        })
    }

    /// `None` when no summarizer endpoint is configured
    pub fn from_config(config: &EngineConfig) -> Result<Option<Self>> {
        let Some(endpoint) = &config.summarizer_endpoint else {
            return Ok(None);
        };

        let extractor = Self::new(endpoint.clone(), config.summarizer_model.clone())?
            .with_api_key(config.summarizer_api_key.clone());
        Ok(Some(extractor))
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SUMMARY_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.chars().take(MAX_INPUT_CHARS).collect(),
                },
            ],
            max_tokens: 256,
            temperature: 0.2,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SeoEngineError::Provider {
                provider: "summarizer".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let chat: ChatResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SeoEngineError::Provider {
                provider: "summarizer".to_string(),
                message: "No choices in response".to_string(),
            })
    }
}

#[async_trait]
impl KeywordExtractor for SummarizingKeywordExtractor {
    async fn extract(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            tracing::warn!("⚠️ No transcription text provided, using fallback keywords");
            return default_keywords();
        }

        match self.summarize(text).await {
            Ok(summary) => {
                let keywords = keywords_from_text(&summary);
                if keywords.is_empty() {
                    default_keywords()
                } else {
                    keywords
                }
            }
            Err(e) => {
                tracing::error!("❌ SEO keyword generation failed: {}", e);
                default_keywords()
            }
        }
    }

    fn name(&self) -> &str {
        "summarizer"
    }
}
