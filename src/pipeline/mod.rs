//! Collaborators feeding the ranking engine: media → transcript → keywords,
//! plus the upload description built from them.

pub mod description;
pub mod keywords;
pub mod transcriber;

pub use description::seo_description;
pub use keywords::{
    default_keywords, keywords_from_text, KeywordExtractor, StopwordKeywordExtractor,
    SummarizingKeywordExtractor, DEFAULT_KEYWORDS, MAX_KEYWORDS,
};
pub use transcriber::{select_transcriber, SidecarTranscriber, Transcriber, WhisperCliTranscriber};
