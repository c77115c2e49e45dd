/// Transcript characters quoted at the start of the description
const EXCERPT_CHARS: usize = 200;
const HASHTAG_COUNT: usize = 5;
const UPLOAD_URL: &str = "https://youtube.com/upload";

/// Upload-ready description: transcript excerpt, keyword line, hashtags for
/// the first five keywords and the upload link.
pub fn seo_description(transcript: Option<&str>, keywords: &[String]) -> String {
    let transcript = transcript
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("No transcription available.");
    let excerpt: String = transcript.chars().take(EXCERPT_CHARS).collect();

    let hashtags: Vec<String> = keywords
        .iter()
        .take(HASHTAG_COUNT)
        .map(|k| format!("#{}", k.replace(char::is_whitespace, "")))
        .collect();

    format!(
        "{}... Optimized for SEO with keywords: {}. {} Upload to YouTube: {}",
        excerpt,
        keywords.join(", "),
        hashtags.join(", "),
        UPLOAD_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_layout() {
        let keywords: Vec<String> = ["fitness", "tips", "home workout"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let description = seo_description(Some("Three moves for a stronger core."), &keywords);

        assert_eq!(
            description,
            "Three moves for a stronger core.... Optimized for SEO with keywords: fitness, tips, home workout. \
             #fitness, #tips, #homeworkout Upload to YouTube: https://youtube.com/upload"
        );
    }

    #[test]
    fn test_excerpt_truncated_on_char_boundary() {
        let transcript = "é".repeat(300);
        let description = seo_description(Some(&transcript), &[]);

        assert!(description.starts_with(&"é".repeat(200)));
        assert!(!description.starts_with(&"é".repeat(201)));
    }

    #[test]
    fn test_missing_transcript_placeholder() {
        let description = seo_description(None, &["seo".to_string()]);
        assert!(description.starts_with("No transcription available...."));
    }
}
