use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{Result, SeoEngineError};

/// Turns local media into spoken-word text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// `Ok(None)` when the media holds no recognizable speech
    async fn transcribe(&self, media: &Path) -> Result<Option<String>>;

    /// Whether the backend's toolchain is usable on this host
    async fn is_available(&self) -> bool;

    fn name(&self) -> &str;
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// ffmpeg audio extraction followed by the `whisper` CLI
pub struct WhisperCliTranscriber {
    ffmpeg: PathBuf,
    whisper: PathBuf,
    model: String,
}

impl WhisperCliTranscriber {
    pub fn new(ffmpeg: impl Into<PathBuf>, whisper: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            whisper: whisper.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.ffmpeg_path, &config.whisper_path, &config.whisper_model)
    }

    /// 16 kHz mono PCM, what whisper expects
    async fn extract_audio(&self, media: &Path, wav: &Path) -> Result<()> {
        info!("🔊 Extracting audio from {}", media.display());

        let output = Command::new(&self.ffmpeg)
            .arg("-y")
            .arg("-i")
            .arg(media)
            .args(["-vn", "-ac", "1", "-ar", "16000", "-c:a", "pcm_s16le"])
            .arg(wav)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SeoEngineError::TranscriptionFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.lines().last().unwrap_or_default()
            )));
        }

        Ok(())
    }
}

async fn command_runs(program: &Path, arg: &str) -> bool {
    Command::new(program)
        .arg(arg)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(&self, media: &Path) -> Result<Option<String>> {
        // Removed with everything in it when dropped
        let scratch = tempfile::tempdir()?;
        let wav = scratch.path().join("audio.wav");

        self.extract_audio(media, &wav).await?;

        info!("📝 Transcribing with whisper ({})", self.model);
        let output = Command::new(&self.whisper)
            .arg(&wav)
            .args(["--model", &self.model])
            .args(["--output_format", "txt"])
            .arg("--output_dir")
            .arg(scratch.path())
            .args(["--fp16", "False"])
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SeoEngineError::TranscriptionFailed(format!(
                "whisper exited with {}: {}",
                output.status,
                stderr.lines().last().unwrap_or_default()
            )));
        }

        let text = tokio::fs::read_to_string(scratch.path().join("audio.txt")).await?;
        debug!("Transcript: {} chars", text.len());
        Ok(non_empty(text))
    }

    async fn is_available(&self) -> bool {
        command_runs(&self.ffmpeg, "-version").await && command_runs(&self.whisper, "--help").await
    }

    fn name(&self) -> &str {
        "whisper-cli"
    }
}

/// Reads a transcript stored next to the media (`talk.mp4` → `talk.txt`)
pub struct SidecarTranscriber;

impl SidecarTranscriber {
    pub fn new() -> Self {
        Self
    }

    pub fn transcript_path(media: &Path) -> PathBuf {
        media.with_extension("txt")
    }
}

impl Default for SidecarTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for SidecarTranscriber {
    async fn transcribe(&self, media: &Path) -> Result<Option<String>> {
        let path = Self::transcript_path(media);

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(non_empty(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("⚠️ No transcript found at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "sidecar"
    }
}

/// Pick the transcription backend once, at startup: whisper when its
/// toolchain runs on this host, otherwise sidecar transcripts.
pub async fn select_transcriber(config: &EngineConfig) -> Arc<dyn Transcriber> {
    let whisper = WhisperCliTranscriber::from_config(config);

    if whisper.is_available().await {
        info!("✅ Whisper transcriber initialized ({})", config.whisper_model);
        Arc::new(whisper)
    } else {
        warn!("⚠️ ffmpeg/whisper unavailable, using sidecar transcripts");
        Arc::new(SidecarTranscriber::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sidecar_reads_neighbour_file() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("talk.mp4");
        std::fs::write(&media, b"").unwrap();
        std::fs::write(dir.path().join("talk.txt"), "  squats and deadlifts \n").unwrap();

        let text = SidecarTranscriber::new().transcribe(&media).await.unwrap();
        assert_eq!(text.as_deref(), Some("squats and deadlifts"));
    }

    #[tokio::test]
    async fn test_sidecar_missing_or_blank_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("silent.mp4");

        assert_eq!(SidecarTranscriber::new().transcribe(&media).await.unwrap(), None);

        std::fs::write(dir.path().join("silent.txt"), "   ").unwrap();
        assert_eq!(SidecarTranscriber::new().transcribe(&media).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_toolchain_falls_back_to_sidecar() {
        let config = EngineConfig {
            ffmpeg_path: "/nonexistent/ffmpeg".to_string(),
            ..Default::default()
        };

        let transcriber = select_transcriber(&config).await;
        assert_eq!(transcriber.name(), "sidecar");
    }
}
