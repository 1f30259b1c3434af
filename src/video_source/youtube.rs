//! YouTube source implementation.

use super::{VideoReference, VideoSource};
use crate::error::{OppsumError, Result};
use async_trait::async_trait;
use regex::Regex;

/// YouTube video source backed by yt-dlp.
pub struct YoutubeSource {
    video_id_regex: Regex,
}

impl YoutubeSource {
    pub fn new() -> Self {
        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self { video_id_regex }
    }

    /// Extract video ID from a YouTube URL or bare ID.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        // Try group 1 (URL format) then group 2 (bare ID)
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    /// Fetch metadata using yt-dlp.
    async fn fetch_metadata_ytdlp(&self, video_id: &str) -> Result<VideoReference> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                "--ignore-errors",
                &url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OppsumError::ToolNotFound("yt-dlp".to_string())
                } else {
                    OppsumError::VideoSource(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OppsumError::VideoNotFound(format!(
                "Video {} not found or unavailable: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str).map_err(|e| {
            OppsumError::VideoSource(format!("Failed to parse yt-dlp output: {}", e))
        })?;

        Ok(Self::reference_from_json(video_id, &json))
    }

    /// Build a video reference from yt-dlp's info JSON.
    fn reference_from_json(video_id: &str, json: &serde_json::Value) -> VideoReference {
        let title = json["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();

        let canonical_url = json["webpage_url"]
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", video_id));

        let duration_seconds = json["duration"].as_f64().unwrap_or(0.0) as u32;

        let channel_name = json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .unwrap_or("Unknown Channel")
            .to_string();

        let channel_url = json["channel_url"]
            .as_str()
            .or_else(|| json["uploader_url"].as_str())
            .unwrap_or_default()
            .to_string();

        VideoReference {
            id: video_id.to_string(),
            title,
            canonical_url,
            duration_seconds,
            channel_name,
            channel_url,
        }
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoSource for YoutubeSource {
    async fn fetch_metadata(&self, input: &str) -> Result<VideoReference> {
        let video_id = self.extract_video_id(input).ok_or_else(|| {
            OppsumError::InvalidInput(format!("Invalid YouTube video ID or URL: {}", input))
        })?;

        self.fetch_metadata_ytdlp(&video_id).await
    }

    fn extract_id(&self, input: &str) -> Option<String> {
        self.extract_video_id(input)
    }

    fn thumbnail_url(&self, video_id: &str) -> String {
        format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
    }
}
