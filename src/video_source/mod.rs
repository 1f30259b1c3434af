//! Video source abstraction for Oppsum.
//!
//! Provides a trait-based interface for video metadata extraction so the
//! pipeline can be tested with substitute sources.

mod youtube;

pub use youtube::YoutubeSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata about a video, fixed once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoReference {
    /// Canonical video identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Canonical watch URL.
    pub canonical_url: String,
    /// Duration in seconds.
    pub duration_seconds: u32,
    /// Channel or uploader name.
    pub channel_name: String,
    /// Channel URL.
    pub channel_url: String,
}

/// Trait for video metadata providers.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Fetch metadata for a video given a URL or bare ID.
    async fn fetch_metadata(&self, input: &str) -> Result<VideoReference>;

    /// Extract the video ID from input (URL or bare ID).
    fn extract_id(&self, input: &str) -> Option<String>;

    /// Thumbnail URL for a video ID.
    fn thumbnail_url(&self, video_id: &str) -> String;
}

/// Download a video thumbnail to `output_dir`, returning the written path.
///
/// Best-effort: callers treat a failure as non-fatal.
pub async fn download_thumbnail(
    source: &dyn VideoSource,
    video_id: &str,
    output_dir: &std::path::Path,
) -> Result<std::path::PathBuf> {
    let url = source.thumbnail_url(video_id);
    let bytes = reqwest::get(&url).await?.error_for_status()?.bytes().await?;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.jpg", video_id));
    std::fs::write(&path, &bytes)?;
    Ok(path)
}
