//! Transcript track resolution for Oppsum.
//!
//! Provides a trait-based interface over caption track listing and fetching,
//! and a resolver that picks the best available track for summarization.

mod resolver;
mod ytdlp;

pub use resolver::TranscriptResolver;
pub use ytdlp::YtDlpTranscriptProvider;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How a caption track was authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Manually created captions.
    Manual,
    /// Automatically generated captions.
    Generated,
}

/// A single caption track for a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Language code of the track (e.g. "en", "en-US").
    pub language: String,
    /// Whether the track is manual or generated.
    pub kind: TrackKind,
    /// URL where the track payload can be fetched.
    pub url: String,
}

/// The set of caption tracks available for a video.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Find a manually created track in one of the given languages.
    pub fn find_manual(&self, languages: &[String]) -> Option<&Track> {
        self.find(TrackKind::Manual, languages)
    }

    /// Find an automatically generated track in one of the given languages.
    pub fn find_generated(&self, languages: &[String]) -> Option<&Track> {
        self.find(TrackKind::Generated, languages)
    }

    fn find(&self, kind: TrackKind, languages: &[String]) -> Option<&Track> {
        // Languages are tried in priority order; regional variants count
        languages.iter().find_map(|lang| {
            self.tracks
                .iter()
                .find(|t| t.kind == kind && language_matches(&t.language, lang))
        })
    }
}

/// Whether a track language code matches a preferred language.
///
/// Accepts exact matches and regional variants ("en-US" matches "en").
fn language_matches(track_language: &str, preferred: &str) -> bool {
    track_language.eq_ignore_ascii_case(preferred)
        || track_language
            .to_ascii_lowercase()
            .starts_with(&format!("{}-", preferred.to_ascii_lowercase()))
}

/// A single timed caption line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Start offset in seconds.
    pub start: f64,
    /// Caption text.
    pub text: String,
}

/// Why a usable transcript could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Transcripts are disabled for the video.
    Disabled,
    /// No track exists in the preferred language.
    NoEnglishTrack,
    /// The transcript had no usable lines.
    Empty,
}

impl UnavailableReason {
    /// User-facing message for the failure response.
    pub fn message(&self) -> &'static str {
        match self {
            UnavailableReason::Disabled => "Transcripts are disabled for this video",
            UnavailableReason::NoEnglishTrack => "No English transcript available for this video",
            UnavailableReason::Empty => "Transcript data is empty for this video",
        }
    }
}

/// Outcome of transcript resolution.
///
/// The pipeline branches on this before attempting summarization.
#[derive(Debug, Clone)]
pub enum ResolvedTranscript {
    /// Paragraphed transcript text ready for segmentation.
    Text(String),
    /// No usable transcript; a permanent condition for the video.
    Unavailable(UnavailableReason),
}

/// Trait for caption track providers.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List available caption tracks for a video.
    ///
    /// Fails with `OppsumError::TranscriptsDisabled` when the video has
    /// captions turned off entirely.
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList>;

    /// Fetch the timed lines of a track.
    async fn fetch_track(&self, track: &Track) -> Result<Vec<TranscriptLine>>;
}
