//! Transcript resolution with ordered track fallback.
//!
//! Manually created captions are higher quality than generated ones, but
//! generated captions are still better than nothing, so resolution tries
//! manual first, then generated, then gives up.

use super::{ResolvedTranscript, TranscriptLine, TranscriptProvider, UnavailableReason};
use crate::error::{OppsumError, Result};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Sentinel text for non-speech caption lines.
const NON_SPEECH_MARKER: &str = "[Music]";

/// Resolves the best available transcript for a video.
pub struct TranscriptResolver {
    provider: Arc<dyn TranscriptProvider>,
    languages: Vec<String>,
    paragraph_window: usize,
}

impl TranscriptResolver {
    /// Create a resolver with the preferred languages and paragraph window.
    pub fn new(
        provider: Arc<dyn TranscriptProvider>,
        languages: Vec<String>,
        paragraph_window: usize,
    ) -> Self {
        Self {
            provider,
            languages,
            paragraph_window: paragraph_window.max(1),
        }
    }

    /// Resolve a transcript for the given video.
    ///
    /// Returns `Unavailable` for the permanent per-video conditions
    /// (captions disabled, no track in the preferred language, empty
    /// transcript); errors are reserved for provider failures.
    #[instrument(skip(self))]
    pub async fn resolve(&self, video_id: &str) -> Result<ResolvedTranscript> {
        let tracks = match self.provider.list_tracks(video_id).await {
            Ok(tracks) => tracks,
            Err(OppsumError::TranscriptsDisabled(_)) => {
                debug!("Transcripts disabled for {}", video_id);
                return Ok(ResolvedTranscript::Unavailable(UnavailableReason::Disabled));
            }
            Err(e) => return Err(e),
        };

        let track = match tracks
            .find_manual(&self.languages)
            .or_else(|| tracks.find_generated(&self.languages))
        {
            Some(track) => track,
            None => {
                debug!("No track in preferred languages for {}", video_id);
                return Ok(ResolvedTranscript::Unavailable(
                    UnavailableReason::NoEnglishTrack,
                ));
            }
        };

        debug!("Selected {:?} track in {}", track.kind, track.language);
        let lines = self.provider.fetch_track(track).await?;

        Ok(format_transcript(&lines, self.paragraph_window))
    }
}

/// Filter non-speech lines and group the rest into paragraphs.
///
/// Raw caption lines are too short and choppy to summarize in isolation,
/// so consecutive lines are joined into fixed-window paragraphs.
fn format_transcript(lines: &[TranscriptLine], paragraph_window: usize) -> ResolvedTranscript {
    let spoken: Vec<&str> = lines
        .iter()
        .map(|line| line.text.as_str())
        .filter(|text| *text != NON_SPEECH_MARKER)
        .collect();

    if spoken.is_empty() {
        return ResolvedTranscript::Unavailable(UnavailableReason::Empty);
    }

    let paragraphs: Vec<String> = spoken
        .chunks(paragraph_window)
        .map(|window| window.join(" "))
        .collect();

    ResolvedTranscript::Text(paragraphs.join("\n\n"))
}
