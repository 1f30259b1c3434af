//! Pipeline coordination for Oppsum.
//!
//! Sequences metadata extraction, transcript resolution, segmentation,
//! summarization, and assembly. Every failure is converted into a single
//! `PipelineResult::Failure`; callers never observe partial results.

use crate::chunking::segment;
use crate::config::Settings;
use crate::error::{OppsumError, Result};
use crate::summarize::{assemble, ChunkSummarizer, OpenAISummarizer, ProgressSink, Summarizer};
use crate::transcript::{
    ResolvedTranscript, TranscriptProvider, TranscriptResolver, YtDlpTranscriptProvider,
};
use crate::video_source::{download_thumbnail, VideoReference, VideoSource, YoutubeSource};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Category of a pipeline failure, used by the transport to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing or malformed input.
    InvalidInput,
    /// Video unreachable or unrecognized.
    Metadata,
    /// No usable transcript for the video; permanent, never retried.
    TranscriptUnavailable,
    /// The summarization capability failed.
    Summarization,
    /// Anything uncategorized.
    Internal,
}

/// Outcome of a summarization request.
#[derive(Debug, Clone)]
pub enum PipelineResult {
    Success {
        video: VideoReference,
        transcript: String,
        summary: String,
    },
    Failure {
        kind: FailureKind,
        message: String,
    },
}

impl PipelineResult {
    fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        PipelineResult::Failure {
            kind,
            message: message.into(),
        }
    }
}

/// The main pipeline for video summarization.
pub struct Pipeline {
    settings: Settings,
    source: Arc<dyn VideoSource>,
    resolver: TranscriptResolver,
    chunk_summarizer: ChunkSummarizer,
}

impl Pipeline {
    /// Create a pipeline with default capability implementations.
    pub fn new(settings: Settings) -> Result<Self> {
        let source: Arc<dyn VideoSource> = Arc::new(YoutubeSource::new());
        let provider: Arc<dyn TranscriptProvider> = Arc::new(YtDlpTranscriptProvider::new());
        let summarizer: Arc<dyn Summarizer> = Arc::new(OpenAISummarizer::with_config(
            &settings.summarization.model,
            settings.summarization.temperature,
        ));

        Ok(Self::with_components(settings, source, provider, summarizer))
    }

    /// Create a pipeline with custom capability implementations.
    pub fn with_components(
        settings: Settings,
        source: Arc<dyn VideoSource>,
        provider: Arc<dyn TranscriptProvider>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let resolver = TranscriptResolver::new(
            provider,
            settings.transcript.languages.clone(),
            settings.transcript.paragraph_window,
        );

        Self {
            settings,
            source,
            resolver,
            chunk_summarizer: ChunkSummarizer::new(summarizer),
        }
    }

    /// Replace the per-chunk progress sink.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.chunk_summarizer = self.chunk_summarizer.with_progress(progress);
        self
    }

    /// Summarize the video at `url`, returning a single success or failure.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn summarize_url(&self, url: &str) -> PipelineResult {
        if url.trim().is_empty() {
            return PipelineResult::failure(FailureKind::InvalidInput, "No URL provided");
        }

        match self.run(url).await {
            Ok(result) => result,
            Err(e) => PipelineResult::failure(failure_kind(&e), e.to_string()),
        }
    }

    async fn run(&self, url: &str) -> Result<PipelineResult> {
        info!("Fetching metadata");
        let video = self.source.fetch_metadata(url).await?;
        info!("Title: {}", video.title);

        info!("Resolving transcript");
        let transcript = match self.resolver.resolve(&video.id).await? {
            ResolvedTranscript::Text(text) => text,
            ResolvedTranscript::Unavailable(reason) => {
                return Ok(PipelineResult::failure(
                    FailureKind::TranscriptUnavailable,
                    reason.message(),
                ));
            }
        };

        // Best-effort thumbnail fetch; a failure never fails the request
        if let Err(e) =
            download_thumbnail(self.source.as_ref(), &video.id, &self.settings.temp_dir()).await
        {
            warn!("Failed to download thumbnail: {}", e);
        }

        let chunks = segment(&transcript, self.settings.chunking.chunk_size);
        info!("Segmented transcript into {} chunks", chunks.len());

        let fragments = self.chunk_summarizer.summarize_chunks(&chunks).await?;
        let summary = assemble(&fragments);

        Ok(PipelineResult::Success {
            video,
            transcript,
            summary,
        })
    }
}

/// Map an error to the failure category the transport branches on.
fn failure_kind(error: &OppsumError) -> FailureKind {
    match error {
        OppsumError::InvalidInput(_) => FailureKind::InvalidInput,
        OppsumError::VideoSource(_) | OppsumError::VideoNotFound(_) => FailureKind::Metadata,
        OppsumError::TranscriptsDisabled(_) | OppsumError::Transcript(_) => {
            FailureKind::TranscriptUnavailable
        }
        OppsumError::Summarization(_) | OppsumError::OpenAI(_) => FailureKind::Summarization,
        _ => FailureKind::Internal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::LengthBounds;
    use crate::transcript::{Track, TrackKind, TrackList, TranscriptLine};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        fetch_calls: AtomicUsize,
    }

    impl MockSource {
        fn new() -> Self {
            Self {
                fetch_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VideoSource for MockSource {
        async fn fetch_metadata(&self, input: &str) -> Result<VideoReference> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            let id = self
                .extract_id(input)
                .ok_or_else(|| OppsumError::InvalidInput(format!("Bad input: {}", input)))?;
            Ok(VideoReference {
                id,
                title: "Test Video".to_string(),
                canonical_url: input.to_string(),
                duration_seconds: 60,
                channel_name: "Test Channel".to_string(),
                channel_url: "https://example.com/channel".to_string(),
            })
        }

        fn extract_id(&self, input: &str) -> Option<String> {
            input.strip_prefix("video:").map(|s| s.to_string())
        }

        // Unroutable host so the best-effort thumbnail fetch fails fast
        fn thumbnail_url(&self, video_id: &str) -> String {
            format!("http://127.0.0.1:1/{}.jpg", video_id)
        }
    }

    struct MockProvider {
        lines: Vec<TranscriptLine>,
        disabled: bool,
    }

    #[async_trait]
    impl TranscriptProvider for MockProvider {
        async fn list_tracks(&self, video_id: &str) -> Result<TrackList> {
            if self.disabled {
                return Err(OppsumError::TranscriptsDisabled(video_id.to_string()));
            }
            Ok(TrackList::new(vec![Track {
                language: "en".to_string(),
                kind: TrackKind::Manual,
                url: "mock".to_string(),
            }]))
        }

        async fn fetch_track(&self, _track: &Track) -> Result<Vec<TranscriptLine>> {
            Ok(self.lines.clone())
        }
    }

    struct MockSummarizer;

    #[async_trait]
    impl Summarizer for MockSummarizer {
        async fn summarize(&self, text: &str, _bounds: LengthBounds) -> Result<String> {
            Ok(format!("<{}>", text.split_whitespace().next().unwrap_or("")))
        }
    }

    fn lines(texts: &[&str]) -> Vec<TranscriptLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptLine {
                start: i as f64,
                text: text.to_string(),
            })
            .collect()
    }

    fn pipeline(provider: MockProvider) -> Pipeline {
        Pipeline::with_components(
            Settings::default(),
            Arc::new(MockSource::new()),
            Arc::new(provider),
            Arc::new(MockSummarizer),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_single_chunk() {
        let provider = MockProvider {
            lines: lines(&[
                "[Music]",
                "Hello world",
                "Hello world",
                "Hello world",
                "Hello world",
                "Goodbye",
            ]),
            disabled: false,
        };

        let result = pipeline(provider).summarize_url("video:abc").await;
        match result {
            PipelineResult::Success {
                video,
                transcript,
                summary,
            } => {
                assert_eq!(video.id, "abc");
                // [Music] filtered, then windows of 4 joined by blank lines
                assert_eq!(
                    transcript,
                    "Hello world Hello world Hello world Hello world\n\nGoodbye"
                );
                // One chunk, so the summary is the lone fragment verbatim
                assert_eq!(summary, "<Hello>");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transcript_unavailable_fails_before_segmentation() {
        let provider = MockProvider {
            lines: Vec::new(),
            disabled: false,
        };

        let result = pipeline(provider).summarize_url("video:abc").await;
        match result {
            PipelineResult::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::TranscriptUnavailable);
                assert!(message.contains("empty"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_disabled_transcripts_fail() {
        let provider = MockProvider {
            lines: Vec::new(),
            disabled: true,
        };

        let result = pipeline(provider).summarize_url("video:abc").await;
        match result {
            PipelineResult::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::TranscriptUnavailable);
                assert!(message.contains("disabled"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_url_skips_external_calls() {
        let source = Arc::new(MockSource::new());
        let pipeline = Pipeline::with_components(
            Settings::default(),
            source.clone(),
            Arc::new(MockProvider {
                lines: Vec::new(),
                disabled: false,
            }),
            Arc::new(MockSummarizer),
        );

        let result = pipeline.summarize_url("  ").await;
        match result {
            PipelineResult::Failure { kind, .. } => assert_eq!(kind, FailureKind::InvalidInput),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(source.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bad_input_maps_to_invalid_input() {
        let provider = MockProvider {
            lines: Vec::new(),
            disabled: false,
        };

        let result = pipeline(provider).summarize_url("garbage").await;
        match result {
            PipelineResult::Failure { kind, .. } => assert_eq!(kind, FailureKind::InvalidInput),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_summarizer_failure_discards_partial_results() {
        struct FailingSummarizer;

        #[async_trait]
        impl Summarizer for FailingSummarizer {
            async fn summarize(&self, _text: &str, _bounds: LengthBounds) -> Result<String> {
                Err(OppsumError::Summarization("model exploded".to_string()))
            }
        }

        let pipeline = Pipeline::with_components(
            Settings::default(),
            Arc::new(MockSource::new()),
            Arc::new(MockProvider {
                lines: lines(&["some spoken content"]),
                disabled: false,
            }),
            Arc::new(FailingSummarizer),
        );

        let result = pipeline.summarize_url("video:abc").await;
        match result {
            PipelineResult::Failure { kind, .. } => assert_eq!(kind, FailureKind::Summarization),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
