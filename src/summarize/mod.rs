//! Per-chunk summarization and summary assembly.
//!
//! Each transcript chunk is summarized independently with adaptive length
//! bounds, then the fragments are joined into the final summary.

mod openai;

pub use openai::OpenAISummarizer;

use crate::chunking::Chunk;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Lower clamp for the maximum summary length, in words.
const MAX_LENGTH_FLOOR: u32 = 20;
/// Upper clamp for the maximum summary length, in words.
const MAX_LENGTH_CEILING: u32 = 100;
/// Lower clamp for the minimum summary length, in words.
const MIN_LENGTH_FLOOR: u32 = 5;
/// Upper clamp for the minimum summary length, in words.
const MIN_LENGTH_CEILING: u32 = 30;

/// Output length bounds for a single summarization call, in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_length: u32,
    pub max_length: u32,
}

/// Compute summary length bounds proportional to the chunk's word count.
///
/// Short chunks are not forced into overlong summaries and long chunks
/// cannot produce unbounded output. The two bounds are clamped
/// independently; they never cross for any non-negative word count.
pub fn compute_bounds(word_count: usize) -> LengthBounds {
    let words = word_count as f64;
    let max_length = ((words * 0.6).round() as u32).clamp(MAX_LENGTH_FLOOR, MAX_LENGTH_CEILING);
    let min_length = ((words * 0.3).round() as u32).clamp(MIN_LENGTH_FLOOR, MIN_LENGTH_CEILING);

    LengthBounds {
        min_length,
        max_length,
    }
}

/// The summarized output for one chunk.
#[derive(Debug, Clone)]
pub struct SummaryFragment {
    /// Index of the chunk this fragment was produced from.
    pub index: usize,
    /// Summary text.
    pub text: String,
}

/// Progress event emitted once per chunk before its summarization call.
#[derive(Debug, Clone)]
pub struct ChunkProgress {
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub word_count: usize,
}

/// Observer hook for per-chunk progress, decoupled from control flow.
pub trait ProgressSink: Send + Sync {
    fn on_chunk(&self, progress: &ChunkProgress);
}

/// Default progress sink that logs through tracing.
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_chunk(&self, progress: &ChunkProgress) {
        debug!(
            "Summarizing chunk {} of {} ({} words)",
            progress.chunk_index, progress.total_chunks, progress.word_count
        );
    }
}

/// Trait for the summarization capability.
///
/// Implementations must be safely reusable across calls; bounds are
/// per-call parameters, not state.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` into a condensed form within the given word bounds.
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String>;
}

/// Applies the summarization capability to each chunk in order.
pub struct ChunkSummarizer {
    summarizer: Arc<dyn Summarizer>,
    progress: Arc<dyn ProgressSink>,
}

impl ChunkSummarizer {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer,
            progress: Arc::new(TracingProgress),
        }
    }

    /// Replace the progress sink.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Summarize each chunk sequentially, producing one fragment per chunk.
    ///
    /// The first failure aborts the whole run; partial fragments are
    /// discarded by the caller.
    pub async fn summarize_chunks(&self, chunks: &[Chunk]) -> Result<Vec<SummaryFragment>> {
        let total_chunks = chunks.len();
        let mut fragments = Vec::with_capacity(total_chunks);

        for chunk in chunks {
            self.progress.on_chunk(&ChunkProgress {
                chunk_index: chunk.index,
                total_chunks,
                word_count: chunk.word_count,
            });

            let bounds = compute_bounds(chunk.word_count);
            let text = self.summarizer.summarize(&chunk.text, bounds).await?;
            fragments.push(SummaryFragment {
                index: chunk.index,
                text,
            });
        }

        Ok(fragments)
    }
}

/// Join fragment texts with a single space, in index order.
///
/// The assembled result is the final summary; it is not re-summarized.
pub fn assemble(fragments: &[SummaryFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
