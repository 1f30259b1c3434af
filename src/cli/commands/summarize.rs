//! One-shot summarize command.

use crate::cli::output::{format_duration, Output};
use crate::config::Settings;
use crate::pipeline::{Pipeline, PipelineResult};
use crate::summarize::{ChunkProgress, ProgressSink};
use indicatif::ProgressBar;
use std::sync::Arc;

/// Progress sink that drives an indicatif bar, one tick per chunk.
struct BarProgress {
    bar: ProgressBar,
}

impl ProgressSink for BarProgress {
    fn on_chunk(&self, progress: &ChunkProgress) {
        self.bar.set_length(progress.total_chunks as u64);
        self.bar.set_message(format!(
            "chunk {} ({} words)",
            progress.chunk_index, progress.word_count
        ));
        self.bar.inc(1);
    }
}

/// Run the summarize command.
pub async fn run_summarize(
    url: &str,
    output: Option<String>,
    show_transcript: bool,
    settings: Settings,
) -> anyhow::Result<()> {
    let bar = Output::progress_bar(1, "summarizing");
    let pipeline = Pipeline::new(settings)?.with_progress(Arc::new(BarProgress {
        bar: bar.clone(),
    }));

    Output::info(&format!("Summarizing {}", url));
    let result = pipeline.summarize_url(url).await;
    bar.finish_and_clear();

    match result {
        PipelineResult::Success {
            video,
            transcript,
            summary,
        } => {
            Output::header(&video.title);
            Output::kv("Channel", &video.channel_name);
            Output::kv("Duration", &format_duration(video.duration_seconds));
            Output::kv("URL", &video.canonical_url);

            if show_transcript {
                Output::header("Transcript");
                println!("{}", transcript);
            }

            Output::header("Summary");
            println!("{}", summary);

            if let Some(path) = output {
                std::fs::write(&path, &summary)?;
                Output::success(&format!("Summary written to {}", path));
            }

            Ok(())
        }
        PipelineResult::Failure { message, .. } => {
            Output::error(&message);
            anyhow::bail!("{}", message)
        }
    }
}
