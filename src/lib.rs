//! Oppsum - Video Summarization
//!
//! A service that condenses the spoken content of videos into short summaries.
//!
//! The name "Oppsum" comes from the Norwegian word "oppsummering," meaning "summary."
//!
//! # Overview
//!
//! Oppsum allows you to:
//! - Resolve the best available transcript for a YouTube video
//! - Produce a condensed summary of the transcript via chunked summarization
//! - Run as a one-shot CLI command or as an HTTP API
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video_source` - Video metadata extraction (YouTube)
//! - `transcript` - Transcript track resolution and formatting
//! - `chunking` - Fixed-size transcript segmentation
//! - `summarize` - Per-chunk summarization and assembly
//! - `pipeline` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use oppsum::config::Settings;
//! use oppsum::pipeline::{Pipeline, PipelineResult};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     match pipeline.summarize_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await {
//!         PipelineResult::Success { summary, .. } => println!("{}", summary),
//!         PipelineResult::Failure { message, .. } => eprintln!("{}", message),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod summarize;
pub mod transcript;
pub mod video_source;

pub use error::{OppsumError, Result};
