//! CLI module for Oppsum.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Oppsum - Video Summarization
///
/// A tool that condenses the spoken content of videos into short summaries.
/// The name "Oppsum" comes from the Norwegian word "oppsummering," meaning "summary."
#[derive(Parser, Debug)]
#[command(name = "oppsum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a video's spoken content
    Summarize {
        /// YouTube URL or video ID
        url: String,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Print the resolved transcript along with the summary
        #[arg(short, long)]
        transcript: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
