//! Configuration management for Oppsum.

mod settings;

pub use settings::{
    ChunkingSettings, GeneralSettings, ServerSettings, Settings, SummarizationSettings,
    TranscriptSettings,
};
