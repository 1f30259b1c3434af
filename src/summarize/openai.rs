//! OpenAI chat-completion summarizer.

use super::{LengthBounds, Summarizer};
use crate::error::{OppsumError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

const SYSTEM_PROMPT: &str = "You are a summarization engine. Condense the text you are given \
into a short summary that preserves the key points. Respond with the summary only, no preamble.";

/// OpenAI-based summarizer.
pub struct OpenAISummarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAISummarizer {
    /// Create a summarizer with default settings.
    pub fn new() -> Self {
        Self::with_config("gpt-4o-mini", 0.3)
    }

    /// Create a summarizer with a custom model and temperature.
    pub fn with_config(model: &str, temperature: f32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
        }
    }
}

impl Default for OpenAISummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Summarizer for OpenAISummarizer {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let user_prompt = format!(
            "Summarize the following text in between {} and {} words:\n\n{}",
            bounds.min_length, bounds.max_length, text
        );

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT.to_string())
                .build()
                .map_err(|e| OppsumError::Summarization(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| OppsumError::Summarization(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| OppsumError::Summarization(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            OppsumError::OpenAI(format!("Summarization API error: {}", e))
        })?;

        let summary = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| OppsumError::Summarization("Empty response from LLM".to_string()))?
            .trim()
            .to_string();

        debug!("Generated {} character summary", summary.len());
        Ok(summary)
    }
}
