pub mod gemini;
pub mod openai;
pub mod traits;

use anyhow::Result;

use crate::config::{AppConfig, ProviderKind};
use gemini::gemini::GeminiProvider;
use openai::openai::OpenAIProvider;
use traits::{CompletionProvider, EmbeddingProvider};

pub fn embeddings_provider(config: &AppConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.embeddings_provider {
        ProviderKind::Gemini => Ok(Box::new(GeminiProvider::new(config)?)),
        ProviderKind::OpenAi => Ok(Box::new(OpenAIProvider::new(config)?)),
    }
}

pub fn completion_provider(config: &AppConfig) -> Result<Box<dyn CompletionProvider>> {
    match config.llm_provider {
        ProviderKind::Gemini => Ok(Box::new(GeminiProvider::new(config)?)),
        ProviderKind::OpenAi => Ok(Box::new(OpenAIProvider::new(config)?)),
    }
}
