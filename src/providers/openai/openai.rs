use anyhow::{anyhow, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
        CreateEmbeddingRequestArgs, EmbeddingInput, Role,
    },
    Client,
};
use async_trait::async_trait;

use crate::config::AppConfig;
use crate::providers::traits::{CompletionProvider, EmbeddingProvider};

#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client<OpenAIConfig>,
    chat_model: String,
    embedding_model: String,
}

impl OpenAIProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY not set"))?;
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));

        Ok(Self {
            client,
            chat_model: config.openai_chat_model.clone(),
            embedding_model: config.openai_embedding_model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .temperature(0.0)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    role: Role::User,
                    content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                    name: None,
                },
            )])
            .build()?;

        let response = self.client.chat().create(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow!("No response content"))
    }

    fn model(&self) -> &str {
        &self.chat_model
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.embedding_model)
            .input(EmbeddingInput::String(text.to_string()))
            .build()?;

        let response = self.client.embeddings().create(request).await?;

        response
            .data
            .first()
            .map(|embedding| embedding.embedding.clone())
            .ok_or_else(|| anyhow!("No embedding returned from OpenAI"))
    }

    fn model(&self) -> &str {
        &self.embedding_model
    }
}
