use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::providers::traits::{CompletionProvider, EmbeddingProvider};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    chat_model: String,
    embedding_model: String,
}

impl GeminiProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| anyhow!("GEMINI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            client: Client::new(),
            chat_model: config.gemini_chat_model.clone(),
            embedding_model: config.gemini_embedding_model.clone(),
        })
    }

    fn model_url(model: &str, method: &str) -> String {
        // Model names may come with or without the "models/" prefix.
        if model.starts_with("models/") {
            format!("{API_BASE}/{model}:{method}")
        } else {
            format!("{API_BASE}/models/{model}:{method}")
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(Self::model_url(&self.chat_model, "generateContent"))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": { "temperature": 0.0 }
            }))
            .send()
            .await?
            .error_for_status()?;

        let response_json: Value = response.json().await?;
        parse_generate_response(&response_json)
    }

    fn model(&self) -> &str {
        &self.chat_model
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(Self::model_url(&self.embedding_model, "embedContent"))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "model": self.embedding_model,
                "content": { "parts": [{ "text": text }] }
            }))
            .send()
            .await?
            .error_for_status()?;

        let response_json: Value = response.json().await?;
        parse_embed_response(&response_json)
    }

    fn model(&self) -> &str {
        &self.embedding_model
    }
}

fn parse_generate_response(response: &Value) -> Result<String> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("Invalid response format"))
}

fn parse_embed_response(response: &Value) -> Result<Vec<f32>> {
    response["embedding"]["values"]
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_f64())
                .map(|v| v as f32)
                .collect()
        })
        .ok_or_else(|| anyhow!("No embedding returned from Gemini"))
}
