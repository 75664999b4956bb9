//! OpenAI-compatible client for the hosted Nebius models.
//!
//! One client serves both capabilities: `/v1/embeddings` for [`Embedder`] and
//! `/v1/chat/completions` for [`Generator`]. No retries and no local timeout
//! policy; the caller surfaces whatever the provider returns.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{Embedder, Generator};
use crate::config::Settings;
use crate::types::RagError;

pub struct NebiusClient {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    embedding_model: String,
}

impl NebiusClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        chat_model: impl Into<String>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            chat_model: chat_model.into(),
            embedding_model: embedding_model.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.api_key,
            &settings.base_url,
            &settings.chat_model,
            &settings.embedding_model,
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Collapses a failed response into a provider error, noting whether a
    /// credential was configured at all (the usual culprit).
    async fn api_error(&self, response: reqwest::Response) -> RagError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            %status,
            api_key_present = !self.api_key.is_empty(),
            "nebius request failed: {body}"
        );
        RagError::Provider(format!("{status}: {body}"))
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl Embedder for NebiusClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingsRequest {
            model: &self.embedding_model,
            input: texts,
        };

        debug!(count = texts.len(), "embedding batch via nebius");

        let response = self
            .client
            .post(self.endpoint("/v1/embeddings"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.api_error(response).await);
        }

        let mut parsed: EmbeddingsResponse = response.json().await?;
        // The API may return items out of order; restore input order.
        parsed.data.sort_by_key(|item| item.index);

        if parsed.data.len() != texts.len() {
            return Err(RagError::Provider(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        Ok(parsed.data.into_iter().map(|item| item.embedding).collect())
    }
}

#[async_trait]
impl Generator for NebiusClient {
    async fn generate(&self, prompt: &str) -> Result<String, RagError> {
        let body = json!({
            "model": self.chat_model,
            "messages": [{"role": "user", "content": prompt}],
        });

        debug!(model = %self.chat_model, "chat completion via nebius");

        let response = self
            .client
            .post(self.endpoint("/v1/chat/completions"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.api_error(response).await);
        }

        let parsed: serde_json::Value = response.json().await?;
        let answer = parsed["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                RagError::Provider("response missing choices[0].message.content".into())
            })?
            .to_string();

        Ok(answer)
    }
}
