//! Serial HTTP embedding backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use super::{Embedder, PROBE_TEXT};
use crate::error::EmbedError;
use crate::Result;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Option<Vec<f32>>,
}

/// Embedding backend that makes one network round-trip per text.
///
/// Speaks the `/api/embeddings` endpoint, which takes a single prompt
/// per request. A batch is a sequential loop; the first failing text
/// fails the whole call.
pub struct SerialEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: OnceCell<usize>,
}

impl SerialEmbedder {
    /// Create a backend talking to `base_url` with the given model.
    #[must_use]
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            dimension: OnceCell::new(),
        }
    }
}

#[async_trait]
impl Embedder for SerialEmbedder {
    fn name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let body = EmbedRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(EmbedError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EmbedError::Backend {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        let parsed: EmbedResponse = response.json().await.map_err(EmbedError::Request)?;
        let embedding = parsed
            .embedding
            .ok_or_else(|| EmbedError::Malformed("missing 'embedding' field".to_string()))?;
        if embedding.is_empty() {
            return Err(EmbedError::Malformed("empty vector".to_string()).into());
        }

        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    async fn dimension(&self) -> Result<usize> {
        self.dimension
            .get_or_try_init(|| async {
                let probe = self.embed(PROBE_TEXT).await?;
                Ok::<usize, crate::Error>(probe.len())
            })
            .await
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_model() {
        let embedder = SerialEmbedder::new("http://127.0.0.1:11434", "all-minilm");
        assert_eq!(embedder.name(), "all-minilm");
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        let embedder = SerialEmbedder::new("http://127.0.0.1:1", "all-minilm");
        let vectors = embedder.embed_batch(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let embedder = SerialEmbedder::new("http://127.0.0.1:1", "all-minilm");
        assert!(embedder.embed("text").await.is_err());
    }
}
