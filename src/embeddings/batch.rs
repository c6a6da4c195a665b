//! Batched HTTP embedding backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use super::{Embedder, PROBE_TEXT};
use crate::error::EmbedError;
use crate::Result;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Option<Vec<Vec<f32>>>,
}

/// Embedding backend that sends one request per batch of texts.
///
/// Speaks the `/api/embed` endpoint, which accepts multiple inputs in a
/// single request and returns one vector per input.
pub struct BatchEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: OnceCell<usize>,
}

impl BatchEmbedder {
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

    async fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
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
        let embeddings = parsed
            .embeddings
            .ok_or_else(|| EmbedError::Malformed("missing 'embeddings' field".to_string()))?;

        if embeddings.len() != texts.len() {
            return Err(EmbedError::Malformed(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            ))
            .into());
        }
        if let Some(index) = embeddings.iter().position(Vec::is_empty) {
            return Err(
                EmbedError::Malformed(format!("empty vector at index {index}")).into(),
            );
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl Embedder for BatchEmbedder {
    fn name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.request(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbedError::Malformed("empty response for single text".to_string()).into())
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
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
        let embedder = BatchEmbedder::new("http://127.0.0.1:11434", "nomic-embed-text");
        assert_eq!(embedder.name(), "nomic-embed-text");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let embedder = BatchEmbedder::new("http://127.0.0.1:11434/", "nomic-embed-text");
        assert_eq!(embedder.base_url, "http://127.0.0.1:11434");
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        // The port is unreachable; an empty input must still succeed.
        let embedder = BatchEmbedder::new("http://127.0.0.1:1", "nomic-embed-text");
        let vectors = embedder.embed_batch(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let embedder = BatchEmbedder::new("http://127.0.0.1:1", "nomic-embed-text");
        let result = embedder.embed_batch(&["text".to_string()]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dimension_fails_before_first_probe() {
        let embedder = BatchEmbedder::new("http://127.0.0.1:1", "nomic-embed-text");
        assert!(embedder.dimension().await.is_err());
    }
}
