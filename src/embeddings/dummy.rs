//! Lightweight deterministic embedder for tests and tooling.

use async_trait::async_trait;

use super::Embedder;
use crate::Result;

/// Embedder producing deterministic fixed-dimension vectors without a
/// backing model. The first component encodes the text length so that
/// different texts usually get different vectors.
#[derive(Debug, Clone)]
pub struct DummyEmbedder {
    dimension: usize,
}

impl DummyEmbedder {
    /// Create a dummy embedder with the given nonzero dimension.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    #[allow(clippy::cast_precision_loss)]
    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dimension];
        if let Some(first) = vector.first_mut() {
            *first = text.len() as f32;
        }
        vector
    }
}

#[async_trait]
impl Embedder for DummyEmbedder {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.vector_for(text)).collect())
    }

    async fn dimension(&self) -> Result<usize> {
        Ok(self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_is_deterministic() {
        let embedder = DummyEmbedder::new(4);
        let first = embedder.embed("fn main() {}").await.unwrap();
        let second = embedder.embed("fn main() {}").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[tokio::test]
    async fn test_dummy_batch_preserves_order() {
        let embedder = DummyEmbedder::new(4);
        let texts = vec!["a".to_string(), "longer text".to_string()];
        let vectors = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(vectors.len(), 2);
        assert!((vectors[0][0] - 1.0).abs() < f32::EPSILON);
        assert!((vectors[1][0] - 11.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_dummy_dimension() {
        let embedder = DummyEmbedder::new(16);
        assert_eq!(embedder.dimension().await.unwrap(), 16);
    }
}
