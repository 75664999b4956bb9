//! Capability traits for the hosted embedding and generation providers.
//!
//! The orchestration code only sees [`Embedder`] and [`Generator`], so it can
//! be exercised with deterministic fakes while production wires in the
//! [`NebiusClient`] for both capabilities.

pub mod nebius;

pub use nebius::NebiusClient;

use async_trait::async_trait;

use crate::types::RagError;

/// Converts text into vector representations for similarity search.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds a batch of texts, preserving input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError>;

    /// Embeds a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| RagError::Provider("embedding response was empty".into()))
    }
}

/// Turns a fully rendered prompt into a model reply.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, RagError>;
}

/// Deterministic in-process embedder for tests and offline smoke runs.
///
/// Vectors are derived from a byte-level hash of the input, so identical
/// texts always map to identical embeddings and distinct texts almost
/// always differ.
#[derive(Clone, Debug)]
pub struct MockEmbedder {
    dimensions: usize,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self { dimensions: 8 }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RagError> {
        let dims = self.dimensions.max(1);
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; dims];
                // FNV-style rolling hash spread across the vector.
                let mut acc: u64 = 0xcbf2_9ce4_8422_2325;
                for (i, byte) in text.bytes().enumerate() {
                    acc = acc.wrapping_mul(0x100_0000_01b3) ^ u64::from(byte);
                    vector[i % dims] += (acc % 1000) as f32 / 1000.0;
                }
                vector[0] += 1.0; // keep vectors away from the origin
                vector
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_embedder_is_deterministic() {
        let embedder = MockEmbedder::new();
        let inputs = vec![
            "hello".to_string(),
            "goodbye".to_string(),
            "hello".to_string(),
        ];

        let first = embedder.embed_batch(&inputs).await.unwrap();
        let second = embedder.embed_batch(&inputs).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0], first[2], "identical text, identical embedding");
        assert_ne!(first[0], first[1], "distinct text, distinct embedding");
    }

    #[tokio::test]
    async fn embed_single_returns_one_vector() {
        let embedder = MockEmbedder::with_dimensions(4);
        let vector = embedder.embed("sample").await.unwrap();
        assert_eq!(vector.len(), 4);
    }
}
