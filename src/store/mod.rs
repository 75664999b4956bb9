//! Document storage with vector similarity search.
//!
//! Two logical collections live side by side in one store: the reference
//! documents produced by ingestion and the style exemplars collected from
//! users. The [`DocumentStore`] trait keeps the orchestration code independent
//! of the concrete backend; production uses [`SqliteDocumentStore`] backed by
//! `sqlite-vec`.

pub mod sqlite;

pub use sqlite::SqliteDocumentStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::RagError;

/// The named collections persisted by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    /// Chunked reference content written by the ingestion pipeline.
    ReferenceDocs,
    /// Short tone exemplars appended one at a time.
    StyleExemplars,
}

impl Collection {
    /// Stable collection name used in persistence.
    pub fn name(self) -> &'static str {
        match self {
            Collection::ReferenceDocs => "preggo_docs",
            Collection::StyleExemplars => "style_examples",
        }
    }
}

/// A stored text unit plus scalar metadata.
///
/// Documents are immutable once written; there is no update or delete path.
/// Identity is assigned at construction time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub content: String,
    pub metadata: serde_json::Value,
}

impl StoredDocument {
    pub fn new(content: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            metadata,
        }
    }
}

/// Unified interface over the similarity-search backend.
///
/// Appends are assumed atomic at the store boundary; the chat flow only ever
/// reads, so no in-process locking is required on top.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Bulk-inserts documents with their embeddings into a collection.
    async fn add_documents(
        &self,
        collection: Collection,
        documents: Vec<(StoredDocument, Vec<f32>)>,
    ) -> Result<(), RagError>;

    /// Returns up to `top_k` documents ranked by similarity to the query
    /// embedding, most similar first. Ties are broken by the backend.
    async fn search(
        &self,
        collection: Collection,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<StoredDocument>, RagError>;

    /// Number of documents currently stored in a collection.
    async fn count(&self, collection: Collection) -> Result<usize, RagError>;
}
