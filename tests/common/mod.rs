//! Shared fakes for exercising the orchestration layer without live
//! providers or a real vector store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use preggo_rag::providers::Generator;
use preggo_rag::store::{Collection, DocumentStore, StoredDocument};
use preggo_rag::types::RagError;

/// In-memory document store. "Similarity" ranking is insertion order, which
/// keeps retrieval assertions deterministic.
#[derive(Default)]
pub struct FakeStore {
    collections: Mutex<HashMap<&'static str, Vec<(StoredDocument, Vec<f32>)>>>,
}

impl FakeStore {
    pub fn documents(&self, collection: Collection) -> Vec<StoredDocument> {
        self.collections
            .lock()
            .unwrap()
            .get(collection.name())
            .map(|rows| rows.iter().map(|(doc, _)| doc.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn add_documents(
        &self,
        collection: Collection,
        documents: Vec<(StoredDocument, Vec<f32>)>,
    ) -> Result<(), RagError> {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.name())
            .or_default()
            .extend(documents);
        Ok(())
    }

    async fn search(
        &self,
        collection: Collection,
        _query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<StoredDocument>, RagError> {
        Ok(self
            .documents(collection)
            .into_iter()
            .take(top_k)
            .collect())
    }

    async fn count(&self, collection: Collection) -> Result<usize, RagError> {
        Ok(self.documents(collection).len())
    }
}

/// Store whose writes always fail; used to check that bulk-write failures
/// surface instead of being swallowed.
#[derive(Default)]
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn add_documents(
        &self,
        _collection: Collection,
        _documents: Vec<(StoredDocument, Vec<f32>)>,
    ) -> Result<(), RagError> {
        Err(RagError::Storage("disk full".into()))
    }

    async fn search(
        &self,
        _collection: Collection,
        _query_embedding: &[f32],
        _top_k: usize,
    ) -> Result<Vec<StoredDocument>, RagError> {
        Err(RagError::Storage("disk full".into()))
    }

    async fn count(&self, _collection: Collection) -> Result<usize, RagError> {
        Err(RagError::Storage("disk full".into()))
    }
}

/// Generator that records the prompt it was handed and replies with a canned
/// answer.
pub struct FakeGenerator {
    pub last_prompt: Mutex<Option<String>>,
    pub reply: String,
}

impl Default for FakeGenerator {
    fn default() -> Self {
        Self {
            last_prompt: Mutex::new(None),
            reply: "You're doing great — rest and check in with your midwife.".to_string(),
        }
    }
}

impl FakeGenerator {
    pub fn prompt(&self) -> String {
        self.last_prompt
            .lock()
            .unwrap()
            .clone()
            .expect("generator was never invoked")
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, RagError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Generator that always fails, mimicking an upstream provider outage.
#[derive(Default)]
pub struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, RagError> {
        Err(RagError::Provider("model endpoint unreachable".into()))
    }
}
