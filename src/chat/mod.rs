//! Chat orchestration: retrieve, assemble, generate.
//!
//! [`ChatService`] owns the three injected capabilities (embedder, store,
//! generator) and runs the whole `/chat` flow plus style-exemplar intake. It
//! keeps no per-request state; every prompt is rebuilt from scratch.

pub mod prompt;

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::providers::{Embedder, Generator};
use crate::store::{Collection, DocumentStore, StoredDocument};
use crate::types::RagError;

/// Documents retrieved per collection for each chat request.
pub const RETRIEVAL_TOP_K: usize = 3;

pub struct ChatService {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    store: Arc<dyn DocumentStore>,
}

impl ChatService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            embedder,
            generator,
            store,
        }
    }

    /// Runs the full retrieve-assemble-generate flow for one user message.
    ///
    /// The message is embedded once and used to query both collections; the
    /// two retrievals are sequential and independent. No retry, no timeout
    /// beyond what the providers enforce.
    pub async fn answer(&self, message: &str) -> Result<String, RagError> {
        let query = self.embedder.embed(message).await?;

        let docs = self
            .store
            .search(Collection::ReferenceDocs, &query, RETRIEVAL_TOP_K)
            .await?;
        let styles = self
            .store
            .search(Collection::StyleExemplars, &query, RETRIEVAL_TOP_K)
            .await?;

        debug!(
            reference_hits = docs.len(),
            style_hits = styles.len(),
            "retrieval complete"
        );

        let context_docs = join_contents(&docs);
        let style_examples = join_contents(&styles);
        let prompt_text = prompt::render_prompt(
            prompt::SYSTEM_PROMPT,
            &context_docs,
            &style_examples,
            message,
        );

        self.generator.generate(&prompt_text).await
    }

    /// Appends one style exemplar to the style collection.
    ///
    /// Absent metadata defaults to `{"tone": "soothing", "rating": 5}`;
    /// supplied metadata is stored as-is, unvalidated.
    pub async fn add_style_exemplar(
        &self,
        text: String,
        meta: Option<serde_json::Value>,
    ) -> Result<(), RagError> {
        let meta = meta.unwrap_or_else(default_style_meta);
        let embedding = self.embedder.embed(&text).await?;
        let document = StoredDocument::new(text, meta);
        self.store
            .add_documents(Collection::StyleExemplars, vec![(document, embedding)])
            .await
    }
}

/// Default metadata applied when a style exemplar arrives without any.
pub fn default_style_meta() -> serde_json::Value {
    json!({"tone": "soothing", "rating": 5})
}

fn join_contents(documents: &[StoredDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
