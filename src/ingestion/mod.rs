//! Offline ingestion of a document directory into the reference collection.
//!
//! ```text
//! data dir ──► loader (txt / csv / json) ──► documents
//!                                              │
//!                                              ▼
//!                                   splitter (800 / 100 overlap)
//!                                              │
//!                                              ▼
//!                            Embedder ──► DocumentStore (preggo_docs)
//! ```
//!
//! Failures are tolerated at file granularity: a file that cannot be loaded is
//! logged and skipped, and the run continues. A store failure during the
//! final bulk write is fatal; the batch job is re-runnable.

pub mod loader;
pub mod splitter;

pub use splitter::TextSplitter;

use std::path::Path;

use tracing::{debug, error, info};

use crate::providers::Embedder;
use crate::store::{Collection, DocumentStore, StoredDocument};
use crate::types::RagError;

/// Upper bound on texts per embedding request.
const EMBED_BATCH_SIZE: usize = 64;

/// Summary of one ingestion run.
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestReport {
    /// Files successfully loaded into documents.
    pub files_loaded: usize,
    /// Files skipped for an unrecognized extension.
    pub files_skipped: usize,
    /// Files that failed to load and were passed over.
    pub files_failed: usize,
    /// Documents collected before chunking.
    pub documents: usize,
    /// Chunks embedded and written to the reference collection.
    pub chunks_written: usize,
}

/// Reads every file in `dir`, chunks the collected documents, embeds the
/// chunks, and bulk-writes them into the reference collection.
pub async fn ingest_directory(
    dir: &Path,
    embedder: &dyn Embedder,
    store: &dyn DocumentStore,
    splitter: &TextSplitter,
) -> Result<IngestReport, RagError> {
    let mut report = IngestReport::default();
    let mut documents = Vec::new();

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match loader::load_file(&path).await {
            Ok(Some(docs)) => {
                debug!(file = %path.display(), documents = docs.len(), "loaded file");
                report.files_loaded += 1;
                documents.extend(docs);
            }
            Ok(None) => {
                debug!(file = %path.display(), "skipping unrecognized extension");
                report.files_skipped += 1;
            }
            Err(err) => {
                error!(file = %path.display(), %err, "failed to load file, skipping");
                report.files_failed += 1;
            }
        }
    }
    report.documents = documents.len();

    // Chunk every document; chunks inherit the source metadata.
    let mut chunks: Vec<StoredDocument> = Vec::new();
    for doc in &documents {
        for piece in splitter.split(&doc.content) {
            chunks.push(StoredDocument::new(piece, doc.metadata.clone()));
        }
    }
    info!(
        documents = report.documents,
        chunks = chunks.len(),
        "chunked ingestion batch"
    );

    let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(EMBED_BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|chunk| chunk.content.clone()).collect();
        embeddings.extend(embedder.embed_batch(&texts).await?);
    }
    if embeddings.len() != chunks.len() {
        return Err(RagError::Provider(format!(
            "expected {} embeddings, got {}",
            chunks.len(),
            embeddings.len()
        )));
    }

    let rows: Vec<(StoredDocument, Vec<f32>)> = chunks.into_iter().zip(embeddings).collect();
    report.chunks_written = rows.len();
    store.add_documents(Collection::ReferenceDocs, rows).await?;

    Ok(report)
}
