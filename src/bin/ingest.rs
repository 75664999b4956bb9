//! One-shot ingestion of a document directory into the reference collection.
//!
//! Usage: `ingest [DATA_DIR]` (defaults to `./data`).

use std::path::PathBuf;

use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use preggo_rag::config::Settings;
use preggo_rag::ingestion::{self, TextSplitter};
use preggo_rag::providers::NebiusClient;
use preggo_rag::store::SqliteDocumentStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data"));

    let settings = Settings::from_env()?;
    let embedder = NebiusClient::from_settings(&settings);
    let store = SqliteDocumentStore::open(settings.db_path()).await?;
    let splitter = TextSplitter::default();

    let report = ingestion::ingest_directory(&data_dir, &embedder, &store, &splitter).await?;

    info!(
        files_loaded = report.files_loaded,
        files_skipped = report.files_skipped,
        files_failed = report.files_failed,
        documents = report.documents,
        "ingested {} chunks", report.chunks_written
    );

    Ok(())
}
