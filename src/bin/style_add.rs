//! Appends a single style exemplar to the style collection.
//!
//! Usage: `style-add [TEXT]`. Without an argument a built-in sample exemplar
//! is stored, which is handy for seeding a fresh deployment.

use std::sync::Arc;

use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use preggo_rag::chat::ChatService;
use preggo_rag::config::Settings;
use preggo_rag::providers::{Embedder, Generator, NebiusClient};
use preggo_rag::store::{DocumentStore, SqliteDocumentStore};

const SAMPLE_EXEMPLAR: &str =
    "It’s okay — you’re doing an amazing job. Take deep breaths, we’ll go step by step.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| SAMPLE_EXEMPLAR.to_string());

    let settings = Settings::from_env()?;
    let store = SqliteDocumentStore::open(settings.db_path()).await?;
    let nebius = Arc::new(NebiusClient::from_settings(&settings));
    let chat = ChatService::new(
        nebius.clone() as Arc<dyn Embedder>,
        nebius as Arc<dyn Generator>,
        Arc::new(store) as Arc<dyn DocumentStore>,
    );

    chat.add_style_exemplar(text, None).await?;
    info!("added style example");

    Ok(())
}
