//! PregGo HTTP server: `/chat` and `/style/add`.

use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use preggo_rag::chat::ChatService;
use preggo_rag::config::Settings;
use preggo_rag::providers::{Embedder, Generator, NebiusClient};
use preggo_rag::server::{self, AppState};
use preggo_rag::store::{DocumentStore, SqliteDocumentStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let settings = Settings::from_env()?;
    let store = SqliteDocumentStore::open(settings.db_path()).await?;

    // One client serves both provider capabilities.
    let nebius = Arc::new(NebiusClient::from_settings(&settings));
    let chat = ChatService::new(
        nebius.clone() as Arc<dyn Embedder>,
        nebius as Arc<dyn Generator>,
        Arc::new(store) as Arc<dyn DocumentStore>,
    );

    let state = AppState {
        chat: Arc::new(chat),
    };
    server::serve(state, &settings.bind_addr()).await?;

    Ok(())
}
