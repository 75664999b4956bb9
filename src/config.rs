//! Environment-backed configuration for the PregGo binaries.
//!
//! All knobs are deployment concerns (provider credentials, store location,
//! bind address); none of them change pipeline behavior. A `.env` file is
//! honored when present.

use std::env;
use std::path::PathBuf;

use crate::types::RagError;

/// Default chat model served through the Nebius OpenAI-compatible API.
pub const DEFAULT_CHAT_MODEL: &str = "nebius/gpt-4o-like";

/// Default embedding model for both collections.
pub const DEFAULT_EMBEDDING_MODEL: &str = "BAAI/bge-en-icl";

const DEFAULT_BASE_URL: &str = "https://api.studio.nebius.ai";
const DEFAULT_DB_DIR: &str = "./preggo_db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Process-wide settings, built once at startup and handed to the service
/// constructors rather than read ambiently.
#[derive(Clone, Debug)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    /// Directory holding the vector store; created on first write.
    pub db_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Loads settings from the process environment, reading `.env` first.
    ///
    /// Only the API key is mandatory; everything else falls back to a default.
    pub fn from_env() -> Result<Self, RagError> {
        let _ = dotenvy::dotenv();

        let api_key = env::var("NEBIUS_API_KEY")
            .map_err(|_| RagError::Config("NEBIUS_API_KEY is not set".into()))?;
        let base_url =
            env::var("NEBIUS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let chat_model =
            env::var("NEBIUS_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());
        let embedding_model = env::var("NEBIUS_EMBEDDING_MODEL")
            .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let db_dir = env::var("PREGGO_DB_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_DIR));
        let host = env::var("PREGGO_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PREGGO_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| RagError::Config(format!("PREGGO_PORT '{raw}' is not a port")))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            base_url,
            chat_model,
            embedding_model,
            db_dir,
            host,
            port,
        })
    }

    /// Path of the SQLite file inside the store directory.
    pub fn db_path(&self) -> PathBuf {
        self.db_dir.join("preggo.db")
    }

    /// Socket address string for the HTTP server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
