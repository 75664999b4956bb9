//! Retrieval-augmented chat backend for the PregGo pregnancy support assistant.
//!
//! ```text
//! client ──► POST /chat ──► ChatService ──► DocumentStore (reference top-3)
//!                               │          ──► DocumentStore (style top-3)
//!                               │
//!                               ▼
//!                        prompt assembly ──► Generator ──► {"answer": ...}
//!
//! data dir ──► ingestion::ingest_directory ──► chunks ──► Embedder
//!                                                            │
//!                                                            ▼
//!                                            DocumentStore (preggo_docs)
//! ```
//!
//! External capabilities (embedding, generation, vector search) sit behind the
//! [`providers::Embedder`], [`providers::Generator`], and
//! [`store::DocumentStore`] traits so the orchestration layer can be tested
//! with fakes.

pub mod chat;
pub mod config;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod store;
pub mod types;
