//! SQLite-backed document store with vector search via `sqlite-vec`.
//!
//! Both collections share one table; embeddings are stored as JSON float
//! arrays and compared with `vec_distance_cosine` at query time. This keeps
//! the whole persistence story in a single file under the configured store
//! directory.

use std::mem::transmute;
use std::os::raw::c_char;
use std::path::Path;
use std::sync::Once;

use async_trait::async_trait;
use tokio_rusqlite::{Connection, ffi};

use super::{Collection, DocumentStore, StoredDocument};
use crate::types::RagError;

#[derive(Clone)]
pub struct SqliteDocumentStore {
    conn: Connection,
}

impl SqliteDocumentStore {
    /// Opens (creating if needed) the store at `path`.
    ///
    /// The parent directory is created on demand and the `sqlite-vec`
    /// extension is verified to be loadable before any query runs.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RagError> {
        Self::register_sqlite_vec()?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|err| RagError::Storage(err.to_string()))?;

        conn.call(|conn| -> Result<(), tokio_rusqlite::rusqlite::Error> {
            conn.query_row("select vec_version()", [], |row| row.get::<_, String>(0))?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS documents (
                    id         TEXT PRIMARY KEY,
                    collection TEXT NOT NULL,
                    content    TEXT NOT NULL,
                    metadata   TEXT NOT NULL,
                    embedding  TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_documents_collection
                    ON documents(collection);",
            )?;
            Ok(())
        })
        .await
        .map_err(|err| RagError::Storage(err.to_string()))?;

        Ok(Self { conn })
    }

    fn register_sqlite_vec() -> Result<(), RagError> {
        use std::sync::atomic::{AtomicI32, Ordering};

        static INIT: Once = Once::new();
        static INIT_RC: AtomicI32 = AtomicI32::new(0);

        INIT.call_once(|| {
            let rc = unsafe {
                type SqliteExtensionInit = unsafe extern "C" fn(
                    *mut ffi::sqlite3,
                    *mut *mut c_char,
                    *const ffi::sqlite3_api_routines,
                ) -> i32;

                let init: unsafe extern "C" fn() = sqlite_vec::sqlite3_vec_init;
                let init_fn: SqliteExtensionInit =
                    transmute::<unsafe extern "C" fn(), SqliteExtensionInit>(init);
                ffi::sqlite3_auto_extension(Some(init_fn))
            };
            INIT_RC.store(rc, Ordering::SeqCst);
        });

        let rc = INIT_RC.load(Ordering::SeqCst);
        if rc != 0 {
            return Err(RagError::Storage(format!(
                "failed to register sqlite-vec extension (code {rc})"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn add_documents(
        &self,
        collection: Collection,
        documents: Vec<(StoredDocument, Vec<f32>)>,
    ) -> Result<(), RagError> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut rows = Vec::with_capacity(documents.len());
        for (doc, embedding) in documents {
            let embedding_json = serde_json::to_string(&embedding)?;
            let metadata_json = doc.metadata.to_string();
            rows.push((doc.id, doc.content, metadata_json, embedding_json));
        }
        let collection_name = collection.name();

        self.conn
            .call(move |conn| -> Result<(), tokio_rusqlite::rusqlite::Error> {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx
                        .prepare(
                            "INSERT INTO documents (id, collection, content, metadata, embedding)
                             VALUES (?, ?, ?, ?, ?)",
                        )?;
                    for (id, content, metadata, embedding) in &rows {
                        stmt.execute((id, collection_name, content, metadata, embedding))?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|err| RagError::Storage(err.to_string()))
    }

    async fn search(
        &self,
        collection: Collection,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<StoredDocument>, RagError> {
        let embedding_json = serde_json::to_string(query_embedding)?;
        let collection_name = collection.name();

        let rows = self
            .conn
            .call(move |conn| -> Result<Vec<(String, String, String)>, tokio_rusqlite::rusqlite::Error> {
                let mut stmt = conn
                    .prepare(&format!(
                        "SELECT id, content, metadata, \
                         vec_distance_cosine(vec_f32(embedding), vec_f32(?)) AS distance \
                         FROM documents \
                         WHERE collection = ? \
                         ORDER BY distance ASC \
                         LIMIT {top_k}"
                    ))?;

                let mapped = stmt
                    .query_map((&embedding_json, collection_name), |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                        ))
                    })?;

                let mut rows = Vec::new();
                for row in mapped {
                    rows.push(row?);
                }
                Ok(rows)
            })
            .await
            .map_err(|err| RagError::Storage(err.to_string()))?;

        // Metadata is parsed outside the closure; a corrupt row is an error,
        // never a silent null.
        let mut results = Vec::with_capacity(rows.len());
        for (id, content, metadata) in rows {
            results.push(StoredDocument {
                id,
                content,
                metadata: serde_json::from_str(&metadata)?,
            });
        }
        Ok(results)
    }

    async fn count(&self, collection: Collection) -> Result<usize, RagError> {
        let collection_name = collection.name();

        self.conn
            .call(move |conn| -> Result<usize, tokio_rusqlite::rusqlite::Error> {
                let count: i64 = conn
                    .query_row(
                        "SELECT COUNT(*) FROM documents WHERE collection = ?",
                        [collection_name],
                        |row| row.get(0),
                    )?;
                Ok(count as usize)
            })
            .await
            .map_err(|err| RagError::Storage(err.to_string()))
    }
}
