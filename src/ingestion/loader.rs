//! File loaders turning directory entries into reference documents.
//!
//! Three formats are recognized: plain text, CSV (one document per row,
//! fields flattened as `header: value` lines), and JSON (shape-dependent, see
//! [`JsonRoot`]). Every produced document carries `{"source": <filename>}`
//! metadata.

use std::path::Path;

use serde_json::{Value, json};

use crate::store::StoredDocument;
use crate::types::RagError;

/// Root shape of a parsed JSON source file, handled exhaustively.
#[derive(Debug)]
pub enum JsonRoot {
    /// Top-level array: one document per element.
    Array(Vec<Value>),
    /// Single top-level object: one document for the whole file.
    Object(Value),
}

impl JsonRoot {
    /// Classifies a parsed value; scalar roots are rejected since they carry
    /// no usable structure.
    pub fn classify(value: Value, file: &str) -> Result<Self, RagError> {
        match value {
            Value::Array(items) => Ok(JsonRoot::Array(items)),
            Value::Object(_) => Ok(JsonRoot::Object(value)),
            other => Err(RagError::Loader {
                file: file.to_string(),
                reason: format!("unsupported JSON root: {other}"),
            }),
        }
    }
}

/// Loads one file into documents.
///
/// Returns `Ok(None)` for unrecognized extensions so the pipeline can skip
/// them; any read or parse failure is an error scoped to this file.
pub async fn load_file(path: &Path) -> Result<Option<Vec<StoredDocument>>, RagError> {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return Ok(None);
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();

    match extension.to_ascii_lowercase().as_str() {
        "txt" => {
            let content = read_file(path, &file_name).await?;
            Ok(Some(vec![StoredDocument::new(
                content,
                json!({"source": file_name}),
            )]))
        }
        "csv" => {
            let content = read_file(path, &file_name).await?;
            load_csv(&content, &file_name).map(Some)
        }
        "json" => {
            let content = read_file(path, &file_name).await?;
            load_json(&content, &file_name).map(Some)
        }
        _ => Ok(None),
    }
}

async fn read_file(path: &Path, file_name: &str) -> Result<String, RagError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| RagError::Loader {
            file: file_name.to_string(),
            reason: err.to_string(),
        })
}

/// One document per record, each field rendered as a `header: value` line.
fn load_csv(content: &str, file_name: &str) -> Result<Vec<StoredDocument>, RagError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader
        .headers()
        .map_err(|err| RagError::Loader {
            file: file_name.to_string(),
            reason: err.to_string(),
        })?
        .clone();

    let mut documents = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|err| RagError::Loader {
            file: file_name.to_string(),
            reason: err.to_string(),
        })?;

        let flattened = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| format!("{header}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");

        documents.push(StoredDocument::new(
            flattened,
            json!({"source": file_name, "row": row}),
        ));
    }
    Ok(documents)
}

fn load_json(content: &str, file_name: &str) -> Result<Vec<StoredDocument>, RagError> {
    let value: Value = serde_json::from_str(content).map_err(|err| RagError::Loader {
        file: file_name.to_string(),
        reason: err.to_string(),
    })?;

    let documents = match JsonRoot::classify(value, file_name)? {
        JsonRoot::Array(items) => items
            .into_iter()
            .map(|item| StoredDocument::new(element_text(item), json!({"source": file_name})))
            .collect(),
        JsonRoot::Object(object) => vec![StoredDocument::new(
            object.to_string(),
            json!({"source": file_name}),
        )],
    };
    Ok(documents)
}

/// Array elements: objects re-serialize compactly, everything else is
/// stringified (bare strings stay unquoted).
fn element_text(item: Value) -> String {
    match item {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
