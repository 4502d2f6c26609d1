//! Persists a fetched trigger batch, wrapped with fetch metadata, as a
//! single JSON document under the data directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fetch::TriggerBatch;
use crate::types::{Article, FetchParams};

/// How long a saved document is considered fresh. Advisory only: nothing
/// here enforces it, callers own any freshness policy.
const DOCUMENT_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write news document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize news document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Fetch metadata wrapped around every saved document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub fetched_at: DateTime<Local>,
    pub expires_at: DateTime<Local>,
    pub query_params: FetchParams,
}

/// The on-disk document: metadata plus the deduplicated article set.
/// Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultDocument {
    pub metadata: DocumentMetadata,
    pub status: String,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub articles: Vec<Article>,
}

impl ResultDocument {
    /// Wraps a batch with metadata stamped at `fetched_at`. Expiry is
    /// `fetched_at + 24h`.
    #[must_use]
    pub fn wrap(batch: &TriggerBatch, params: &FetchParams, fetched_at: DateTime<Local>) -> Self {
        Self {
            metadata: DocumentMetadata {
                fetched_at,
                expires_at: fetched_at + Duration::hours(DOCUMENT_TTL_HOURS),
                query_params: params.clone(),
            },
            status: "ok".to_string(),
            total_results: batch.total_results(),
            articles: batch.articles.clone(),
        }
    }
}

/// Writes the batch as a formatted JSON document to
/// `<data_dir>/<filename>`, creating the directory if needed, and returns
/// the written path.
///
/// # Errors
///
/// Returns [`PersistError`] if the directory cannot be created, the
/// document cannot be serialized, or the file cannot be written.
pub fn save_news(
    data_dir: &Path,
    filename: &str,
    batch: &TriggerBatch,
    params: &FetchParams,
) -> Result<PathBuf, PersistError> {
    let document = ResultDocument::wrap(batch, params, Local::now());

    std::fs::create_dir_all(data_dir).map_err(|e| PersistError::Io {
        path: data_dir.display().to_string(),
        source: e,
    })?;

    let path = data_dir.join(filename);
    let content = serde_json::to_string_pretty(&document)?;
    std::fs::write(&path, content).map_err(|e| PersistError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), articles = document.total_results, "news document saved");
    Ok(path)
}
