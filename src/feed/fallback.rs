use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("failed to read fallback {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed fallback {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a bundled document shaped like the live endpoint it replaces.
pub async fn load_fallback<T: DeserializeOwned>(path: &Path) -> Result<T, FallbackError> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| FallbackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_slice(&raw).map_err(|source| FallbackError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
