use crate::core::record::ProductRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationError(String),
    #[error("Serialization failed: {0}")]
    SerializationError(String),
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        StorageError::OperationError(error.to_string())
    }
}

impl From<csv::Error> for StorageError {
    fn from(error: csv::Error) -> Self {
        StorageError::SerializationError(error.to_string())
    }
}

/// Append-only sink for product records, one destination per job.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Prepares the destination for `name` and writes the header row.
    async fn initialize(&self, name: &str) -> Result<PathBuf, StorageError>;

    async fn store(&self, name: &str, record: &ProductRecord) -> Result<(), StorageError>;
}
