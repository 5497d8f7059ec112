use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::modules::media::domain::value_objects::StorageReference;
use crate::shared::errors::AppError;

/// Failure reported by a storage backend
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum StorageError {
    #[error("No stored file at {0}")]
    NotFound(String),

    #[error("Permission denied for {0}")]
    PermissionDenied(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

impl StorageError {
    pub fn from_io(reference: &StorageReference, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(reference.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::PermissionDenied(reference.to_string())
            }
            _ => StorageError::Io(format!("{}: {}", reference, err)),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(reference) => {
                AppError::NotFound(format!("Stored file {} not found", reference))
            }
            other => AppError::StorageFailure(other.to_string()),
        }
    }
}

/// Port for the file store holding uploaded images
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store bytes under the suggested name, returning where they landed
    async fn put(
        &self,
        bytes: &[u8],
        suggested_name: &StorageReference,
    ) -> Result<StorageReference, StorageError>;

    async fn delete(&self, reference: &StorageReference) -> Result<(), StorageError>;

    async fn read(&self, reference: &StorageReference) -> Result<Vec<u8>, StorageError>;
}
