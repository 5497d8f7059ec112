use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::modules::media::domain::repositories::{MediaStorage, StorageError};
use crate::modules::media::domain::value_objects::StorageReference;
use crate::shared::utils::logger::LogContext;

/// File storage rooted at a local directory (`IMAGE_STORAGE`)
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// StorageReference never carries `..` or absolute segments, so the join
    /// stays under the root.
    fn resolve(&self, reference: &StorageReference) -> PathBuf {
        reference
            .as_str()
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl MediaStorage for LocalFileStorage {
    async fn put(
        &self,
        bytes: &[u8],
        suggested_name: &StorageReference,
    ) -> Result<StorageReference, StorageError> {
        let path = self.resolve(suggested_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::from_io(suggested_name, e))?;
        }

        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::from_io(suggested_name, e))?;

        LogContext::storage_operation("put", suggested_name.as_str(), Ok(()));
        Ok(suggested_name.clone())
    }

    async fn delete(&self, reference: &StorageReference) -> Result<(), StorageError> {
        fs::remove_file(self.resolve(reference))
            .await
            .map_err(|e| StorageError::from_io(reference, e))?;

        LogContext::storage_operation("delete", reference.as_str(), Ok(()));
        Ok(())
    }

    async fn read(&self, reference: &StorageReference) -> Result<Vec<u8>, StorageError> {
        fs::read(self.resolve(reference))
            .await
            .map_err(|e| StorageError::from_io(reference, e))
    }
}
