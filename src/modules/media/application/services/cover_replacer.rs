use std::sync::Arc;

use serde::Serialize;

use crate::modules::media::domain::repositories::{MediaStorage, StorageError};
use crate::modules::media::domain::services::{ContentHasher, UploadPolicy, UploadedFile};
use crate::modules::media::domain::value_objects::{MediaOwner, StorageReference};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;
use crate::{log_debug, log_warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CoverOutcome {
    /// Upload is byte-identical to the stored cover and was dropped
    Unchanged,
    #[serde(rename_all = "camelCase")]
    Replaced {
        cover: StorageReference,
        previous_removed: bool,
    },
}

/// A cover written to storage whose owner row is not saved yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedCover {
    Unchanged,
    Stored {
        cover: StorageReference,
        previous: Option<StorageReference>,
        /// `cover` is the file the owner already points at
        reused_current: bool,
    },
}

impl StagedCover {
    /// Reference the owner should point at once saved, if it changed
    pub fn new_cover(&self) -> Option<&StorageReference> {
        match self {
            StagedCover::Unchanged => None,
            StagedCover::Stored { cover, .. } => Some(cover),
        }
    }
}

/// Swaps an anime cover, skipping uploads identical to the stored file.
///
/// The swap is split so the owner row can be saved in between: `stage`
/// writes the new file, `commit` removes the previous one, `abandon` removes
/// the new one when the save failed.
pub struct CoverReplacer {
    storage: Arc<dyn MediaStorage>,
    policy: UploadPolicy,
}

impl CoverReplacer {
    pub fn new(storage: Arc<dyn MediaStorage>, policy: UploadPolicy) -> Self {
        Self { storage, policy }
    }

    pub async fn stage(
        &self,
        owner: MediaOwner,
        current: Option<&StorageReference>,
        upload: UploadedFile,
    ) -> AppResult<StagedCover> {
        let target = self
            .policy
            .target_reference(&owner.cover_directory(), &upload)?;

        let existing = match current {
            Some(reference) => self.read_current(reference).await,
            None => None,
        };

        if ContentHasher::is_duplicate(&upload.bytes, existing.as_deref()) {
            log_debug!("Cover upload for {} matches stored cover, discarding", owner);
            return Ok(StagedCover::Unchanged);
        }

        let stored = self.storage.put(&upload.bytes, &target).await?;
        LogContext::storage_operation("put", stored.as_str(), Ok(()));

        // An unreadable current cover with the same content resolves to the
        // same name, so the put rewrote the live file
        let reused_current = current == Some(&stored);
        Ok(StagedCover::Stored {
            previous: current.filter(|old| *old != &stored).cloned(),
            cover: stored,
            reused_current,
        })
    }

    /// Remove the previous cover. A failed delete is logged, never raised.
    pub async fn commit(&self, staged: StagedCover) -> CoverOutcome {
        match staged {
            StagedCover::Unchanged => CoverOutcome::Unchanged,
            StagedCover::Stored {
                cover,
                previous,
                ..
            } => {
                let previous_removed = match previous {
                    Some(old) => self.remove_quietly(&old).await,
                    None => false,
                };
                CoverOutcome::Replaced {
                    cover,
                    previous_removed,
                }
            }
        }
    }

    /// Undo `stage` after the owner could not be saved. A staged file that
    /// is also the live cover stays.
    pub async fn abandon(&self, staged: StagedCover) {
        match staged {
            StagedCover::Stored {
                cover,
                reused_current: false,
                ..
            } => {
                self.remove_quietly(&cover).await;
            }
            StagedCover::Stored { cover, .. } => {
                log_debug!("Keeping {} on abandon, the owner still references it", cover);
            }
            StagedCover::Unchanged => {}
        }
    }

    /// Stage and commit in one go, for callers with nothing to save between
    pub async fn replace(
        &self,
        owner: MediaOwner,
        current: Option<&StorageReference>,
        upload: UploadedFile,
    ) -> AppResult<CoverOutcome> {
        let staged = self.stage(owner, current, upload).await?;
        Ok(self.commit(staged).await)
    }

    async fn remove_quietly(&self, reference: &StorageReference) -> bool {
        match self.storage.delete(reference).await {
            Ok(()) => {
                LogContext::storage_operation("delete", reference.as_str(), Ok(()));
                true
            }
            Err(err) => {
                LogContext::storage_operation("delete", reference.as_str(), Err(&err.to_string()));
                false
            }
        }
    }

    /// Bytes of the stored cover; a missing file counts as no cover
    async fn read_current(&self, reference: &StorageReference) -> Option<Vec<u8>> {
        match self.storage.read(reference).await {
            Ok(bytes) => Some(bytes),
            Err(StorageError::NotFound(_)) => None,
            Err(err) => {
                log_warn!("Could not read current cover {}: {}", reference, err);
                None
            }
        }
    }
}
