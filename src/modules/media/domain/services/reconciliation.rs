/// Media set reconciliation planning
///
/// Pure computation: given the current photos of an owner, the references the
/// client says it keeps and the freshly uploaded files, decide which assets
/// go and which uploads come in. Nothing here touches storage or the database.
use std::collections::HashSet;
use std::fmt;

use crate::modules::media::domain::entities::{MediaAsset, MediaSet};
use crate::modules::media::domain::services::content_hasher::ContentHasher;
use crate::modules::media::domain::value_objects::{MediaOwner, StorageReference};
use crate::shared::config::UploadConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

/// A file received from the client, held in memory
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(original_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("original_name", &self.original_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// An upload scheduled for storage, with the reference it will be stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub reference: StorageReference,
    pub file: UploadedFile,
}

/// Decides where uploads are written and which extensions are acceptable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Storage reference an upload resolves to: `<directory>/<sha256>.<ext>`.
    ///
    /// The extension is re-validated here because it becomes part of a path.
    pub fn target_reference(
        &self,
        directory: &str,
        file: &UploadedFile,
    ) -> AppResult<StorageReference> {
        let extension =
            Validator::validate_image_extension(&file.original_name, &self.allowed_extensions)?;
        let digest = ContentHasher::fingerprint(&file.bytes);
        StorageReference::in_directory(directory, &format!("{}.{}", digest.to_hex(), extension))
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from(&UploadConfig::default())
    }
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self::new(config.allowed_extensions.clone())
    }
}

/// Transient add/remove plan for one owner's media set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub owner: MediaOwner,
    pub to_delete: Vec<MediaAsset>,
    pub to_add: Vec<PendingUpload>,
    /// Uploads dropped because their reference is already kept
    pub discarded: Vec<StorageReference>,
}

impl ReconciliationPlan {
    pub fn empty(owner: MediaOwner) -> Self {
        Self {
            owner,
            to_delete: Vec::new(),
            to_add: Vec::new(),
            discarded: Vec::new(),
        }
    }

    /// True when applying the plan would not change anything
    pub fn is_noop(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty()
    }
}

/// Compute the reconciliation plan for `owner`.
///
/// Every incoming file is validated before anything is planned, so a single
/// rejected upload fails the whole call with `InvalidArgument`.
pub fn plan_reconciliation(
    owner: MediaOwner,
    current: &MediaSet,
    keep: &HashSet<StorageReference>,
    incoming: Vec<UploadedFile>,
    policy: &UploadPolicy,
) -> AppResult<ReconciliationPlan> {
    if current.owner != owner {
        return Err(AppError::InvalidArgument(format!(
            "Media set belongs to {}, not {}",
            current.owner, owner
        )));
    }

    let directory = owner.media_directory();
    let targets = incoming
        .into_iter()
        .map(|file| {
            policy
                .target_reference(&directory, &file)
                .map(|reference| PendingUpload { reference, file })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let to_delete: Vec<MediaAsset> = current
        .iter()
        .filter(|asset| !keep.contains(&asset.storage_path))
        .cloned()
        .collect();

    let mut to_add = Vec::new();
    let mut discarded = Vec::new();
    let mut scheduled: HashSet<StorageReference> = HashSet::new();

    for pending in targets {
        // Same reference twice in one batch means the same bytes were sent twice
        if keep.contains(&pending.reference) || !scheduled.insert(pending.reference.clone()) {
            discarded.push(pending.reference);
        } else {
            to_add.push(pending);
        }
    }

    Ok(ReconciliationPlan {
        owner,
        to_delete,
        to_add,
        discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn asset(owner: MediaOwner, path: &str) -> MediaAsset {
        MediaAsset {
            id: Uuid::new_v4(),
            owner,
            storage_path: StorageReference::new(path).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn refs(paths: &[&str]) -> HashSet<StorageReference> {
        paths
            .iter()
            .map(|p| StorageReference::new(*p).unwrap())
            .collect()
    }

    #[test]
    fn test_unkept_assets_are_deleted_and_new_files_added() {
        let owner = MediaOwner::anime(Uuid::new_v4());
        let current = MediaSet::new(owner, vec![asset(owner, "a"), asset(owner, "b")]);
        let file_y = UploadedFile::new("y.png", b"y".to_vec());

        let plan = plan_reconciliation(
            owner,
            &current,
            &refs(&["a"]),
            vec![file_y.clone()],
            &UploadPolicy::default(),
        )
        .unwrap();

        assert_eq!(plan.to_delete.len(), 1);
        assert_eq!(plan.to_delete[0].storage_path.as_str(), "b");
        assert_eq!(plan.to_add.len(), 1);
        assert_eq!(plan.to_add[0].file, file_y);
        assert!(plan.to_add[0]
            .reference
            .as_str()
            .starts_with("anime/content/"));
        assert!(plan.to_add[0].reference.as_str().ends_with(".png"));
    }

    #[test]
    fn test_keeping_everything_without_uploads_is_a_noop() {
        let owner = MediaOwner::topic(Uuid::new_v4());
        let current = MediaSet::new(owner, vec![asset(owner, "topic/a.png")]);

        let plan = plan_reconciliation(
            owner,
            &current,
            &current.references(),
            Vec::new(),
            &UploadPolicy::default(),
        )
        .unwrap();

        assert!(plan.is_noop());
    }

    #[test]
    fn test_upload_already_kept_is_discarded() {
        let owner = MediaOwner::topic(Uuid::new_v4());
        let policy = UploadPolicy::default();
        let file = UploadedFile::new("retry.jpg", b"same bytes".to_vec());
        let existing_ref = policy.target_reference(&owner.media_directory(), &file).unwrap();
        let current = MediaSet::new(owner, vec![asset(owner, existing_ref.as_str())]);

        let plan = plan_reconciliation(
            owner,
            &current,
            &current.references(),
            vec![file],
            &policy,
        )
        .unwrap();

        assert!(plan.is_noop());
        assert_eq!(plan.discarded, vec![existing_ref]);
    }

    #[test]
    fn test_duplicate_uploads_in_one_batch_are_stored_once() {
        let owner = MediaOwner::anime(Uuid::new_v4());
        let plan = plan_reconciliation(
            owner,
            &MediaSet::empty(owner),
            &HashSet::new(),
            vec![
                UploadedFile::new("one.png", b"pixels".to_vec()),
                UploadedFile::new("two.PNG", b"pixels".to_vec()),
            ],
            &UploadPolicy::default(),
        )
        .unwrap();

        assert_eq!(plan.to_add.len(), 1);
        assert_eq!(plan.discarded.len(), 1);
    }

    #[test]
    fn test_rejected_extension_fails_whole_plan() {
        let owner = MediaOwner::anime(Uuid::new_v4());
        let current = MediaSet::new(owner, vec![asset(owner, "a")]);

        let err = plan_reconciliation(
            owner,
            &current,
            &HashSet::new(),
            vec![
                UploadedFile::new("fine.png", b"1".to_vec()),
                UploadedFile::new("script.php", b"2".to_vec()),
            ],
            &UploadPolicy::default(),
        )
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_media_set_of_another_owner_is_rejected() {
        let owner = MediaOwner::anime(Uuid::new_v4());
        let other = MediaOwner::anime(Uuid::new_v4());

        let result = plan_reconciliation(
            owner,
            &MediaSet::empty(other),
            &HashSet::new(),
            Vec::new(),
            &UploadPolicy::default(),
        );

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }
}
