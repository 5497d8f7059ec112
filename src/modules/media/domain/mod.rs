pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{MediaAsset, MediaSet, NewMediaAsset};
pub use repositories::{MediaAssetRepository, MediaOwnerDirectory, MediaStorage, StorageError};
pub use services::{
    plan_reconciliation, ContentHasher, PendingUpload, ReconciliationPlan, UploadPolicy,
    UploadedFile,
};
pub use value_objects::{
    ContentDigest, MediaOwner, MediaOwnerKind, StorageReference, COVER_DIRECTORY,
};
