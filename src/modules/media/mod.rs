pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{
    AppliedResult, CoverOutcome, CoverReplacer, FailurePhase, FailureReason, MediaSetReconciler,
    ReconciliationFailure, StagedCover,
};
pub use domain::{
    ContentDigest, ContentHasher, MediaAsset, MediaAssetRepository, MediaOwner, MediaOwnerDirectory,
    MediaOwnerKind, MediaSet, MediaStorage, NewMediaAsset, ReconciliationPlan, StorageError,
    StorageReference, UploadPolicy, UploadedFile,
};
pub use infrastructure::{LocalFileStorage, MediaAssetRepositoryImpl};
