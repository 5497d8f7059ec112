pub mod content_hasher;
pub mod reconciliation;

pub use content_hasher::ContentHasher;
pub use reconciliation::{
    plan_reconciliation, PendingUpload, ReconciliationPlan, UploadPolicy, UploadedFile,
};
