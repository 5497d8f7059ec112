use serde::Serialize;

use crate::modules::media::domain::entities::MediaAsset;
use crate::modules::media::domain::repositories::StorageError;
use crate::modules::media::domain::value_objects::StorageReference;
use crate::shared::errors::AppError;

/// Which half of `apply` a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePhase {
    Delete,
    Add,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum FailureReason {
    /// The file was already gone from storage
    NotFound,
    PermissionDenied,
    Storage(String),
    Repository(String),
}

impl From<StorageError> for FailureReason {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => FailureReason::NotFound,
            StorageError::PermissionDenied(_) => FailureReason::PermissionDenied,
            StorageError::Io(message) => FailureReason::Storage(message),
        }
    }
}

impl From<AppError> for FailureReason {
    fn from(err: AppError) -> Self {
        FailureReason::Repository(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationFailure {
    pub reference: StorageReference,
    pub phase: FailurePhase,
    pub reason: FailureReason,
}

/// Outcome of applying a reconciliation plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedResult {
    pub created: Vec<MediaAsset>,
    pub deleted: Vec<StorageReference>,
    pub failures: Vec<ReconciliationFailure>,
}

impl AppliedResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.deleted.is_empty() && self.failures.is_empty()
    }

    pub(crate) fn fail(
        &mut self,
        reference: StorageReference,
        phase: FailurePhase,
        reason: impl Into<FailureReason>,
    ) {
        self.failures.push(ReconciliationFailure {
            reference,
            phase,
            reason: reason.into(),
        });
    }
}
