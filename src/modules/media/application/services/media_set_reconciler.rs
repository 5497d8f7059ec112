use std::collections::HashSet;
use std::sync::Arc;

use crate::modules::media::application::dto::{AppliedResult, FailurePhase};
use crate::modules::media::domain::entities::{MediaSet, NewMediaAsset};
use crate::modules::media::domain::repositories::{
    MediaAssetRepository, MediaOwnerDirectory, MediaStorage,
};
use crate::modules::media::domain::services::{
    plan_reconciliation, ReconciliationPlan, UploadPolicy, UploadedFile,
};
use crate::modules::media::domain::value_objects::{MediaOwner, StorageReference};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_error, log_warn};

/// Moves an owner's stored photos to the set the client asked for.
///
/// Callers must serialize `apply` per owner (see `OwnerLocks` in the catalog
/// module); two interleaved applies for one owner can leave storage and rows
/// out of step.
pub struct MediaSetReconciler {
    assets: Arc<dyn MediaAssetRepository>,
    owners: Arc<dyn MediaOwnerDirectory>,
    storage: Arc<dyn MediaStorage>,
    policy: UploadPolicy,
}

impl MediaSetReconciler {
    pub fn new(
        assets: Arc<dyn MediaAssetRepository>,
        owners: Arc<dyn MediaOwnerDirectory>,
        storage: Arc<dyn MediaStorage>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            assets,
            owners,
            storage,
            policy,
        }
    }

    /// Current media set of an owner
    pub async fn current_set(&self, owner: MediaOwner) -> AppResult<MediaSet> {
        self.assets.list_by_owner(owner).await
    }

    /// Compute the plan. Fails before any mutation on a missing owner or a
    /// rejected upload.
    pub async fn reconcile(
        &self,
        owner: MediaOwner,
        current: &MediaSet,
        keep: &HashSet<StorageReference>,
        incoming: Vec<UploadedFile>,
    ) -> AppResult<ReconciliationPlan> {
        if !self.owners.owner_exists(owner).await? {
            return Err(AppError::NotFound(format!("{} not found", owner)));
        }

        let plan = plan_reconciliation(owner, current, keep, incoming, &self.policy)?;
        log_debug!(
            "Media plan for {}: -{} +{} (discarded {})",
            owner,
            plan.to_delete.len(),
            plan.to_add.len(),
            plan.discarded.len()
        );
        Ok(plan)
    }

    /// Apply a plan: deletions first, then additions.
    ///
    /// Failures are collected per file; a failed deletion never blocks the
    /// additions and a failed addition never blocks its siblings.
    pub async fn apply(&self, plan: ReconciliationPlan) -> AppliedResult {
        let mut result = AppliedResult::default();
        if plan.is_noop() {
            return result;
        }

        let timer = TimedOperation::new(&format!("media apply {}", plan.owner));
        let owner = plan.owner;

        for asset in plan.to_delete {
            let file_removed = match self.storage.delete(&asset.storage_path).await {
                Ok(()) => true,
                Err(err) => {
                    LogContext::storage_operation(
                        "delete",
                        asset.storage_path.as_str(),
                        Err(&err.to_string()),
                    );
                    result.fail(asset.storage_path.clone(), FailurePhase::Delete, err);
                    false
                }
            };

            // The row goes even when the file could not be removed; an orphan
            // file is left for a cleanup sweep.
            match self.assets.remove(asset.id).await {
                Ok(()) if file_removed => result.deleted.push(asset.storage_path),
                Ok(()) => {}
                Err(err) => {
                    log_warn!("Failed to remove media row {}: {}", asset.id, err);
                    result.fail(asset.storage_path, FailurePhase::Delete, err);
                }
            }
        }

        for pending in plan.to_add {
            let stored = match self.storage.put(&pending.file.bytes, &pending.reference).await {
                Ok(stored) => stored,
                Err(err) => {
                    LogContext::storage_operation(
                        "put",
                        pending.reference.as_str(),
                        Err(&err.to_string()),
                    );
                    result.fail(pending.reference, FailurePhase::Add, err);
                    continue;
                }
            };

            match self
                .assets
                .insert(NewMediaAsset::new(owner, stored.clone()))
                .await
            {
                Ok(asset) => result.created.push(asset),
                Err(err) => {
                    log_warn!("Failed to record media row for {}: {}", stored, err);
                    if let Err(cleanup) = self.storage.delete(&stored).await {
                        log_error!("Could not roll back stored file {}: {}", stored, cleanup);
                    }
                    result.fail(stored, FailurePhase::Add, err);
                }
            }
        }

        LogContext::reconciliation_summary(
            &owner.to_string(),
            result.created.len(),
            result.deleted.len(),
            result.failures.len(),
        );
        timer.finish();
        result
    }

    /// Soft-delete the photos of an owner that is itself being deleted
    pub async fn retire_owner(&self, owner: MediaOwner) -> AppResult<usize> {
        let count = self.assets.soft_delete_by_owner(owner).await?;
        log_debug!("Soft-deleted {} media rows of {}", count, owner);
        Ok(count)
    }
}
