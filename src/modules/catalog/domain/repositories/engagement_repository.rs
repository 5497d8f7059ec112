use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::modules::ranking::EngagementRecord;
use crate::shared::errors::AppResult;

/// Read side of likes, dislikes and favorites
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    async fn for_target(&self, target_id: Uuid) -> AppResult<Vec<EngagementRecord>>;

    /// Engagements of many targets at once, grouped by target id
    async fn for_targets(
        &self,
        target_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<EngagementRecord>>>;
}
