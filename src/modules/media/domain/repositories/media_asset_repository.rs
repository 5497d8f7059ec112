use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::media::domain::entities::{MediaAsset, MediaSet, NewMediaAsset};
use crate::modules::media::domain::value_objects::MediaOwner;
use crate::shared::errors::AppResult;

/// Port for media asset rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaAssetRepository: Send + Sync {
    /// Active (non-deleted) assets of one owner
    async fn list_by_owner(&self, owner: MediaOwner) -> AppResult<MediaSet>;

    /// Insert a new asset row
    async fn insert(&self, asset: NewMediaAsset) -> AppResult<MediaAsset>;

    /// Hard-remove one asset row
    async fn remove(&self, asset_id: Uuid) -> AppResult<()>;

    /// Soft-delete every asset of an owner, returning how many rows changed
    async fn soft_delete_by_owner(&self, owner: MediaOwner) -> AppResult<usize>;
}

/// Port answering whether an owner entity (anime or topic) is still live
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaOwnerDirectory: Send + Sync {
    async fn owner_exists(&self, owner: MediaOwner) -> AppResult<bool>;
}
