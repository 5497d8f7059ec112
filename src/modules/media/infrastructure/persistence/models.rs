use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::media::domain::entities::{MediaAsset, NewMediaAsset};
use crate::modules::media::domain::value_objects::{MediaOwner, MediaOwnerKind, StorageReference};
use crate::schema::media_assets;
use crate::shared::errors::AppResult;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = media_assets)]
pub struct MediaAssetModel {
    pub id: Uuid,
    pub owner_kind: MediaOwnerKind,
    pub owner_id: Uuid,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = media_assets)]
pub struct NewMediaAssetModel {
    pub id: Uuid,
    pub owner_kind: MediaOwnerKind,
    pub owner_id: Uuid,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
}

impl MediaAssetModel {
    pub fn into_entity(self) -> AppResult<MediaAsset> {
        Ok(MediaAsset {
            id: self.id,
            owner: MediaOwner {
                kind: self.owner_kind,
                id: self.owner_id,
            },
            storage_path: StorageReference::new(self.storage_path)?,
            created_at: self.created_at,
        })
    }
}

impl From<NewMediaAsset> for NewMediaAssetModel {
    fn from(asset: NewMediaAsset) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_kind: asset.owner.kind,
            owner_id: asset.owner.id,
            storage_path: asset.storage_path.into(),
            created_at: Utc::now(),
        }
    }
}
