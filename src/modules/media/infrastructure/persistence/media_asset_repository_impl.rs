use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use super::models::{MediaAssetModel, NewMediaAssetModel};
use crate::modules::media::domain::entities::{MediaAsset, MediaSet, NewMediaAsset};
use crate::modules::media::domain::repositories::MediaAssetRepository;
use crate::modules::media::domain::value_objects::MediaOwner;
use crate::schema::media_assets;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;

pub struct MediaAssetRepositoryImpl {
    db: Arc<Database>,
}

impl MediaAssetRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MediaAssetRepository for MediaAssetRepositoryImpl {
    async fn list_by_owner(&self, owner: MediaOwner) -> AppResult<MediaSet> {
        let db = Arc::clone(&self.db);
        let models = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            media_assets::table
                .filter(media_assets::owner_kind.eq(owner.kind))
                .filter(media_assets::owner_id.eq(owner.id))
                .filter(media_assets::deleted_at.is_null())
                .order(media_assets::created_at.asc())
                .select(MediaAssetModel::as_select())
                .load::<MediaAssetModel>(&mut conn)
                .map_err(AppError::from)
        })?;

        let assets = models
            .into_iter()
            .map(MediaAssetModel::into_entity)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(MediaSet::new(owner, assets))
    }

    async fn insert(&self, asset: NewMediaAsset) -> AppResult<MediaAsset> {
        let db = Arc::clone(&self.db);
        let new_model = NewMediaAssetModel::from(asset);

        let model = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            diesel::insert_into(media_assets::table)
                .values(&new_model)
                .returning(MediaAssetModel::as_returning())
                .get_result::<MediaAssetModel>(&mut conn)
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to insert media asset: {}", e))
                })
        })?;

        LogContext::db_operation("insert", "media_assets", None);
        model.into_entity()
    }

    async fn remove(&self, asset_id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let removed = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            diesel::delete(media_assets::table.find(asset_id))
                .execute(&mut conn)
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to remove media asset: {}", e))
                })
        })?;

        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "Media asset {} not found",
                asset_id
            )));
        }
        Ok(())
    }

    async fn soft_delete_by_owner(&self, owner: MediaOwner) -> AppResult<usize> {
        let db = Arc::clone(&self.db);
        task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            diesel::update(
                media_assets::table
                    .filter(media_assets::owner_kind.eq(owner.kind))
                    .filter(media_assets::owner_id.eq(owner.id))
                    .filter(media_assets::deleted_at.is_null()),
            )
            .set(media_assets::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to soft-delete media: {}", e)))
        })
    }
}
