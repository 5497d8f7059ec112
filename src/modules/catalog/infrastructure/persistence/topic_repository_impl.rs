use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::Topic;
use crate::modules::catalog::domain::repositories::TopicRepository;
use crate::modules::catalog::infrastructure::models::{TopicChangeset, TopicModel};
use crate::schema::topics;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;

pub struct TopicRepositoryImpl {
    db: Arc<Database>,
}

impl TopicRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TopicRepository for TopicRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Topic>> {
        let db = Arc::clone(&self.db);
        let model = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            topics::table
                .find(id)
                .filter(topics::deleted_at.is_null())
                .select(TopicModel::as_select())
                .first::<TopicModel>(&mut conn)
                .optional()
                .map_err(AppError::from)
        })?;

        Ok(model.map(Topic::from))
    }

    async fn save(&self, topic: &Topic) -> AppResult<Topic> {
        let db = Arc::clone(&self.db);
        let id = topic.id;
        let expected_version = topic.version;
        let changeset = TopicChangeset::next_version(topic);

        let model = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            conn.transaction::<TopicModel, AppError, _>(|conn| {
                let updated = diesel::update(
                    topics::table
                        .filter(topics::id.eq(id))
                        .filter(topics::version.eq(expected_version))
                        .filter(topics::deleted_at.is_null()),
                )
                .set(&changeset)
                .returning(TopicModel::as_returning())
                .get_result::<TopicModel>(conn)
                .optional()?;

                match updated {
                    Some(model) => Ok(model),
                    None => {
                        let exists = topics::table
                            .find(id)
                            .filter(topics::deleted_at.is_null())
                            .select(topics::id)
                            .first::<Uuid>(conn)
                            .optional()?
                            .is_some();
                        Err(if exists {
                            AppError::Conflict(format!(
                                "Topic {} was modified concurrently (expected version {})",
                                id, expected_version
                            ))
                        } else {
                            AppError::NotFound(format!("Topic with ID {} not found", id))
                        })
                    }
                }
            })
        })?;

        LogContext::db_operation("update", "topics", None);
        Ok(Topic::from(model))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let affected = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            diesel::update(
                topics::table
                    .filter(topics::id.eq(id))
                    .filter(topics::deleted_at.is_null()),
            )
            .set(topics::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to soft-delete topic: {}", e)))
        })?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Topic with ID {} not found", id)));
        }
        LogContext::db_operation("soft_delete", "topics", None);
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Topic>> {
        let db = Arc::clone(&self.db);
        let models = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            topics::table
                .filter(topics::deleted_at.is_null())
                .order(topics::id.asc())
                .select(TopicModel::as_select())
                .load::<TopicModel>(&mut conn)
                .map_err(AppError::from)
        })?;

        Ok(models.into_iter().map(Topic::from).collect())
    }

    async fn count_by_anime(&self, anime_id: Uuid) -> AppResult<u64> {
        let db = Arc::clone(&self.db);
        let count = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            topics::table
                .filter(topics::anime_id.eq(anime_id))
                .filter(topics::deleted_at.is_null())
                .count()
                .get_result::<i64>(&mut conn)
                .map_err(AppError::from)
        })?;

        Ok(count.max(0) as u64)
    }
}
