use async_trait::async_trait;
use diesel::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::modules::catalog::domain::repositories::ReviewRepository;
use crate::modules::catalog::infrastructure::models::ReviewRatingModel;
use crate::modules::ranking::RatingRecord;
use crate::schema::{anime, reviews};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;

pub struct ReviewRepositoryImpl {
    db: Arc<Database>,
}

impl ReviewRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn ratings_for_anime(&self, anime_id: Uuid) -> AppResult<Vec<RatingRecord>> {
        let db = Arc::clone(&self.db);
        let models = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            reviews::table
                .filter(reviews::anime_id.eq(anime_id))
                .filter(reviews::deleted_at.is_null())
                .select(ReviewRatingModel::as_select())
                .load::<ReviewRatingModel>(&mut conn)
                .map_err(AppError::from)
        })?;

        models.into_iter().map(ReviewRatingModel::into_record).collect()
    }

    async fn ratings_by_anime(&self) -> AppResult<HashMap<Uuid, Vec<RatingRecord>>> {
        let timer = TimedOperation::new("load_catalog_ratings");
        let db = Arc::clone(&self.db);
        let models = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            reviews::table
                .inner_join(anime::table)
                .filter(reviews::deleted_at.is_null())
                .filter(anime::deleted_at.is_null())
                .select(ReviewRatingModel::as_select())
                .load::<ReviewRatingModel>(&mut conn)
                .map_err(AppError::from)
        })?;

        let mut grouped: HashMap<Uuid, Vec<RatingRecord>> = HashMap::new();
        for model in models {
            let record = model.into_record()?;
            grouped.entry(record.owner_id).or_default().push(record);
        }

        timer.finish_with_info(&format!("{} rated anime", grouped.len()));
        Ok(grouped)
    }
}
