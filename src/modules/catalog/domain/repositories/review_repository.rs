use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::modules::ranking::RatingRecord;
use crate::shared::errors::AppResult;

/// Read side of reviews; only their ratings matter here
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn ratings_for_anime(&self, anime_id: Uuid) -> AppResult<Vec<RatingRecord>>;

    /// Ratings of every live review grouped by anime; unrated anime are absent
    async fn ratings_by_anime(&self) -> AppResult<HashMap<Uuid, Vec<RatingRecord>>>;
}
