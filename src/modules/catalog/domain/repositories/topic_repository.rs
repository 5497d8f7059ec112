use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::Topic;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Topic>>;

    /// Same optimistic version check as anime saves
    async fn save(&self, topic: &Topic) -> AppResult<Topic>;

    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;

    async fn list_all(&self) -> AppResult<Vec<Topic>>;

    async fn count_by_anime(&self, anime_id: Uuid) -> AppResult<u64>;
}
