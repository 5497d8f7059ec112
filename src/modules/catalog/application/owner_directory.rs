use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::catalog::domain::repositories::{AnimeRepository, TopicRepository};
use crate::modules::media::{MediaOwner, MediaOwnerDirectory, MediaOwnerKind};
use crate::shared::errors::AppResult;

/// Answers the media module's "is this owner still live" question from the
/// catalog repositories
pub struct CatalogOwnerDirectory {
    anime: Arc<dyn AnimeRepository>,
    topics: Arc<dyn TopicRepository>,
}

impl CatalogOwnerDirectory {
    pub fn new(anime: Arc<dyn AnimeRepository>, topics: Arc<dyn TopicRepository>) -> Self {
        Self { anime, topics }
    }
}

#[async_trait]
impl MediaOwnerDirectory for CatalogOwnerDirectory {
    async fn owner_exists(&self, owner: MediaOwner) -> AppResult<bool> {
        match owner.kind {
            MediaOwnerKind::Anime => Ok(self.anime.find_by_id(owner.id).await?.is_some()),
            MediaOwnerKind::Topic => Ok(self.topics.find_by_id(owner.id).await?.is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::repositories::{MockAnimeRepository, MockTopicRepository};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_dispatches_on_owner_kind() {
        let mut anime = MockAnimeRepository::new();
        anime.expect_find_by_id().returning(|_| Ok(None));
        let mut topics = MockTopicRepository::new();
        topics.expect_find_by_id().never();

        let directory = CatalogOwnerDirectory::new(Arc::new(anime), Arc::new(topics));

        assert!(!directory
            .owner_exists(MediaOwner::anime(Uuid::new_v4()))
            .await
            .unwrap());
    }
}
