use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::{Anime, Genre};
use crate::shared::application::{PaginationParams, SortOrder};
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnimeRepository: Send + Sync {
    /// Live (not soft-deleted) anime with its genres
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Anime>>;

    /// Persist scalar fields and genre links.
    ///
    /// `anime.version` must match the stored row, otherwise `Conflict`. The
    /// returned anime carries the bumped version.
    async fn save(&self, anime: &Anime) -> AppResult<Anime>;

    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;

    /// Every live anime, ordered by id
    async fn list_all(&self) -> AppResult<Vec<Anime>>;

    async fn list_by_genre(&self, genre_id: i32) -> AppResult<Vec<Anime>>;

    /// Page of anime whose title contains `search`, case-insensitive,
    /// ordered by title. Returns the page and the total match count.
    async fn search_page(
        &self,
        search: &str,
        order: SortOrder,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Anime>, u64)>;

    /// Genres matching the given ids; unknown ids are simply absent
    async fn find_genres(&self, ids: &[i32]) -> AppResult<Vec<Genre>>;
}
