/// In-memory repository implementations for integration tests
use anicatalog_lib::modules::catalog::{
    Anime, AnimeRepository, EngagementRepository, Genre, ReviewRepository, Topic,
    TopicRepository,
};
use anicatalog_lib::modules::media::{
    MediaAsset, MediaAssetRepository, MediaOwner, MediaSet, NewMediaAsset,
};
use anicatalog_lib::modules::ranking::{EngagementRecord, RatingRecord};
use anicatalog_lib::shared::application::{PaginationParams, SortOrder};
use anicatalog_lib::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryAnimeRepository {
    rows: Mutex<HashMap<Uuid, Anime>>,
    deleted: Mutex<HashSet<Uuid>>,
    genres: Mutex<Vec<Genre>>,
    saves: Mutex<usize>,
}

impl InMemoryAnimeRepository {
    pub fn insert(&self, anime: Anime) -> Anime {
        self.rows.lock().unwrap().insert(anime.id, anime.clone());
        anime
    }

    pub fn add_genre(&self, genre: Genre) {
        self.genres.lock().unwrap().push(genre);
    }

    /// Stored row regardless of soft deletion
    pub fn stored(&self, id: Uuid) -> Option<Anime> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn is_deleted(&self, id: Uuid) -> bool {
        self.deleted.lock().unwrap().contains(&id)
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    fn live(&self) -> Vec<Anime> {
        let deleted = self.deleted.lock().unwrap();
        let mut live: Vec<Anime> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| !deleted.contains(&a.id))
            .cloned()
            .collect();
        live.sort_by_key(|a| a.id);
        live
    }
}

#[async_trait]
impl AnimeRepository for InMemoryAnimeRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Anime>> {
        if self.is_deleted(id) {
            return Ok(None);
        }
        Ok(self.stored(id))
    }

    async fn save(&self, anime: &Anime) -> AppResult<Anime> {
        if self.is_deleted(anime.id) {
            return Err(AppError::NotFound(format!("Anime with ID {} not found", anime.id)));
        }
        let mut rows = self.rows.lock().unwrap();
        let stored = rows
            .get(&anime.id)
            .ok_or_else(|| AppError::NotFound(format!("Anime with ID {} not found", anime.id)))?;
        if stored.version != anime.version {
            return Err(AppError::Conflict(format!(
                "Anime {} was modified concurrently",
                anime.id
            )));
        }

        let mut saved = anime.clone();
        saved.version += 1;
        saved.updated_at = Utc::now();
        rows.insert(saved.id, saved.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(saved)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        if self.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Anime with ID {} not found", id)));
        }
        self.deleted.lock().unwrap().insert(id);
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Anime>> {
        Ok(self.live())
    }

    async fn list_by_genre(&self, genre_id: i32) -> AppResult<Vec<Anime>> {
        let mut matching: Vec<Anime> = self
            .live()
            .into_iter()
            .filter(|a| a.genres.iter().any(|g| g.id == genre_id))
            .collect();
        matching.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(matching)
    }

    async fn search_page(
        &self,
        search: &str,
        order: SortOrder,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Anime>, u64)> {
        let needle = search.to_lowercase();
        let mut matching: Vec<Anime> = self
            .live()
            .into_iter()
            .filter(|a| a.title.to_lowercase().contains(&needle))
            .collect();
        matching.sort_by(|a, b| match order {
            SortOrder::Asc => a.title.cmp(&b.title).then(a.id.cmp(&b.id)),
            SortOrder::Desc => b.title.cmp(&a.title).then(a.id.cmp(&b.id)),
        });

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_genres(&self, ids: &[i32]) -> AppResult<Vec<Genre>> {
        let genres = self.genres.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| genres.iter().find(|g| g.id == *id).cloned())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryTopicRepository {
    rows: Mutex<HashMap<Uuid, Topic>>,
    deleted: Mutex<HashSet<Uuid>>,
}

impl InMemoryTopicRepository {
    pub fn insert(&self, topic: Topic) -> Topic {
        self.rows.lock().unwrap().insert(topic.id, topic.clone());
        topic
    }

    pub fn is_deleted(&self, id: Uuid) -> bool {
        self.deleted.lock().unwrap().contains(&id)
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Topic>> {
        if self.is_deleted(id) {
            return Ok(None);
        }
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, topic: &Topic) -> AppResult<Topic> {
        let mut rows = self.rows.lock().unwrap();
        let stored = rows
            .get(&topic.id)
            .ok_or_else(|| AppError::NotFound(format!("Topic with ID {} not found", topic.id)))?;
        if stored.version != topic.version {
            return Err(AppError::Conflict(format!(
                "Topic {} was modified concurrently",
                topic.id
            )));
        }

        let mut saved = topic.clone();
        saved.version += 1;
        saved.updated_at = Utc::now();
        rows.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        if self.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Topic with ID {} not found", id)));
        }
        self.deleted.lock().unwrap().insert(id);
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Topic>> {
        let deleted = self.deleted.lock().unwrap();
        let mut live: Vec<Topic> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|t| !deleted.contains(&t.id))
            .cloned()
            .collect();
        live.sort_by_key(|t| t.id);
        Ok(live)
    }

    async fn count_by_anime(&self, anime_id: Uuid) -> AppResult<u64> {
        Ok(self
            .list_all()
            .await?
            .iter()
            .filter(|t| t.anime_id == anime_id)
            .count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryReviewRepository {
    ratings: Mutex<HashMap<Uuid, Vec<RatingRecord>>>,
}

impl InMemoryReviewRepository {
    pub fn rate(&self, anime_id: Uuid, records: Vec<RatingRecord>) {
        self.ratings
            .lock()
            .unwrap()
            .entry(anime_id)
            .or_default()
            .extend(records);
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn ratings_for_anime(&self, anime_id: Uuid) -> AppResult<Vec<RatingRecord>> {
        Ok(self
            .ratings
            .lock()
            .unwrap()
            .get(&anime_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn ratings_by_anime(&self) -> AppResult<HashMap<Uuid, Vec<RatingRecord>>> {
        Ok(self.ratings.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct InMemoryEngagementRepository {
    records: Mutex<HashMap<Uuid, Vec<EngagementRecord>>>,
}

impl InMemoryEngagementRepository {
    pub fn record(&self, target_id: Uuid, records: Vec<EngagementRecord>) {
        self.records
            .lock()
            .unwrap()
            .entry(target_id)
            .or_default()
            .extend(records);
    }
}

#[async_trait]
impl EngagementRepository for InMemoryEngagementRepository {
    async fn for_target(&self, target_id: Uuid) -> AppResult<Vec<EngagementRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&target_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn for_targets(
        &self,
        target_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<EngagementRecord>>> {
        let records = self.records.lock().unwrap();
        Ok(target_ids
            .iter()
            .filter_map(|id| records.get(id).map(|r| (*id, r.clone())))
            .collect())
    }
}

struct AssetRow {
    asset: MediaAsset,
    deleted: bool,
}

#[derive(Default)]
pub struct InMemoryMediaAssetRepository {
    rows: Mutex<Vec<AssetRow>>,
}

impl InMemoryMediaAssetRepository {
    /// Rows of an owner, soft-deleted ones included
    pub fn all_rows(&self, owner: MediaOwner) -> Vec<(MediaAsset, bool)> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.asset.owner == owner)
            .map(|r| (r.asset.clone(), r.deleted))
            .collect()
    }
}

#[async_trait]
impl MediaAssetRepository for InMemoryMediaAssetRepository {
    async fn list_by_owner(&self, owner: MediaOwner) -> AppResult<MediaSet> {
        let assets = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.asset.owner == owner && !r.deleted)
            .map(|r| r.asset.clone())
            .collect();
        Ok(MediaSet::new(owner, assets))
    }

    async fn insert(&self, asset: NewMediaAsset) -> AppResult<MediaAsset> {
        let created = MediaAsset {
            id: Uuid::new_v4(),
            owner: asset.owner,
            storage_path: asset.storage_path,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(AssetRow {
            asset: created.clone(),
            deleted: false,
        });
        Ok(created)
    }

    async fn remove(&self, asset_id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.asset.id != asset_id);
        if rows.len() == before {
            return Err(AppError::NotFound(format!("Media asset {} not found", asset_id)));
        }
        Ok(())
    }

    async fn soft_delete_by_owner(&self, owner: MediaOwner) -> AppResult<usize> {
        let mut rows = self.rows.lock().unwrap();
        let mut count = 0;
        for row in rows.iter_mut().filter(|r| r.asset.owner == owner && !r.deleted) {
            row.deleted = true;
            count += 1;
        }
        Ok(count)
    }
}
