use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use uuid::Uuid;

use super::dto::{
    AnimeAdminRow, AnimeDetails, AnimeSummary, AnimeUpdateRequest, AnimeUpdateResult,
    DeletionResult, RankedAnime, TopicReactions, TopicUpdateRequest, TopicUpdateResult,
    TrendingTopic,
};
use super::owner_locks::OwnerLocks;
use crate::modules::catalog::domain::entities::{Anime, Genre, RatedAnime, TopicActivity};
use crate::modules::catalog::domain::repositories::{
    AnimeRepository, EngagementRepository, ReviewRepository, TopicRepository,
};
use crate::modules::media::{CoverReplacer, MediaOwner, MediaSetReconciler};
use crate::modules::ranking::{
    DisplayScore, EngagementKind, RankingEngine, RatingRecord, TimeWindow,
};
use crate::shared::application::{PaginatedResult, PaginationParams, SortOrder};
use crate::shared::config::RankingConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};

/// Persistence collaborators of the catalog
#[derive(Clone)]
pub struct CatalogRepositories {
    pub anime: Arc<dyn AnimeRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub engagements: Arc<dyn EngagementRepository>,
}

/// Entry point for catalog reads and media-bearing edits.
///
/// Edits of one anime or topic run under its owner lock from the first read
/// to the last media write. Reads load records through the repositories and
/// hand them to the [`RankingEngine`]; scores are rounded only when shaped
/// into DTOs.
pub struct CatalogQueryFacade {
    repos: CatalogRepositories,
    reconciler: Arc<MediaSetReconciler>,
    covers: Arc<CoverReplacer>,
    engine: RankingEngine,
    locks: OwnerLocks,
    ranking: RankingConfig,
    timezone: Tz,
}

impl CatalogQueryFacade {
    pub fn new(
        repos: CatalogRepositories,
        reconciler: Arc<MediaSetReconciler>,
        covers: Arc<CoverReplacer>,
        ranking: RankingConfig,
        timezone: Tz,
    ) -> Self {
        Self {
            repos,
            reconciler,
            covers,
            engine: RankingEngine::new(),
            locks: OwnerLocks::new(),
            ranking,
            timezone,
        }
    }

    pub async fn update_anime(
        &self,
        id: Uuid,
        request: AnimeUpdateRequest,
    ) -> AppResult<AnimeUpdateResult> {
        let owner = MediaOwner::anime(id);
        let _guard = self.locks.acquire(owner).await;

        let anime = self.require_anime(id).await?;
        let genres = self.resolve_genres(&request.genre_ids).await?;

        let mut updated = anime.clone();
        updated.apply_update(request.fields)?;
        updated.replace_genres(genres);

        // Planning validates every upload before anything is written
        let current = self.reconciler.current_set(owner).await?;
        let plan = self
            .reconciler
            .reconcile(owner, &current, &request.keep, request.photos)
            .await?;

        let staged = match request.cover {
            Some(file) => Some(
                self.covers
                    .stage(owner, anime.photo_cover.as_ref(), file)
                    .await?,
            ),
            None => None,
        };
        if let Some(cover) = staged.as_ref().and_then(|s| s.new_cover()) {
            updated.set_cover(cover.clone());
        }

        let saved = match self.repos.anime.save(&updated).await {
            Ok(saved) => saved,
            Err(err) => {
                if let Some(staged) = staged {
                    self.covers.abandon(staged).await;
                }
                return Err(err);
            }
        };

        let cover = match staged {
            Some(staged) => Some(self.covers.commit(staged).await),
            None => None,
        };
        let media = self.reconciler.apply(plan).await;

        log_info!(
            "Updated anime {} (version {}, {} photo failures)",
            saved.id,
            saved.version,
            media.failures.len()
        );

        Ok(AnimeUpdateResult {
            anime: saved,
            cover,
            media,
        })
    }

    pub async fn update_topic(
        &self,
        id: Uuid,
        request: TopicUpdateRequest,
    ) -> AppResult<TopicUpdateResult> {
        let owner = MediaOwner::topic(id);
        let _guard = self.locks.acquire(owner).await;

        let mut topic = self
            .repos
            .topics
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Topic with ID {} not found", id)))?;
        topic.apply_update(request.fields)?;

        let current = self.reconciler.current_set(owner).await?;
        let plan = self
            .reconciler
            .reconcile(owner, &current, &request.keep, request.photos)
            .await?;

        let saved = self.repos.topics.save(&topic).await?;
        let media = self.reconciler.apply(plan).await;

        log_info!(
            "Updated topic {} (slug {}, {} photo failures)",
            saved.id,
            saved.slug,
            media.failures.len()
        );

        Ok(TopicUpdateResult { topic: saved, media })
    }

    /// Soft-delete an anime, then the rows of its photos
    pub async fn delete_anime(&self, id: Uuid) -> AppResult<DeletionResult> {
        let owner = MediaOwner::anime(id);
        let result = {
            let _guard = self.locks.acquire(owner).await;
            self.require_anime(id).await?;
            self.repos.anime.soft_delete(id).await?;
            self.retire(owner).await?
        };
        self.locks.forget(owner);
        Ok(result)
    }

    /// Soft-delete a topic, then the rows of its photos
    pub async fn delete_topic(&self, id: Uuid) -> AppResult<DeletionResult> {
        let owner = MediaOwner::topic(id);
        let result = {
            let _guard = self.locks.acquire(owner).await;
            if self.repos.topics.find_by_id(id).await?.is_none() {
                return Err(AppError::NotFound(format!("Topic with ID {} not found", id)));
            }
            self.repos.topics.soft_delete(id).await?;
            self.retire(owner).await?
        };
        self.locks.forget(owner);
        Ok(result)
    }

    pub async fn anime_details(&self, id: Uuid) -> AppResult<AnimeDetails> {
        let anime = self.require_anime(id).await?;
        let ratings = self.repos.reviews.ratings_for_anime(id).await?;
        let topic_count = self.repos.topics.count_by_anime(id).await?;
        let engagements = self.repos.engagements.for_target(id).await?;

        Ok(AnimeDetails {
            anime,
            review_count: ratings.len(),
            average_rating: self.engine.simple_average(&ratings).map(DisplayScore::from_raw),
            topic_count,
            favorite_count: self
                .engine
                .count_by_kind(&engagements, EngagementKind::Favorite),
        })
    }

    pub async fn anime_admin_page(
        &self,
        pagination: PaginationParams,
        search: &str,
        order: SortOrder,
    ) -> AppResult<PaginatedResult<AnimeAdminRow>> {
        Validator::validate_pagination(pagination.page, pagination.page_size)?;

        let (anime, total) = self
            .repos
            .anime
            .search_page(search.trim(), order, pagination)
            .await?;
        let ratings = self.repos.reviews.ratings_by_anime().await?;

        let rows = anime
            .into_iter()
            .map(|a| AnimeAdminRow {
                average_rating: self.average_of(&ratings, a.id),
                id: a.id,
                title: a.title,
                created_at: a.created_at,
                updated_at: a.updated_at,
            })
            .collect();

        Ok(PaginatedResult::new(rows, total, &pagination))
    }

    pub async fn anime_by_genre(&self, genre_id: i32) -> AppResult<Vec<AnimeSummary>> {
        let anime = self.repos.anime.list_by_genre(genre_id).await?;
        if anime.is_empty() {
            return Err(AppError::NotFound(format!(
                "No anime found for genre {}",
                genre_id
            )));
        }

        let ratings = self.repos.reviews.ratings_by_anime().await?;
        Ok(anime
            .iter()
            .map(|a| {
                let average = ratings
                    .get(&a.id)
                    .and_then(|r| self.engine.simple_average(r));
                AnimeSummary::new(a, average)
            })
            .collect())
    }

    /// Anime with more than the configured number of ratings, best weighted
    /// rating first. The prior mean still covers the whole catalog.
    pub async fn recommended_anime(&self) -> AppResult<Vec<RankedAnime>> {
        let timer = TimedOperation::new("recommended_anime");
        let catalog = self.rated_catalog().await?;

        let ranked = match self.engine.catalog_mean(&catalog) {
            Some(prior_mean) => self.engine.rank_with_prior(
                &catalog,
                prior_mean,
                self.ranking.prior_weight,
                self.ranking.recommended_min_reviews.saturating_add(1),
                self.ranking.recommended_limit,
            )?,
            None => Vec::new(),
        };

        if ranked.is_empty() {
            return Err(AppError::NotFound("No recommended anime found".to_string()));
        }

        let result: Vec<RankedAnime> = ranked.into_iter().map(RankedAnime::from).collect();
        timer.finish_with_info(&format!("{} entries", result.len()));
        Ok(result)
    }

    /// Every rated anime ordered by weighted rating
    pub async fn most_popular_anime(&self) -> AppResult<Vec<RankedAnime>> {
        let timer = TimedOperation::new("most_popular_anime");
        let catalog = self.rated_catalog().await?;

        let ranked = self.engine.top_by_weighted_rating(
            &catalog,
            self.ranking.prior_weight,
            catalog.len(),
        )?;

        let result: Vec<RankedAnime> = ranked.into_iter().map(RankedAnime::from).collect();
        timer.finish_with_info(&format!("{} entries", result.len()));
        Ok(result)
    }

    /// Topics ranked by likes received in the half-year containing `now`
    pub async fn trending_topics(&self, now: DateTime<Utc>) -> AppResult<Vec<TrendingTopic>> {
        let window = TimeWindow::half_year_containing(now, self.timezone)?;
        log_debug!("Trending window {} .. {}", window.start, window.end);

        let topics = self.repos.topics.list_all().await?;
        let ids: Vec<Uuid> = topics.iter().map(|t| t.id).collect();
        let mut engagements = self.repos.engagements.for_targets(&ids).await?;

        let activity: Vec<TopicActivity> = topics
            .into_iter()
            .map(|topic| {
                let records = engagements.remove(&topic.id).unwrap_or_default();
                TopicActivity::new(topic, records)
            })
            .collect();

        Ok(self
            .engine
            .rank_by_engagement(
                &activity,
                EngagementKind::Like,
                window.start,
                window.end,
                self.ranking.trending_topic_limit,
            )
            .into_iter()
            .map(TrendingTopic::from)
            .collect())
    }

    pub async fn topic_reactions(&self, id: Uuid) -> AppResult<TopicReactions> {
        if self.repos.topics.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Topic with ID {} not found", id)));
        }

        let records = self.repos.engagements.for_target(id).await?;
        Ok(TopicReactions {
            topic_id: id,
            likes: self.engine.count_by_kind(&records, EngagementKind::Like),
            dislikes: self.engine.count_by_kind(&records, EngagementKind::Dislike),
        })
    }

    async fn require_anime(&self, id: Uuid) -> AppResult<Anime> {
        self.repos
            .anime
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Anime with ID {} not found", id)))
    }

    /// Every requested genre id must resolve
    async fn resolve_genres(&self, ids: &[i32]) -> AppResult<Vec<Genre>> {
        let unique: Vec<i32> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let genres = self.repos.anime.find_genres(&unique).await?;
        if genres.len() != unique.len() {
            return Err(AppError::NotFound("One or more genres not found".to_string()));
        }
        Ok(genres)
    }

    async fn retire(&self, owner: MediaOwner) -> AppResult<DeletionResult> {
        let media_retired = self.reconciler.retire_owner(owner).await?;
        LogContext::reconciliation_summary(&owner.to_string(), 0, media_retired, 0);
        log_info!("Deleted {} with {} photos", owner, media_retired);
        Ok(DeletionResult {
            owner,
            media_retired,
        })
    }

    async fn rated_catalog(&self) -> AppResult<Vec<RatedAnime>> {
        let anime = self.repos.anime.list_all().await?;
        let mut ratings = self.repos.reviews.ratings_by_anime().await?;

        Ok(anime
            .into_iter()
            .map(|a| {
                let records = ratings.remove(&a.id).unwrap_or_default();
                RatedAnime::new(a, records)
            })
            .collect())
    }

    fn average_of(
        &self,
        ratings: &HashMap<Uuid, Vec<RatingRecord>>,
        id: Uuid,
    ) -> Option<DisplayScore> {
        ratings
            .get(&id)
            .and_then(|r| self.engine.simple_average(r))
            .map(DisplayScore::from_raw)
    }
}
