use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::{
    Anime, AnimeUpdate, RatedAnime, Topic, TopicActivity, TopicUpdate,
};
use crate::modules::catalog::domain::value_objects::{AnimeType, Slug};
use crate::modules::media::{
    AppliedResult, CoverOutcome, MediaOwner, StorageReference, UploadedFile,
};
use crate::modules::ranking::{DisplayScore, EngagementRank, RankedEntity};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeUpdateResult {
    pub anime: Anime,
    /// `None` when no cover was uploaded
    pub cover: Option<CoverOutcome>,
    pub media: AppliedResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicUpdateResult {
    pub topic: Topic,
    pub media: AppliedResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionResult {
    pub owner: MediaOwner,
    pub media_retired: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetails {
    pub anime: Anime,
    pub review_count: usize,
    /// `None` for an anime nobody has rated yet
    pub average_rating: Option<DisplayScore>,
    pub topic_count: u64,
    pub favorite_count: usize,
}

/// Row of the admin anime table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeAdminRow {
    pub id: Uuid,
    pub title: String,
    pub average_rating: Option<DisplayScore>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact anime card with its plain average
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: Slug,
    pub anime_type: AnimeType,
    pub photo_cover: Option<StorageReference>,
    pub average_rating: Option<DisplayScore>,
}

impl AnimeSummary {
    pub fn new(anime: &Anime, average_rating: Option<f64>) -> Self {
        Self {
            id: anime.id,
            title: anime.title.clone(),
            slug: anime.slug.clone(),
            anime_type: anime.anime_type,
            photo_cover: anime.photo_cover.clone(),
            average_rating: average_rating.map(DisplayScore::from_raw),
        }
    }
}

/// Anime placed by weighted rating, with both scores rounded for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAnime {
    pub id: Uuid,
    pub title: String,
    pub anime_type: AnimeType,
    pub photo_cover: Option<StorageReference>,
    pub review_count: usize,
    pub average_rating: DisplayScore,
    pub weighted_rating: DisplayScore,
}

impl From<RankedEntity<'_, RatedAnime>> for RankedAnime {
    fn from(ranked: RankedEntity<'_, RatedAnime>) -> Self {
        let anime = &ranked.entity.anime;
        Self {
            id: anime.id,
            title: anime.title.clone(),
            anime_type: anime.anime_type,
            photo_cover: anime.photo_cover.clone(),
            review_count: ranked.rating_count,
            average_rating: ranked.display_average(),
            weighted_rating: ranked.display_score(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub id: Uuid,
    pub title: String,
    pub slug: Slug,
    pub like_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EngagementRank<'_, TopicActivity>> for TrendingTopic {
    fn from(rank: EngagementRank<'_, TopicActivity>) -> Self {
        let topic = &rank.entity.topic;
        Self {
            id: topic.id,
            title: topic.title.clone(),
            slug: topic.slug.clone(),
            like_count: rank.count,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicReactions {
    pub topic_id: Uuid,
    pub likes: usize,
    pub dislikes: usize,
}

/// Everything an anime edit can carry
#[derive(Debug, Clone, Default)]
pub struct AnimeUpdateRequest {
    pub fields: AnimeUpdate,
    pub genre_ids: Vec<i32>,
    pub cover: Option<UploadedFile>,
    /// Current photo references the client wants to keep
    pub keep: HashSet<StorageReference>,
    pub photos: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Default)]
pub struct TopicUpdateRequest {
    pub fields: TopicUpdate,
    pub keep: HashSet<StorageReference>,
    pub photos: Vec<UploadedFile>,
}
