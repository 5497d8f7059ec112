use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::{Anime, Genre, Topic};
use crate::modules::catalog::domain::value_objects::{AnimeType, Slug};
use crate::modules::media::StorageReference;
use crate::modules::ranking::{EngagementKind, EngagementRecord, RatingRecord};
use crate::schema::{anime, anime_genres, engagements, genres, reviews, topics};
use crate::shared::errors::AppResult;

// ================== ANIME MODELS ==================

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = anime)]
pub struct AnimeModel {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub synopsis: String,
    pub release_date: String,
    pub episodes: i32,
    pub photo_cover: Option<String>,
    pub trailer_link: String,
    pub watch_link: String,
    pub anime_type: AnimeType,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Scalar columns written on save; `version` is set by the repository
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = anime)]
pub struct AnimeChangeset {
    pub title: String,
    pub slug: String,
    pub synopsis: String,
    pub release_date: String,
    pub episodes: i32,
    pub photo_cover: Option<String>,
    pub trailer_link: String,
    pub watch_link: String,
    pub anime_type: AnimeType,
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}

impl AnimeModel {
    pub fn into_entity(self, genres: Vec<Genre>) -> AppResult<Anime> {
        let photo_cover = self.photo_cover.map(StorageReference::new).transpose()?;
        Ok(Anime {
            id: self.id,
            title: self.title,
            slug: Slug::from_stored(self.slug),
            synopsis: self.synopsis,
            release_date: self.release_date,
            episodes: self.episodes,
            photo_cover,
            trailer_link: self.trailer_link,
            watch_link: self.watch_link,
            anime_type: self.anime_type,
            genres,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl AnimeChangeset {
    pub fn next_version(entity: &Anime) -> Self {
        Self {
            title: entity.title.clone(),
            slug: entity.slug.as_str().to_string(),
            synopsis: entity.synopsis.clone(),
            release_date: entity.release_date.clone(),
            episodes: entity.episodes,
            photo_cover: entity.photo_cover.as_ref().map(|c| c.as_str().to_string()),
            trailer_link: entity.trailer_link.clone(),
            watch_link: entity.watch_link.clone(),
            anime_type: entity.anime_type,
            version: entity.version + 1,
            updated_at: entity.updated_at,
        }
    }
}

// ================== GENRE MODELS ==================

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = genres)]
pub struct GenreModel {
    pub id: i32,
    pub name: String,
}

impl From<GenreModel> for Genre {
    fn from(model: GenreModel) -> Self {
        Genre {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(AnimeModel, foreign_key = anime_id))]
#[diesel(belongs_to(GenreModel, foreign_key = genre_id))]
#[diesel(table_name = anime_genres)]
#[diesel(primary_key(anime_id, genre_id))]
pub struct AnimeGenre {
    pub anime_id: Uuid,
    pub genre_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = anime_genres)]
pub struct NewAnimeGenre {
    pub anime_id: Uuid,
    pub genre_id: i32,
}

// ================== TOPIC MODELS ==================

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = topics)]
pub struct TopicModel {
    pub id: Uuid,
    pub anime_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = topics)]
pub struct TopicChangeset {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<TopicModel> for Topic {
    fn from(model: TopicModel) -> Self {
        Topic {
            id: model.id,
            anime_id: model.anime_id,
            user_id: model.user_id,
            title: model.title,
            slug: Slug::from_stored(model.slug),
            body: model.body,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl TopicChangeset {
    pub fn next_version(entity: &Topic) -> Self {
        Self {
            title: entity.title.clone(),
            slug: entity.slug.as_str().to_string(),
            body: entity.body.clone(),
            version: entity.version + 1,
            updated_at: entity.updated_at,
        }
    }
}

// ================== REVIEW / ENGAGEMENT MODELS ==================

/// The slice of a review row the ranking needs
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = reviews)]
pub struct ReviewRatingModel {
    pub anime_id: Uuid,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

impl ReviewRatingModel {
    pub fn into_record(self) -> AppResult<RatingRecord> {
        RatingRecord::new(self.anime_id, f64::from(self.rating), self.created_at)
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = engagements)]
pub struct EngagementModel {
    pub kind: EngagementKind,
    pub target_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<EngagementModel> for EngagementRecord {
    fn from(model: EngagementModel) -> Self {
        EngagementRecord::new(model.kind, model.target_id, model.created_at)
    }
}
