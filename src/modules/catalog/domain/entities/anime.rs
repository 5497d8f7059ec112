use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::genre::Genre;
use crate::modules::catalog::domain::value_objects::{AnimeType, Slug};
use crate::modules::media::StorageReference;
use crate::modules::ranking::{Ratable, RatingRecord};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: Uuid,
    pub title: String,
    pub slug: Slug,
    pub synopsis: String,
    pub release_date: String,
    pub episodes: i32,
    pub photo_cover: Option<StorageReference>,
    pub trailer_link: String,
    pub watch_link: String,
    pub anime_type: AnimeType,
    pub genres: Vec<Genre>,
    /// Bumped on every save, checked against the stored row
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of the scalar anime fields. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeUpdate {
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub release_date: Option<String>,
    pub episodes: Option<i32>,
    pub trailer_link: Option<String>,
    pub watch_link: Option<String>,
    pub anime_type: Option<AnimeType>,
}

impl Anime {
    pub fn new(title: String, anime_type: AnimeType) -> AppResult<Self> {
        Validator::validate_anime_title(&title)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            slug: Slug::from_title(&title),
            title,
            synopsis: String::new(),
            release_date: String::new(),
            episodes: 0,
            photo_cover: None,
            trailer_link: String::new(),
            watch_link: String::new(),
            anime_type,
            genres: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate and merge an update. The slug follows a changed title.
    pub fn apply_update(&mut self, update: AnimeUpdate) -> AppResult<()> {
        if let Some(title) = &update.title {
            Validator::validate_anime_title(title)?;
        }
        if let Some(episodes) = update.episodes {
            Validator::validate_episodes(episodes)?;
        }

        if let Some(title) = update.title {
            if title != self.title {
                self.slug = Slug::from_title(&title);
                self.title = title;
            }
        }
        if let Some(synopsis) = update.synopsis {
            self.synopsis = synopsis;
        }
        if let Some(release_date) = update.release_date {
            self.release_date = release_date;
        }
        if let Some(episodes) = update.episodes {
            self.episodes = episodes;
        }
        if let Some(trailer_link) = update.trailer_link {
            self.trailer_link = trailer_link;
        }
        if let Some(watch_link) = update.watch_link {
            self.watch_link = watch_link;
        }
        if let Some(anime_type) = update.anime_type {
            self.anime_type = anime_type;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn replace_genres(&mut self, genres: Vec<Genre>) {
        self.genres = genres;
        self.updated_at = Utc::now();
    }

    pub fn set_cover(&mut self, cover: StorageReference) {
        self.photo_cover = Some(cover);
        self.updated_at = Utc::now();
    }

    pub fn genre_ids(&self) -> Vec<i32> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

/// An anime together with the ratings of its live reviews
#[derive(Debug, Clone, PartialEq)]
pub struct RatedAnime {
    pub anime: Anime,
    pub ratings: Vec<RatingRecord>,
}

impl RatedAnime {
    pub fn new(anime: Anime, ratings: Vec<RatingRecord>) -> Self {
        Self { anime, ratings }
    }
}

impl Ratable for RatedAnime {
    fn id(&self) -> Uuid {
        self.anime.id
    }

    fn ratings(&self) -> &[RatingRecord] {
        &self.ratings
    }
}
