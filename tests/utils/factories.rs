/// Test data factories with sensible defaults
use anicatalog_lib::modules::catalog::{Anime, AnimeType, Topic};
use anicatalog_lib::modules::media::UploadedFile;
use anicatalog_lib::modules::ranking::{EngagementKind, EngagementRecord, RatingRecord};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

pub fn anime(title: &str) -> Anime {
    Anime::new(title.to_string(), AnimeType::Series).expect("valid anime title")
}

/// Anime with a fixed id, for assertions on tie-breaking order
pub fn anime_with_id(id: u128, title: &str) -> Anime {
    let mut anime = anime(title);
    anime.id = Uuid::from_u128(id);
    anime
}

pub fn topic(anime_id: Uuid, title: &str) -> Topic {
    Topic::new(
        anime_id,
        Uuid::new_v4(),
        title.to_string(),
        "Discussion body".to_string(),
    )
    .expect("valid topic")
}

pub fn ratings(values: &[f64]) -> Vec<RatingRecord> {
    values
        .iter()
        .map(|v| RatingRecord::new(Uuid::new_v4(), *v, Utc::now()).expect("rating in range"))
        .collect()
}

pub fn engagements(kind: EngagementKind, at: &[DateTime<Utc>]) -> Vec<EngagementRecord> {
    at.iter()
        .map(|t| EngagementRecord::new(kind, Uuid::new_v4(), *t))
        .collect()
}

pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid date")
}

pub fn png(name: &str, bytes: &[u8]) -> UploadedFile {
    UploadedFile::new(name, bytes.to_vec())
}
