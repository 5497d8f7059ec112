use chrono::{DateTime, Utc};
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::shared::errors::{AppError, AppResult};

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;

/// One review score given to an anime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub owner_id: Uuid,
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

impl RatingRecord {
    pub fn new(owner_id: Uuid, value: f64, created_at: DateTime<Utc>) -> AppResult<Self> {
        if !value.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(AppError::InvalidArgument(format!(
                "Rating must be between {} and {}, got {}",
                RATING_MIN, RATING_MAX, value
            )));
        }
        Ok(Self {
            owner_id,
            value,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::EngagementKind"]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Like,
    Dislike,
    Favorite,
}

impl EngagementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Like => "like",
            EngagementKind::Dislike => "dislike",
            EngagementKind::Favorite => "favorite",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamped like, dislike or favorite pointing at a topic or an anime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRecord {
    pub kind: EngagementKind,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl EngagementRecord {
    pub fn new(kind: EngagementKind, owner_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            owner_id,
            created_at,
        }
    }
}

/// Something that owns rating records (an anime)
pub trait Ratable {
    fn id(&self) -> Uuid;
    fn ratings(&self) -> &[RatingRecord];
}

/// Something that receives engagement records (a topic, an anime)
pub trait Engageable {
    fn id(&self) -> Uuid;
    fn engagements(&self) -> &[EngagementRecord];
}
