/// Environment driven configuration
///
/// Values are read from the process environment after `.env` has been loaded
/// with dotenvy. Every knob has a default except `DATABASE_URL`, which is only
/// required once a diesel backed [`Database`](crate::shared::Database) is built.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_IMAGE_STORAGE: &str = "./images";
pub const DEFAULT_IMAGE_EXTENSIONS: &str = "jpg,jpeg,png";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub image_storage: PathBuf,
    pub upload: UploadConfig,
    pub ranking: RankingConfig,
    pub timezone: Tz,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadConfig {
    pub allowed_extensions: Vec<String>,
}

/// Knobs for the read-heavy ranking endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Confidence threshold `m` of the weighted rating
    pub prior_weight: f64,
    /// Recommended anime need strictly more ratings than this
    pub recommended_min_reviews: usize,
    pub recommended_limit: usize,
    pub trending_topic_limit: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: parse_list(DEFAULT_IMAGE_EXTENSIONS),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            prior_weight: 1.0,
            recommended_min_reviews: 3,
            recommended_limit: 8,
            trending_topic_limit: 15,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            image_storage: PathBuf::from(DEFAULT_IMAGE_STORAGE),
            upload: UploadConfig::default(),
            ranking: RankingConfig::default(),
            timezone: Tz::UTC,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and read the configuration from the environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RankingConfig::default();

        let allowed_extensions = parse_list(
            &lookup("ALLOWED_IMAGE_EXTENSIONS").unwrap_or_else(|| DEFAULT_IMAGE_EXTENSIONS.into()),
        );
        if allowed_extensions.is_empty() {
            return Err(AppError::InvalidArgument(
                "ALLOWED_IMAGE_EXTENSIONS must name at least one extension".to_string(),
            ));
        }

        let prior_weight: f64 = parse_var(&lookup, "RANKING_PRIOR_WEIGHT", defaults.prior_weight)?;
        if !prior_weight.is_finite() || prior_weight < 0.0 {
            return Err(AppError::InvalidArgument(
                "RANKING_PRIOR_WEIGHT must be a non-negative number".to_string(),
            ));
        }

        let timezone = match lookup("CATALOG_TIMEZONE") {
            Some(name) => Tz::from_str(name.trim()).map_err(|e| {
                AppError::InvalidArgument(format!("CATALOG_TIMEZONE '{}': {}", name, e))
            })?,
            None => Tz::UTC,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL"),
            image_storage: lookup("IMAGE_STORAGE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_STORAGE)),
            upload: UploadConfig { allowed_extensions },
            ranking: RankingConfig {
                prior_weight,
                recommended_min_reviews: parse_var(
                    &lookup,
                    "RECOMMENDED_MIN_REVIEWS",
                    defaults.recommended_min_reviews,
                )?,
                recommended_limit: parse_var(
                    &lookup,
                    "RECOMMENDED_LIMIT",
                    defaults.recommended_limit,
                )?,
                trending_topic_limit: parse_var(
                    &lookup,
                    "TRENDING_TOPIC_LIMIT",
                    defaults.trending_topic_limit,
                )?,
            },
            timezone,
        })
    }

    pub fn require_database_url(&self) -> AppResult<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            AppError::DatabaseError("DATABASE_URL environment variable not found".to_string())
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::InvalidArgument(format!("{} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
