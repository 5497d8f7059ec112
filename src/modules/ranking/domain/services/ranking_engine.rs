use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::modules::ranking::domain::{
    records::{Engageable, EngagementKind, EngagementRecord, Ratable, RatingRecord},
    value_objects::DisplayScore,
};
use crate::shared::errors::{AppError, AppResult};

/// An entity paired with its unrounded weighted score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntity<'a, T> {
    pub entity: &'a T,
    pub rating_count: usize,
    pub average: f64,
    pub weighted_score: f64,
}

impl<T> RankedEntity<'_, T> {
    pub fn display_score(&self) -> DisplayScore {
        DisplayScore::from_raw(self.weighted_score)
    }

    pub fn display_average(&self) -> DisplayScore {
        DisplayScore::from_raw(self.average)
    }
}

/// An entity paired with how many engagements it received in a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementRank<'a, T> {
    pub entity: &'a T,
    pub count: usize,
}

/// Stateless scoring over already loaded rating and engagement records.
///
/// Nothing here rounds. Callers turn raw scores into [`DisplayScore`] at the
/// presentation step.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Arithmetic mean of the rating values, `None` when there are none
    pub fn simple_average(&self, records: &[RatingRecord]) -> Option<f64> {
        mean(records.iter().map(|r| r.value))
    }

    /// Bayesian shrinkage of the record mean toward `prior_mean`:
    /// `(n/(n+m))*R + (m/(n+m))*C`.
    ///
    /// With no records and no prior weight the result is the prior mean.
    pub fn weighted_rating(
        &self,
        records: &[RatingRecord],
        prior_mean: f64,
        prior_weight: f64,
    ) -> AppResult<f64> {
        ensure_prior(prior_mean, prior_weight)?;

        let n = records.len() as f64;
        let average = self.simple_average(records).unwrap_or(0.0);
        Ok(shrink(n, average, prior_mean, prior_weight))
    }

    /// Rated entities ordered by weighted rating, at most `k` of them.
    ///
    /// The prior mean is the average over every rating of every entity and
    /// has to be known before any entity is scored. Entities without ratings
    /// are left out. Equal scores are ordered by id ascending. Every call
    /// recomputes from scratch.
    pub fn top_by_weighted_rating<'a, T: Ratable>(
        &self,
        entities: &'a [T],
        prior_weight: f64,
        k: usize,
    ) -> AppResult<Vec<RankedEntity<'a, T>>> {
        let prior_mean = match self.catalog_mean(entities) {
            Some(mean) => mean,
            None => {
                ensure_prior(0.0, prior_weight)?;
                return Ok(Vec::new());
            }
        };

        self.rank_with_prior(entities, prior_mean, prior_weight, 1, k)
    }

    /// Same ordering as [`Self::top_by_weighted_rating`] with a caller
    /// supplied prior, restricted to entities holding at least `min_ratings`
    /// ratings (never fewer than one).
    pub fn rank_with_prior<'a, T: Ratable>(
        &self,
        entities: &'a [T],
        prior_mean: f64,
        prior_weight: f64,
        min_ratings: usize,
        k: usize,
    ) -> AppResult<Vec<RankedEntity<'a, T>>> {
        ensure_prior(prior_mean, prior_weight)?;
        let min_ratings = min_ratings.max(1);

        let mut ranked: Vec<RankedEntity<'a, T>> = entities
            .iter()
            .filter_map(|entity| {
                let ratings = entity.ratings();
                let average = self.simple_average(ratings)?;
                if ratings.len() < min_ratings {
                    return None;
                }
                let n = ratings.len() as f64;
                Some(RankedEntity {
                    entity,
                    rating_count: ratings.len(),
                    average,
                    weighted_score: shrink(n, average, prior_mean, prior_weight),
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.weighted_score
                .total_cmp(&a.weighted_score)
                .then_with(|| a.entity.id().cmp(&b.entity.id()))
        });
        ranked.truncate(k);

        Ok(ranked)
    }

    /// Mean over every rating of every entity, `None` for an unrated catalog
    pub fn catalog_mean<T: Ratable>(&self, entities: &[T]) -> Option<f64> {
        mean(
            entities
                .iter()
                .flat_map(|e| e.ratings().iter().map(|r| r.value)),
        )
    }

    /// Count of records created inside `[start, end]`, both ends inclusive.
    /// An inverted interval is empty.
    pub fn popularity_in_window(
        &self,
        records: &[EngagementRecord],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> usize {
        records
            .iter()
            .filter(|r| start <= r.created_at && r.created_at <= end)
            .count()
    }

    pub fn count_by_kind(&self, records: &[EngagementRecord], kind: EngagementKind) -> usize {
        records.iter().filter(|r| r.kind == kind).count()
    }

    /// Entities ordered by how many `kind` engagements they got inside
    /// `[start, end]`. Zero counts are left out, ties go by id ascending.
    pub fn rank_by_engagement<'a, T: Engageable>(
        &self,
        entities: &'a [T],
        kind: EngagementKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        k: usize,
    ) -> Vec<EngagementRank<'a, T>> {
        let mut ranked: Vec<EngagementRank<'a, T>> = entities
            .iter()
            .filter_map(|entity| {
                let matching: Vec<EngagementRecord> = entity
                    .engagements()
                    .iter()
                    .filter(|r| r.kind == kind)
                    .copied()
                    .collect();
                let count = self.popularity_in_window(&matching, start, end);
                (count > 0).then_some(EngagementRank { entity, count })
            })
            .collect();

        ranked.sort_by(|a, b| match b.count.cmp(&a.count) {
            Ordering::Equal => a.entity.id().cmp(&b.entity.id()),
            other => other,
        });
        ranked.truncate(k);

        ranked
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn shrink(n: f64, average: f64, prior_mean: f64, prior_weight: f64) -> f64 {
    let total = n + prior_weight;
    if total == 0.0 {
        return prior_mean;
    }
    (n / total) * average + (prior_weight / total) * prior_mean
}

fn ensure_prior(prior_mean: f64, prior_weight: f64) -> AppResult<()> {
    if !prior_weight.is_finite() || prior_weight < 0.0 {
        return Err(AppError::InvalidArgument(format!(
            "Prior weight must be a non-negative number, got {}",
            prior_weight
        )));
    }
    if !prior_mean.is_finite() || prior_mean < 0.0 {
        return Err(AppError::InvalidArgument(format!(
            "Prior mean must be a non-negative number, got {}",
            prior_mean
        )));
    }
    Ok(())
}
