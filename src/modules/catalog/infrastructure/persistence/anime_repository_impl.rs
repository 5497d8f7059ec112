use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::{Anime, Genre};
use crate::modules::catalog::domain::repositories::AnimeRepository;
use crate::modules::catalog::infrastructure::models::{
    AnimeChangeset, AnimeGenre, AnimeModel, GenreModel, NewAnimeGenre,
};
use crate::schema::{anime, anime_genres, genres};
use crate::shared::application::{PaginationParams, SortOrder};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::DbConnection;
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;
use crate::log_debug;

pub struct AnimeRepositoryImpl {
    db: Arc<Database>,
}

impl AnimeRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Attach genres to a batch of anime rows with one joined query
    fn with_genres(conn: &mut DbConnection, models: Vec<AnimeModel>) -> AppResult<Vec<Anime>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(AnimeGenre, GenreModel)> = AnimeGenre::belonging_to(&models)
            .inner_join(genres::table)
            .select((AnimeGenre::as_select(), GenreModel::as_select()))
            .order(genres::name.asc())
            .load::<(AnimeGenre, GenreModel)>(conn)?;
        let grouped = rows.grouped_by(&models);

        models
            .into_iter()
            .zip(grouped)
            .map(|(model, pairs)| {
                let genres = pairs.into_iter().map(|(_, g)| Genre::from(g)).collect();
                model.into_entity(genres)
            })
            .collect()
    }

    /// `%` and `_` in user input match literally
    fn like_pattern(search: &str) -> String {
        let escaped = search
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }
}

#[async_trait]
impl AnimeRepository for AnimeRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Anime>> {
        let db = Arc::clone(&self.db);
        task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            let model = anime::table
                .find(id)
                .filter(anime::deleted_at.is_null())
                .select(AnimeModel::as_select())
                .first::<AnimeModel>(&mut conn)
                .optional()?;

            match model {
                Some(model) => Ok(Self::with_genres(&mut conn, vec![model])?.pop()),
                None => Ok(None),
            }
        })
    }

    async fn save(&self, entity: &Anime) -> AppResult<Anime> {
        let db = Arc::clone(&self.db);
        let id = entity.id;
        let expected_version = entity.version;
        let changeset = AnimeChangeset::next_version(entity);
        let links: Vec<NewAnimeGenre> = entity
            .genres
            .iter()
            .map(|g| NewAnimeGenre {
                anime_id: id,
                genre_id: g.id,
            })
            .collect();

        let saved = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            conn.transaction::<Vec<Anime>, AppError, _>(|conn| {
                let updated = diesel::update(
                    anime::table
                        .filter(anime::id.eq(id))
                        .filter(anime::version.eq(expected_version))
                        .filter(anime::deleted_at.is_null()),
                )
                .set(&changeset)
                .returning(AnimeModel::as_returning())
                .get_result::<AnimeModel>(conn)
                .optional()?;

                let model = match updated {
                    Some(model) => model,
                    None => {
                        let exists = anime::table
                            .find(id)
                            .filter(anime::deleted_at.is_null())
                            .select(anime::id)
                            .first::<Uuid>(conn)
                            .optional()?
                            .is_some();
                        return Err(if exists {
                            AppError::Conflict(format!(
                                "Anime {} was modified concurrently (expected version {})",
                                id, expected_version
                            ))
                        } else {
                            AppError::NotFound(format!("Anime with ID {} not found", id))
                        });
                    }
                };

                diesel::delete(anime_genres::table.filter(anime_genres::anime_id.eq(id)))
                    .execute(conn)?;
                if !links.is_empty() {
                    diesel::insert_into(anime_genres::table)
                        .values(&links)
                        .execute(conn)?;
                }

                Self::with_genres(conn, vec![model])
            })
        })?;

        LogContext::db_operation("update", "anime", None);
        saved
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InternalError(format!("Saved anime {} vanished", id)))
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let affected = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            diesel::update(
                anime::table
                    .filter(anime::id.eq(id))
                    .filter(anime::deleted_at.is_null()),
            )
            .set(anime::deleted_at.eq(Some(Utc::now())))
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to soft-delete anime: {}", e)))
        })?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Anime with ID {} not found", id)));
        }
        LogContext::db_operation("soft_delete", "anime", None);
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Anime>> {
        let db = Arc::clone(&self.db);
        task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            let models = anime::table
                .filter(anime::deleted_at.is_null())
                .order(anime::id.asc())
                .select(AnimeModel::as_select())
                .load::<AnimeModel>(&mut conn)?;

            Self::with_genres(&mut conn, models)
        })
    }

    async fn list_by_genre(&self, genre_id: i32) -> AppResult<Vec<Anime>> {
        let db = Arc::clone(&self.db);
        task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            let models = anime::table
                .inner_join(anime_genres::table)
                .filter(anime_genres::genre_id.eq(genre_id))
                .filter(anime::deleted_at.is_null())
                .order(anime::title.asc())
                .select(AnimeModel::as_select())
                .load::<AnimeModel>(&mut conn)?;

            Self::with_genres(&mut conn, models)
        })
    }

    async fn search_page(
        &self,
        search: &str,
        order: SortOrder,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Anime>, u64)> {
        let db = Arc::clone(&self.db);
        let pattern = Self::like_pattern(search);
        log_debug!("Admin anime search '{}' page {}", search, pagination.page);

        task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            let total = anime::table
                .filter(anime::deleted_at.is_null())
                .filter(anime::title.ilike(pattern.clone()))
                .count()
                .get_result::<i64>(&mut conn)?;

            let mut query = anime::table
                .filter(anime::deleted_at.is_null())
                .filter(anime::title.ilike(pattern))
                .select(AnimeModel::as_select())
                .into_boxed();
            query = match order {
                SortOrder::Asc => query.order((anime::title.asc(), anime::id.asc())),
                SortOrder::Desc => query.order((anime::title.desc(), anime::id.asc())),
            };

            let models = query
                .offset(pagination.offset())
                .limit(pagination.limit())
                .load::<AnimeModel>(&mut conn)?;

            let items = Self::with_genres(&mut conn, models)?;
            Ok((items, total.max(0) as u64))
        })
    }

    async fn find_genres(&self, ids: &[i32]) -> AppResult<Vec<Genre>> {
        let db = Arc::clone(&self.db);
        let ids = ids.to_vec();
        task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            let models = genres::table
                .filter(genres::id.eq_any(&ids))
                .order(genres::id.asc())
                .select(GenreModel::as_select())
                .load::<GenreModel>(&mut conn)?;

            let by_id: HashMap<i32, Genre> = models
                .into_iter()
                .map(|g| (g.id, Genre::from(g)))
                .collect();
            Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
        })
    }
}
