use async_trait::async_trait;
use diesel::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task;
use uuid::Uuid;

use crate::modules::catalog::domain::repositories::EngagementRepository;
use crate::modules::catalog::infrastructure::models::EngagementModel;
use crate::modules::ranking::EngagementRecord;
use crate::schema::engagements;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;

pub struct EngagementRepositoryImpl {
    db: Arc<Database>,
}

impl EngagementRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EngagementRepository for EngagementRepositoryImpl {
    async fn for_target(&self, target_id: Uuid) -> AppResult<Vec<EngagementRecord>> {
        let db = Arc::clone(&self.db);
        let models = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            engagements::table
                .filter(engagements::target_id.eq(target_id))
                .order(engagements::created_at.asc())
                .select(EngagementModel::as_select())
                .load::<EngagementModel>(&mut conn)
                .map_err(AppError::from)
        })?;

        Ok(models.into_iter().map(EngagementRecord::from).collect())
    }

    async fn for_targets(
        &self,
        target_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<EngagementRecord>>> {
        if target_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let db = Arc::clone(&self.db);
        let ids = target_ids.to_vec();
        let models = task::block_in_place(move || {
            let mut conn = db.get_connection()?;

            engagements::table
                .filter(engagements::target_id.eq_any(&ids))
                .select(EngagementModel::as_select())
                .load::<EngagementModel>(&mut conn)
                .map_err(AppError::from)
        })?;

        let mut grouped: HashMap<Uuid, Vec<EngagementRecord>> = HashMap::new();
        for record in models.into_iter().map(EngagementRecord::from) {
            grouped.entry(record.owner_id).or_default().push(record);
        }
        Ok(grouped)
    }
}
