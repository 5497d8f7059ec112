use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::catalog::domain::value_objects::Slug;
use crate::modules::ranking::{Engageable, EngagementRecord};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub anime_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub slug: Slug,
    pub body: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Topic {
    pub fn new(anime_id: Uuid, user_id: Uuid, title: String, body: String) -> AppResult<Self> {
        Validator::validate_topic_title(&title)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            anime_id,
            user_id,
            title,
            slug: Slug::for_topic(),
            body,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge an update; a changed title gets a fresh random slug
    pub fn apply_update(&mut self, update: TopicUpdate) -> AppResult<()> {
        if let Some(title) = update.title {
            Validator::validate_topic_title(&title)?;
            if title != self.title {
                self.slug = Slug::for_topic();
                self.title = title;
            }
        }
        if let Some(body) = update.body {
            self.body = body;
        }

        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A topic together with the engagements pointing at it
#[derive(Debug, Clone, PartialEq)]
pub struct TopicActivity {
    pub topic: Topic,
    pub engagements: Vec<EngagementRecord>,
}

impl TopicActivity {
    pub fn new(topic: Topic, engagements: Vec<EngagementRecord>) -> Self {
        Self { topic, engagements }
    }
}

impl Engageable for TopicActivity {
    fn id(&self) -> Uuid {
        self.topic.id
    }

    fn engagements(&self) -> &[EngagementRecord] {
        &self.engagements
    }
}
