use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::modules::media::domain::value_objects::{MediaOwner, StorageReference};

/// A stored photo attached to an anime or a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    pub id: Uuid,
    pub owner: MediaOwner,
    pub storage_path: StorageReference,
    pub created_at: DateTime<Utc>,
}

/// Media asset row to be inserted by the reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMediaAsset {
    pub owner: MediaOwner,
    pub storage_path: StorageReference,
}

impl NewMediaAsset {
    pub fn new(owner: MediaOwner, storage_path: StorageReference) -> Self {
        Self {
            owner,
            storage_path,
        }
    }
}

/// The active (non-deleted) photos of one owner at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSet {
    pub owner: MediaOwner,
    pub assets: Vec<MediaAsset>,
}

impl MediaSet {
    pub fn new(owner: MediaOwner, assets: Vec<MediaAsset>) -> Self {
        Self { owner, assets }
    }

    pub fn empty(owner: MediaOwner) -> Self {
        Self::new(owner, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn references(&self) -> HashSet<StorageReference> {
        self.assets.iter().map(|a| a.storage_path.clone()).collect()
    }

    pub fn contains(&self, reference: &StorageReference) -> bool {
        self.assets.iter().any(|a| &a.storage_path == reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaAsset> {
        self.assets.iter()
    }
}
