//! Shared integration test fixtures
//!
//! In-memory stand-ins for the diesel repositories plus a tempdir-backed
//! `LocalFileStorage`, so the application services run end to end without a
//! database.
#![allow(dead_code)]

pub mod factories;
pub mod memory;

use anicatalog_lib::modules::catalog::{
    AnimeRepository, CatalogOwnerDirectory, CatalogQueryFacade, CatalogRepositories,
    TopicRepository,
};
use anicatalog_lib::modules::media::{
    CoverReplacer, LocalFileStorage, MediaSetReconciler, MediaStorage, StorageReference,
    UploadPolicy,
};
use anicatalog_lib::shared::config::RankingConfig;
use chrono_tz::Tz;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use memory::{
    InMemoryAnimeRepository, InMemoryEngagementRepository, InMemoryMediaAssetRepository,
    InMemoryReviewRepository, InMemoryTopicRepository,
};

/// A fully wired catalog over in-memory repositories and a temporary image
/// directory
pub struct TestCatalog {
    pub facade: CatalogQueryFacade,
    pub anime: Arc<InMemoryAnimeRepository>,
    pub topics: Arc<InMemoryTopicRepository>,
    pub reviews: Arc<InMemoryReviewRepository>,
    pub engagements: Arc<InMemoryEngagementRepository>,
    pub assets: Arc<InMemoryMediaAssetRepository>,
    pub storage: Arc<LocalFileStorage>,
    // Dropped last so the files outlive every service
    _dir: TempDir,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self::with_config(RankingConfig::default(), Tz::UTC)
    }

    pub fn with_config(ranking: RankingConfig, timezone: Tz) -> Self {
        let dir = tempfile::tempdir().expect("create temp image dir");
        let storage = Arc::new(LocalFileStorage::new(dir.path()));

        let anime = Arc::new(InMemoryAnimeRepository::default());
        let topics = Arc::new(InMemoryTopicRepository::default());
        let reviews = Arc::new(InMemoryReviewRepository::default());
        let engagements = Arc::new(InMemoryEngagementRepository::default());
        let assets = Arc::new(InMemoryMediaAssetRepository::default());

        let anime_port: Arc<dyn AnimeRepository> = anime.clone();
        let topic_port: Arc<dyn TopicRepository> = topics.clone();
        let storage_port: Arc<dyn MediaStorage> = storage.clone();

        let reconciler = MediaSetReconciler::new(
            assets.clone(),
            Arc::new(CatalogOwnerDirectory::new(
                anime_port.clone(),
                topic_port.clone(),
            )),
            storage_port.clone(),
            UploadPolicy::default(),
        );
        let covers = CoverReplacer::new(storage_port, UploadPolicy::default());

        let facade = CatalogQueryFacade::new(
            CatalogRepositories {
                anime: anime_port,
                topics: topic_port,
                reviews: reviews.clone(),
                engagements: engagements.clone(),
            },
            Arc::new(reconciler),
            Arc::new(covers),
            ranking,
            timezone,
        );

        Self {
            facade,
            anime,
            topics,
            reviews,
            engagements,
            assets,
            storage,
            _dir: dir,
        }
    }

    /// Absolute path a storage reference resolves to
    pub fn path_of(&self, reference: &StorageReference) -> PathBuf {
        reference
            .as_str()
            .split('/')
            .fold(self.storage.root().to_path_buf(), |path, segment| {
                path.join(segment)
            })
    }

    pub fn file_exists(&self, reference: &StorageReference) -> bool {
        self.path_of(reference).is_file()
    }
}
