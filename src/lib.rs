pub mod modules;
mod schema;
pub mod shared;

use modules::{
    catalog::{
        AnimeRepository, AnimeRepositoryImpl, CatalogOwnerDirectory, CatalogQueryFacade,
        CatalogRepositories, EngagementRepositoryImpl, ReviewRepositoryImpl, TopicRepository,
        TopicRepositoryImpl,
    },
    media::{
        CoverReplacer, LocalFileStorage, MediaAssetRepositoryImpl, MediaSetReconciler,
        MediaStorage, UploadPolicy,
    },
};
use shared::errors::AppResult;
use shared::utils::init_logger;
use shared::{AppConfig, Database};
use std::sync::Arc;

/// Fully wired catalog backend
pub struct CatalogApp {
    pub config: AppConfig,
    pub database: Arc<Database>,
    pub catalog: Arc<CatalogQueryFacade>,
}

/// Load configuration, start logging, connect to Postgres and wire every
/// repository and service behind the catalog facade
pub fn bootstrap() -> AppResult<CatalogApp> {
    let config = AppConfig::from_env()?;
    init_logger();

    let database = Arc::new(Database::connect(config.require_database_url()?)?);
    let storage: Arc<dyn MediaStorage> =
        Arc::new(LocalFileStorage::new(config.image_storage.clone()));

    let catalog = Arc::new(build_catalog(&config, Arc::clone(&database), storage));
    log::info!(
        "Catalog backend ready (images in {}, timezone {})",
        config.image_storage.display(),
        config.timezone
    );

    Ok(CatalogApp {
        config,
        database,
        catalog,
    })
}

/// Wire the diesel repositories and the given storage into a facade
pub fn build_catalog(
    config: &AppConfig,
    database: Arc<Database>,
    storage: Arc<dyn MediaStorage>,
) -> CatalogQueryFacade {
    // Concrete anime/topic repositories are shared with the owner directory
    let anime_repo: Arc<dyn AnimeRepository> =
        Arc::new(AnimeRepositoryImpl::new(Arc::clone(&database)));
    let topic_repo: Arc<dyn TopicRepository> =
        Arc::new(TopicRepositoryImpl::new(Arc::clone(&database)));

    let repos = CatalogRepositories {
        anime: Arc::clone(&anime_repo),
        topics: Arc::clone(&topic_repo),
        reviews: Arc::new(ReviewRepositoryImpl::new(Arc::clone(&database))),
        engagements: Arc::new(EngagementRepositoryImpl::new(Arc::clone(&database))),
    };

    let policy = UploadPolicy::from(&config.upload);
    let reconciler = Arc::new(MediaSetReconciler::new(
        Arc::new(MediaAssetRepositoryImpl::new(Arc::clone(&database))),
        Arc::new(CatalogOwnerDirectory::new(anime_repo, topic_repo)),
        Arc::clone(&storage),
        policy.clone(),
    ));
    let covers = Arc::new(CoverReplacer::new(storage, policy));

    CatalogQueryFacade::new(
        repos,
        reconciler,
        covers,
        config.ranking.clone(),
        config.timezone,
    )
}
