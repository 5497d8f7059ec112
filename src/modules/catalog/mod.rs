pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::{
    AnimeAdminRow, AnimeDetails, AnimeSummary, AnimeUpdateRequest, AnimeUpdateResult,
    CatalogOwnerDirectory, CatalogQueryFacade, CatalogRepositories, DeletionResult, OwnerLocks,
    RankedAnime, TopicReactions, TopicUpdateRequest, TopicUpdateResult, TrendingTopic,
};
pub use domain::{
    Anime, AnimeRepository, AnimeType, AnimeUpdate, EngagementRepository, Genre, RatedAnime,
    ReviewRepository, Slug, Topic, TopicActivity, TopicRepository, TopicUpdate,
};
pub use infrastructure::{
    AnimeRepositoryImpl, EngagementRepositoryImpl, ReviewRepositoryImpl, TopicRepositoryImpl,
};
