pub mod anime_repository;
pub mod engagement_repository;
pub mod review_repository;
pub mod topic_repository;

pub use anime_repository::AnimeRepository;
pub use engagement_repository::EngagementRepository;
pub use review_repository::ReviewRepository;
pub use topic_repository::TopicRepository;

#[cfg(test)]
pub use anime_repository::MockAnimeRepository;
#[cfg(test)]
pub use engagement_repository::MockEngagementRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
