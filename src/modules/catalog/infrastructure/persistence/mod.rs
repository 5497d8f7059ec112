pub mod anime_repository_impl;
pub mod engagement_repository_impl;
pub mod review_repository_impl;
pub mod topic_repository_impl;

pub use anime_repository_impl::AnimeRepositoryImpl;
pub use engagement_repository_impl::EngagementRepositoryImpl;
pub use review_repository_impl::ReviewRepositoryImpl;
pub use topic_repository_impl::TopicRepositoryImpl;
