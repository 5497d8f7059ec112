pub mod models;
pub mod persistence;

pub use persistence::{
    AnimeRepositoryImpl, EngagementRepositoryImpl, ReviewRepositoryImpl, TopicRepositoryImpl,
};
