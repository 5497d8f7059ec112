pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{Anime, AnimeUpdate, Genre, RatedAnime, Topic, TopicActivity, TopicUpdate};
pub use repositories::{AnimeRepository, EngagementRepository, ReviewRepository, TopicRepository};
pub use value_objects::{AnimeType, Slug};
