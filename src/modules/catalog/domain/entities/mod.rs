pub mod anime;
pub mod genre;
pub mod topic;

pub use anime::{Anime, AnimeUpdate, RatedAnime};
pub use genre::Genre;
pub use topic::{Topic, TopicActivity, TopicUpdate};
