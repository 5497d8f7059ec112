pub mod anime_type;
pub mod slug;

pub use anime_type::AnimeType;
pub use slug::Slug;
