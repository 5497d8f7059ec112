pub mod records;
pub mod services;
pub mod value_objects;

pub use records::{
    Engageable, EngagementKind, EngagementRecord, Ratable, RatingRecord, RATING_MAX, RATING_MIN,
};
pub use services::{EngagementRank, RankedEntity, RankingEngine};
pub use value_objects::{round_half_up, DisplayScore, TimeWindow, DISPLAY_DIGITS};
