pub mod domain;

// Re-export commonly used types
pub use domain::{
    DisplayScore, Engageable, EngagementKind, EngagementRank, EngagementRecord, Ratable,
    RankedEntity, RankingEngine, RatingRecord, TimeWindow,
};
