mod ranking_engine;

pub use ranking_engine::{EngagementRank, RankedEntity, RankingEngine};
