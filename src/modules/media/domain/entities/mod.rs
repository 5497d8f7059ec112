pub mod media_asset;

pub use media_asset::{MediaAsset, MediaSet, NewMediaAsset};
