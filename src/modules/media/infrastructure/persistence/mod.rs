pub mod media_asset_repository_impl;
pub mod models;

pub use media_asset_repository_impl::MediaAssetRepositoryImpl;
