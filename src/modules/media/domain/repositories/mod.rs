pub mod media_asset_repository;
pub mod media_storage;

pub use media_asset_repository::{MediaAssetRepository, MediaOwnerDirectory};
pub use media_storage::{MediaStorage, StorageError};

#[cfg(test)]
pub use media_asset_repository::{MockMediaAssetRepository, MockMediaOwnerDirectory};
#[cfg(test)]
pub use media_storage::MockMediaStorage;
