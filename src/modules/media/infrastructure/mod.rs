pub mod persistence;
pub mod storage;

pub use persistence::MediaAssetRepositoryImpl;
pub use storage::LocalFileStorage;
