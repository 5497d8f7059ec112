pub mod catalog_query_facade;
pub mod dto;
pub mod owner_directory;
pub mod owner_locks;

pub use catalog_query_facade::{CatalogQueryFacade, CatalogRepositories};
pub use dto::*;
pub use owner_directory::CatalogOwnerDirectory;
pub use owner_locks::OwnerLocks;
