mod content_digest;
mod media_owner;
mod storage_reference;

pub use content_digest::ContentDigest;
pub use media_owner::{MediaOwner, MediaOwnerKind, COVER_DIRECTORY};
pub use storage_reference::StorageReference;
