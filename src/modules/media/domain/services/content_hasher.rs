use sha2::{Digest, Sha256};

use crate::modules::media::domain::value_objects::ContentDigest;

/// Fingerprints file contents to spot byte-identical uploads
pub struct ContentHasher;

impl ContentHasher {
    pub fn fingerprint(bytes: &[u8]) -> ContentDigest {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        ContentDigest::from_bytes(hasher.finalize().into())
    }

    /// Compare an upload against the currently stored file.
    ///
    /// A missing current file never matches, so the upload replaces it.
    pub fn is_duplicate(incoming: &[u8], current: Option<&[u8]>) -> bool {
        match current {
            Some(current) => Self::fingerprint(incoming) == Self::fingerprint(current),
            None => false,
        }
    }
}
