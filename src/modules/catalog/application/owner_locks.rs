use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::modules::media::MediaOwner;

/// One async mutex per media owner.
///
/// Held across reconcile + apply so two updates of the same anime or topic
/// never interleave their storage and row writes. Different owners proceed
/// in parallel.
#[derive(Debug, Default)]
pub struct OwnerLocks {
    locks: DashMap<MediaOwner, Arc<Mutex<()>>>,
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, owner: MediaOwner) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard guard is released before awaiting
        let lock = self
            .locks
            .entry(owner)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop the entry of an owner that no longer exists
    pub fn forget(&self, owner: MediaOwner) {
        self.locks.remove(&owner);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
