//! In-process advisory locks keyed by record id

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per key, created on first use
///
/// Holders of the same key are serialized; different keys never contend.
/// A slot is removed when its last holder releases it and nobody is waiting,
/// so the map only holds keys that are currently locked or contended.
#[derive(Default)]
pub struct KeyedLocks {
    slots: DashMap<String, Arc<Mutex<()>>>,
}

/// Held lock for one key; releasing it may free the key's slot
pub struct KeyedGuard<'a> {
    locks: &'a KeyedLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard<'_> {
    fn drop(&mut self) {
        // Drops the guard's Arc clone before counting.
        self.guard.take();
        // The shard write lock also covers `entry` in `acquire`, so a count of
        // one means no holder or waiter can still reach this mutex.
        self.locks
            .slots
            .remove_if(&self.key, |_, slot| Arc::strong_count(slot) == 1);
    }
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the lock of `key` and hold it until the guard drops
    pub async fn acquire(&self, key: &str) -> KeyedGuard<'_> {
        // Clone the Arc out so the shard lock is released before awaiting.
        let slot = self
            .slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = slot.lock_owned().await;
        KeyedGuard {
            locks: self,
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or waited on
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
