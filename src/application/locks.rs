// src/application/locks.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// In-process mutual exclusion keyed by tag id.
///
/// Mutations of one tag run one at a time inside `with_tag_lock`, so a rename
/// cannot slip between the name lookup and the alert cleanup of an unlink.
/// Different tags never block each other. Entries are dropped as soon as
/// nobody holds or waits for them.
#[derive(Debug, Default)]
pub struct TagLockRegistry {
    locks: Mutex<HashMap<i32, Arc<Mutex<()>>>>,
}

impl TagLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag_lock<T>(&self, tag_id: i32, f: impl FnOnce() -> T) -> T {
        let entry = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(tag_id).or_default())
        };
        let held = HeldEntry {
            registry: self,
            tag_id,
            entry: Some(entry),
        };

        // the guarded value is (), a poisoned lock carries no broken state
        let _guard = held.lock();
        trace!("Acquired lock for tag {}", tag_id);
        f()
    }

    fn release(&self, tag_id: i32, entry: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(entry);
        if locks
            .get(&tag_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&tag_id);
        }
    }

    /// Number of tags that currently have a lock entry
    #[cfg(test)]
    pub(crate) fn active(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Returns the entry to the registry on drop, also when the closure panics
struct HeldEntry<'a> {
    registry: &'a TagLockRegistry,
    tag_id: i32,
    entry: Option<Arc<Mutex<()>>>,
}

impl HeldEntry<'_> {
    fn lock(&self) -> Option<MutexGuard<'_, ()>> {
        self.entry
            .as_ref()
            .map(|entry| entry.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Drop for HeldEntry<'_> {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.registry.release(self.tag_id, entry);
        }
    }
}
