//! Background job registry
//!
//! Holds the pids of children launched with `&` that have not been reaped
//! yet. The registry is a cheap cloneable handle; every clone sees the same
//! set.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    pids: Arc<Mutex<BTreeSet<u32>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<u32>> {
        // The set stays consistent even if a holder panicked
        self.pids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Track a background pid. Returns false if it was already tracked.
    pub fn insert(&self, pid: u32) -> bool {
        self.lock().insert(pid)
    }

    /// Stop tracking a pid. Returns false if it was not tracked.
    pub fn remove(&self, pid: u32) -> bool {
        self.lock().remove(&pid)
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.lock().contains(&pid)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the current pids, in ascending order
    pub fn snapshot(&self) -> Vec<u32> {
        self.lock().iter().copied().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Hand every tracked pid to `signal`, then forget all of them.
    ///
    /// Iterates a snapshot with the lock released, so `signal` may touch the
    /// registry. Whatever is tracked once signalling is done gets cleared
    /// too. Returns how many pids were signalled.
    pub fn kill_all<F>(&self, mut signal: F) -> usize
    where
        F: FnMut(u32),
    {
        let pids = self.snapshot();
        for &pid in &pids {
            signal(pid);
        }
        self.clear();
        pids.len()
    }
}
