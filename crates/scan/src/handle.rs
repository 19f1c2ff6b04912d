//! crates/scan/src/handle.rs
//!
//! Concurrent table of open directory handles.
//!
//! The table maps each [`DirectoryHandle`] to an `Arc<Mutex<_>>` slot. The
//! map is only consulted long enough to clone the slot, so a query blocked on
//! source I/O holds its own handle's mutex and nothing else.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;

use crate::{ScanState, SourceDirectory};

/// Opaque identity of an open directory.
///
/// Identifiers are allocated from a counter and never reused by the engine
/// that issued them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DirectoryHandle(u64);

impl DirectoryHandle {
    /// Rebuilds a handle from its numeric value.
    ///
    /// A handle made this way is only meaningful to the engine that issued the
    /// value; any other value is reported as invalid.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the numeric value of this handle.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DirectoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directory and scan state guarded by one handle's mutex.
#[derive(Debug)]
pub(crate) struct HandleSlot {
    pub(crate) directory: SourceDirectory,
    pub(crate) state: ScanState,
}

pub(crate) type SharedSlot = Arc<Mutex<HandleSlot>>;

#[derive(Debug)]
pub(crate) struct HandleTable {
    slots: DashMap<DirectoryHandle, SharedSlot>,
    next_id: AtomicU64,
}

impl HandleTable {
    pub(crate) fn new() -> Self {
        Self {
            slots: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn insert(&self, directory: SourceDirectory) -> DirectoryHandle {
        let handle = DirectoryHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        let slot = HandleSlot {
            directory,
            state: ScanState::new(),
        };
        self.slots.insert(handle, Arc::new(Mutex::new(slot)));
        handle
    }

    pub(crate) fn get(&self, handle: DirectoryHandle) -> Option<SharedSlot> {
        self.slots.get(&handle).map(|entry| Arc::clone(entry.value()))
    }

    pub(crate) fn remove(&self, handle: DirectoryHandle) -> bool {
        self.slots.remove(&handle).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn contains(&self, handle: DirectoryHandle) -> bool {
        self.slots.contains_key(&handle)
    }
}

/// Locks a slot, recovering the state if a previous holder panicked.
///
/// State is only written back after a fetch succeeds, so a poisoned slot
/// still holds the last committed state.
pub(crate) fn lock_slot(slot: &SharedSlot) -> MutexGuard<'_, HandleSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
