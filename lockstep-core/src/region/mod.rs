//! Exclusive region primitive.
//!
//! Every synchronized adapter owns exactly one [`SyncRoot`]. All access to
//! the adapter's inner collection goes through [`Guarded`], which acquires
//! the root for the duration of a single closure and releases it on every
//! exit path, including unwinding.
//!
//! # Design
//!
//! ```text
//! SyncList<T> / SyncSortedMap<K, V>
//!     │
//!     └── Arc<Guarded<C>>
//!             ├── SyncRoot  (Arc<ReentrantMutex<()>>)  ◄── sync_root() escape hatch
//!             └── RefCell<C> (Vec<T> / SortedPairs<K, V>)
//!
//! Live views (keys, values, as_read_only) clone the Arc<Guarded<C>>,
//! so they serialize on the same SyncRoot as their parent.
//! ```
//!
//! The root is reentrant. A thread that holds it through
//! [`SyncRoot::lock`] can keep calling adapter operations, which lets a
//! caller group a compound sequence (e.g. "take a view, then iterate it")
//! into one critical section.
//!
//! # Example
//!
//! ```rust
//! use lockstep_core::SyncList;
//!
//! let list = SyncList::from_vec(vec![1, 2, 3]);
//!
//! // Strict iteration: nothing can interleave until the guard drops.
//! let _guard = list.sync_root().lock();
//! let total: i32 = list.iter().sum();
//! assert_eq!(total, 6);
//! ```

mod guarded;

use std::fmt;
use std::sync::Arc;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

pub(crate) use guarded::Guarded;

/// Handle to the mutual-exclusion object guarding one adapter.
///
/// Cloning the handle does not create a new region; clones compare equal
/// under [`SyncRoot::same_as`].
///
#[derive(Clone, Default)]
pub struct SyncRoot {
    lock: Arc<ReentrantMutex<()>>,
}

/// Proof that the current thread holds a [`SyncRoot`].
///
/// The region is released when the guard drops. The guard is `!Send`.
///
#[must_use = "the region is released as soon as the guard is dropped"]
pub struct RootGuard<'a> {
    _guard: ReentrantMutexGuard<'a, ()>,
}

impl SyncRoot {
    pub fn new() -> Self {
        SyncRoot {
            lock: Arc::new(ReentrantMutex::new(())),
        }
    }

    /// Acquires the region, blocking until it is free.
    ///
    /// Acquiring a region already held by the current thread succeeds
    /// immediately.
    ///
    pub fn lock(&self) -> RootGuard<'_> {
        RootGuard {
            _guard: self.lock.lock(),
        }
    }

    /// Acquires the region only if no other thread holds it.
    ///
    pub fn try_lock(&self) -> Option<RootGuard<'_>> {
        self.lock.try_lock().map(|guard| RootGuard { _guard: guard })
    }

    /// Returns true if some thread currently holds the region.
    ///
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Returns true if the calling thread holds the region.
    ///
    pub fn is_held_by_current_thread(&self) -> bool {
        self.lock.is_owned_by_current_thread()
    }

    /// Returns true if both handles refer to the same region.
    ///
    pub fn same_as(&self, other: &SyncRoot) -> bool {
        Arc::ptr_eq(&self.lock, &other.lock)
    }
}

impl fmt::Debug for SyncRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncRoot")
            .field("id", &Arc::as_ptr(&self.lock))
            .field("locked", &self.is_locked())
            .finish()
    }
}
