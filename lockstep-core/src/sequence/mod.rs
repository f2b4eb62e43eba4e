//! Synchronized sequences.
//!
//! # Organization
//!
//! - [`SyncList`] - the synchronized adapter over a `Vec<T>`
//! - [`ReadOnlyList`] - live read-only facade over a `SyncList`
//! - [`SyncSequence`] - capability trait shared by both and by the sorted
//!   map's key/value views
//!
//! ```text
//! User Code
//!    ↓ uses
//! SyncSequence (this trait)   ← index-addressable capability, never a Vec
//!    ↓ implemented by
//! SyncList                    ← owns Vec<T> behind a SyncRoot
//! ReadOnlyList                ← shares SyncList's root and storage
//! KeysView / ValuesView       ← share SyncSortedMap's root and storage
//! ```

pub mod read_only_list;
pub mod sync_list;

pub use read_only_list::ReadOnlyList;
pub use sync_list::SyncList;

use crate::error::Result;
use crate::region::SyncRoot;
use crate::snapshot::{Snapshot, SnapshotIter};

/// Index-addressable collection whose every operation runs under its
/// [`SyncRoot`].
///
/// Read-only implementors reject the `try_*` mutators with
/// [`CollectionError::ReadOnly`](crate::CollectionError::ReadOnly).
///
pub trait SyncSequence<T: Clone> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns true if the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index`.
    fn get(&self, index: usize) -> Result<T>;

    /// Returns true if an element equal to `item` is present.
    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Returns the index of the first element equal to `item`.
    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq;

    /// Copies every element in a single critical section.
    fn snapshot(&self) -> Snapshot<T>;

    /// Returns an iterator over a fresh snapshot.
    fn iter(&self) -> SnapshotIter<T> {
        self.snapshot().into_iter()
    }

    /// Collects all elements into a Vec.
    fn to_vec(&self) -> Vec<T> {
        self.snapshot().into_vec()
    }

    /// Returns true if the `try_*` mutators always fail.
    fn is_read_only(&self) -> bool;

    /// Returns the region guarding this sequence.
    fn sync_root(&self) -> &SyncRoot;

    /// Replaces the element at `index`, returning the previous one.
    fn try_set(&self, index: usize, value: T) -> Result<T>;

    /// Appends `value`.
    fn try_add(&self, value: T) -> Result<()>;

    /// Inserts `value` at `index`, shifting later elements.
    fn try_insert(&self, index: usize, value: T) -> Result<()>;

    /// Removes the first element equal to `item`.
    fn try_remove(&self, item: &T) -> Result<bool>
    where
        T: PartialEq;

    /// Removes and returns the element at `index`.
    fn try_remove_at(&self, index: usize) -> Result<T>;

    /// Removes every element.
    fn try_clear(&self) -> Result<()>;
}
