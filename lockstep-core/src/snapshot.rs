//! Snapshot iteration.
//!
//! Enumerating a synchronized adapter never walks the live collection.
//! The adapter copies its elements into a [`Snapshot`] inside one critical
//! section, and the iterator walks that private copy without further
//! locking. Concurrent mutation can therefore neither fault the iterator
//! nor tear what it observes; the price is an O(n) copy that may already
//! be behind the live collection when iteration starts.
//!
//! ```text
//!   iter()
//!     │
//!     ▼
//!   ┌──────────────────────────┐
//!   │ lock root                │
//!   │ clone every element      │   single critical section
//!   │ unlock root              │
//!   └────────────┬─────────────┘
//!                ▼
//!   Snapshot<T> ──into_iter()──► SnapshotIter<T>   (no locking)
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;

use log::trace;

use crate::region::Guarded;

/// Immutable point-in-time copy of an adapter's elements.
///
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    items: Box<[T]>,
}

impl<T> Snapshot<T> {
    pub(crate) fn from_vec(items: Vec<T>) -> Self {
        Snapshot {
            items: items.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items.into_vec()
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = SnapshotIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        SnapshotIter {
            inner: self.items.into_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Owning iterator over a [`Snapshot`].
///
/// Holds no lock and no reference to the adapter it was taken from.
///
#[derive(Clone)]
pub struct SnapshotIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> SnapshotIter<T> {
    /// Elements not yet yielded.
    ///
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }
}

impl<T> Iterator for SnapshotIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for SnapshotIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for SnapshotIter<T> {}

impl<T> FusedIterator for SnapshotIter<T> {}

impl<T: fmt::Debug> fmt::Debug for SnapshotIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SnapshotIter").field(&self.as_slice()).finish()
    }
}

/// Copies the projection of a guarded collection in a single critical section.
///
pub(crate) fn capture<C, T, F>(guarded: &Guarded<C>, project: F) -> Snapshot<T>
where
    F: FnOnce(&C) -> Vec<T>,
{
    let items = guarded.read(project);
    trace!("captured snapshot of {} elements", items.len());
    Snapshot::from_vec(items)
}
