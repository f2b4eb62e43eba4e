use std::fmt;
use std::sync::Arc;

use crate::error::{self, CollectionError, Result};
use crate::region::{Guarded, SyncRoot};
use crate::sequence::SyncSequence;
use crate::snapshot::{self, Snapshot, SnapshotIter};

/// Live read-only facade over a [`SyncList`](crate::SyncList).
///
/// Reads go to the parent's storage under the parent's region, so later
/// mutations of the parent are visible. Nothing is copied up front.
///
pub struct ReadOnlyList<T> {
    shared: Arc<Guarded<Vec<T>>>,
}

impl<T> ReadOnlyList<T> {
    pub(crate) fn new(shared: Arc<Guarded<Vec<T>>>) -> Self {
        ReadOnlyList { shared }
    }

    pub fn len(&self) -> usize {
        self.shared.read(|v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.shared.read(|v| v.is_empty())
    }

    pub fn sync_root(&self) -> &SyncRoot {
        self.shared.root()
    }

    pub fn with_item<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.shared.read(|v| {
            error::check_index(index, v.len())?;
            Ok(f(&v[index]))
        })
    }
}

impl<T: Clone> ReadOnlyList<T> {
    pub fn get(&self, index: usize) -> Result<T> {
        self.with_item(index, T::clone)
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        snapshot::capture(&self.shared, |v: &Vec<T>| v.clone())
    }

    pub fn iter(&self) -> SnapshotIter<T> {
        self.snapshot().into_iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.shared.read(|v| v.clone())
    }
}

impl<T: PartialEq> ReadOnlyList<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.shared.read(|v| v.contains(item))
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.shared.read(|v| v.iter().position(|x| x == item))
    }
}

impl<T> Clone for ReadOnlyList<T> {
    fn clone(&self) -> Self {
        ReadOnlyList::new(Arc::clone(&self.shared))
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for ReadOnlyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyList").field(&self.snapshot()).finish()
    }
}

impl<'a, T: Clone> IntoIterator for &'a ReadOnlyList<T> {
    type Item = T;
    type IntoIter = SnapshotIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> SyncSequence<T> for ReadOnlyList<T> {
    fn len(&self) -> usize {
        ReadOnlyList::len(self)
    }

    fn get(&self, index: usize) -> Result<T> {
        ReadOnlyList::get(self, index)
    }

    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        ReadOnlyList::index_of(self, item)
    }

    fn snapshot(&self) -> Snapshot<T> {
        ReadOnlyList::snapshot(self)
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn sync_root(&self) -> &SyncRoot {
        ReadOnlyList::sync_root(self)
    }

    fn try_set(&self, _index: usize, _value: T) -> Result<T> {
        Err(error::rejected(CollectionError::ReadOnly))
    }

    fn try_add(&self, _value: T) -> Result<()> {
        Err(error::rejected(CollectionError::ReadOnly))
    }

    fn try_insert(&self, _index: usize, _value: T) -> Result<()> {
        Err(error::rejected(CollectionError::ReadOnly))
    }

    fn try_remove(&self, _item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        Err(error::rejected(CollectionError::ReadOnly))
    }

    fn try_remove_at(&self, _index: usize) -> Result<T> {
        Err(error::rejected(CollectionError::ReadOnly))
    }

    fn try_clear(&self) -> Result<()> {
        Err(error::rejected(CollectionError::ReadOnly))
    }
}
