//! Live key and value views of a [`SyncSortedMap`](crate::SyncSortedMap).
//!
//! A view holds the map's shared storage, not a copy. Each read locks
//! the map's root, so map mutations made after the view was taken are
//! visible through it. Views are read-only: the `try_*` mutators of
//! [`SyncSequence`] fail with [`CollectionError::ReadOnly`].

use std::fmt;
use std::sync::Arc;

use super::sorted_pairs::SortedPairs;
use crate::comparer::Comparer;
use crate::error::{self, CollectionError, Result};
use crate::region::{Guarded, SyncRoot};
use crate::sequence::SyncSequence;
use crate::snapshot::{self, Snapshot, SnapshotIter};

/// Keys of a sorted map, in sorted order.
///
pub struct KeysView<K, V, C> {
    shared: Arc<Guarded<SortedPairs<K, V, C>>>,
}

/// Values of a sorted map, in key order.
///
pub struct ValuesView<K, V, C> {
    shared: Arc<Guarded<SortedPairs<K, V, C>>>,
}

impl<K, V, C> KeysView<K, V, C>
where
    C: Comparer<K>,
{
    pub(crate) fn new(shared: Arc<Guarded<SortedPairs<K, V, C>>>) -> Self {
        KeysView { shared }
    }

    pub fn len(&self) -> usize {
        self.shared.read(|m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sync_root(&self) -> &SyncRoot {
        self.shared.root()
    }

    /// Ordinal position of `key`, found with the map's comparer.
    ///
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.shared.read(|m| m.index_of_key(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index_of(key).is_some()
    }
}

impl<K, V, C> KeysView<K, V, C>
where
    C: Comparer<K>,
    K: Clone,
{
    pub fn get(&self, index: usize) -> Result<K> {
        self.shared.read(|m| m.key_at(index).cloned())
    }

    pub fn snapshot(&self) -> Snapshot<K> {
        snapshot::capture(&self.shared, |m: &SortedPairs<K, V, C>| m.keys().to_vec())
    }

    pub fn iter(&self) -> SnapshotIter<K> {
        self.snapshot().into_iter()
    }

    pub fn to_vec(&self) -> Vec<K> {
        self.snapshot().into_vec()
    }
}

impl<K, V, C> ValuesView<K, V, C>
where
    C: Comparer<K>,
{
    pub(crate) fn new(shared: Arc<Guarded<SortedPairs<K, V, C>>>) -> Self {
        ValuesView { shared }
    }

    pub fn len(&self) -> usize {
        self.shared.read(|m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sync_root(&self) -> &SyncRoot {
        self.shared.root()
    }
}

impl<K, V, C> ValuesView<K, V, C>
where
    C: Comparer<K>,
    V: PartialEq,
{
    /// Linear scan over the values.
    ///
    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.shared.read(|m| m.index_of_value(value))
    }

    pub fn contains(&self, value: &V) -> bool {
        self.index_of(value).is_some()
    }
}

impl<K, V, C> ValuesView<K, V, C>
where
    C: Comparer<K>,
    V: Clone,
{
    pub fn get(&self, index: usize) -> Result<V> {
        self.shared.read(|m| m.value_at(index).cloned())
    }

    pub fn snapshot(&self) -> Snapshot<V> {
        snapshot::capture(&self.shared, |m: &SortedPairs<K, V, C>| m.values().to_vec())
    }

    pub fn iter(&self) -> SnapshotIter<V> {
        self.snapshot().into_iter()
    }

    pub fn to_vec(&self) -> Vec<V> {
        self.snapshot().into_vec()
    }
}

impl<K, V, C> Clone for KeysView<K, V, C> {
    fn clone(&self) -> Self {
        KeysView {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V, C> Clone for ValuesView<K, V, C> {
    fn clone(&self) -> Self {
        ValuesView {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K, V, C> fmt::Debug for KeysView<K, V, C>
where
    C: Comparer<K>,
    K: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeysView").field(&self.snapshot()).finish()
    }
}

impl<K, V, C> fmt::Debug for ValuesView<K, V, C>
where
    C: Comparer<K>,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValuesView").field(&self.snapshot()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a KeysView<K, V, C>
where
    C: Comparer<K>,
    K: Clone,
{
    type Item = K;
    type IntoIter = SnapshotIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a ValuesView<K, V, C>
where
    C: Comparer<K>,
    V: Clone,
{
    type Item = V;
    type IntoIter = SnapshotIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Implements the read-only `try_*` mutators of [`SyncSequence`].
///
macro_rules! reject_mutation {
    ($item:ty) => {
        fn is_read_only(&self) -> bool {
            true
        }

        fn try_set(&self, _index: usize, _value: $item) -> Result<$item> {
            Err(error::rejected(CollectionError::ReadOnly))
        }

        fn try_add(&self, _value: $item) -> Result<()> {
            Err(error::rejected(CollectionError::ReadOnly))
        }

        fn try_insert(&self, _index: usize, _value: $item) -> Result<()> {
            Err(error::rejected(CollectionError::ReadOnly))
        }

        fn try_remove(&self, _item: &$item) -> Result<bool>
        where
            $item: PartialEq,
        {
            Err(error::rejected(CollectionError::ReadOnly))
        }

        fn try_remove_at(&self, _index: usize) -> Result<$item> {
            Err(error::rejected(CollectionError::ReadOnly))
        }

        fn try_clear(&self) -> Result<()> {
            Err(error::rejected(CollectionError::ReadOnly))
        }
    };
}

impl<K, V, C> SyncSequence<K> for KeysView<K, V, C>
where
    C: Comparer<K>,
    K: Clone,
{
    fn len(&self) -> usize {
        KeysView::len(self)
    }

    fn get(&self, index: usize) -> Result<K> {
        KeysView::get(self, index)
    }

    fn index_of(&self, item: &K) -> Option<usize>
    where
        K: PartialEq,
    {
        KeysView::index_of(self, item)
    }

    fn snapshot(&self) -> Snapshot<K> {
        KeysView::snapshot(self)
    }

    fn sync_root(&self) -> &SyncRoot {
        KeysView::sync_root(self)
    }

    reject_mutation!(K);
}

impl<K, V, C> SyncSequence<V> for ValuesView<K, V, C>
where
    C: Comparer<K>,
    V: Clone,
{
    fn len(&self) -> usize {
        ValuesView::len(self)
    }

    fn get(&self, index: usize) -> Result<V> {
        ValuesView::get(self, index)
    }

    fn index_of(&self, item: &V) -> Option<usize>
    where
        V: PartialEq,
    {
        ValuesView::index_of(self, item)
    }

    fn snapshot(&self) -> Snapshot<V> {
        ValuesView::snapshot(self)
    }

    fn sync_root(&self) -> &SyncRoot {
        ValuesView::sync_root(self)
    }

    reject_mutation!(V);
}
