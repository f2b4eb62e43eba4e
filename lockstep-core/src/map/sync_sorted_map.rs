use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use super::sorted_pairs::SortedPairs;
use super::views::{KeysView, ValuesView};
use crate::comparer::{Comparer, NaturalOrder};
use crate::error::{self, CollectionError, Result};
use crate::region::{Guarded, SyncRoot};
use crate::snapshot::{self, Snapshot, SnapshotIter};

/// Synchronized adapter over a key-sorted map with ordinal access.
///
/// Keys are ordered by the comparer `C` (natural order by default). Every
/// operation holds the map's [`SyncRoot`] for its own duration; iteration
/// walks a snapshot of `(key, value)` pairs in key order. [`keys`] and
/// [`values`] are live views that lock the same root.
///
/// [`keys`]: SyncSortedMap::keys
/// [`values`]: SyncSortedMap::values
///
/// # Example
///
/// ```rust
/// use lockstep_core::{CollectionError, SyncSortedMap};
///
/// let map = SyncSortedMap::new();
/// map.add(10, "b").unwrap();
/// map.add(1, "a").unwrap();
///
/// assert_eq!(map.add(1, "x"), Err(CollectionError::DuplicateKey));
/// assert_eq!(map.get(&10), Ok("b"));
/// assert_eq!(map.key_at(0), Ok(1));
///
/// let keys = map.keys();
/// map.set(20, "c");
/// assert_eq!(keys.to_vec(), vec![1, 10, 20]);
/// ```
///
pub struct SyncSortedMap<K, V, C = NaturalOrder> {
    shared: Arc<Guarded<SortedPairs<K, V, C>>>,
}

impl<K: Ord, V> SyncSortedMap<K, V, NaturalOrder> {
    pub fn new() -> Self {
        Self::with_comparer(NaturalOrder)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, NaturalOrder)
    }

    /// Builds a map from pairs, rejecting repeated keys.
    ///
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::try_from_pairs_with_comparer(pairs, NaturalOrder)
    }
}

impl<K, V, C> SyncSortedMap<K, V, C>
where
    C: Comparer<K>,
{
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_capacity_and_comparer(0, comparer)
    }

    pub fn with_capacity_and_comparer(capacity: usize, comparer: C) -> Self {
        Self::from_pairs(SortedPairs::with_capacity(capacity, comparer))
    }

    pub fn try_from_pairs_with_comparer<I>(pairs: I, comparer: C) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let mut inner = SortedPairs::with_capacity(pairs.size_hint().0, comparer);
        for (key, value) in pairs {
            inner.insert_new(key, value)?;
        }
        Ok(Self::from_pairs(inner))
    }

    fn from_pairs(inner: SortedPairs<K, V, C>) -> Self {
        SyncSortedMap {
            shared: Arc::new(Guarded::new(inner)),
        }
    }

    /// Returns the region guarding this map and its key/value views.
    ///
    pub fn sync_root(&self) -> &SyncRoot {
        self.shared.root()
    }

    pub fn len(&self) -> usize {
        self.shared.read(|m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.shared.read(|m| m.capacity())
    }

    pub fn set_capacity(&self, capacity: usize) -> Result<()> {
        self.shared.write(|m| {
            let previous = m.capacity();
            m.set_capacity(capacity)?;
            debug!("capacity changed from {} to {}", previous, m.capacity());
            Ok(())
        })
    }

    pub fn trim_excess(&self) {
        self.shared.write(|m| m.trim_excess());
    }

    /// Adds a pair; fails with [`CollectionError::DuplicateKey`] if the key exists.
    ///
    pub fn add(&self, key: K, value: V) -> Result<()> {
        self.shared.write(|m| m.insert_new(key, value))
    }

    /// Inserts or overwrites, returning the replaced value.
    ///
    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.shared.write(|m| m.upsert(key, value))
    }

    /// Applies `f` to the value for `key` while the region is held.
    ///
    pub fn with_value<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.shared.read(|m| m.get(key).map(f))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.shared.read(|m| m.index_of_key(key).is_some())
    }

    /// Ordinal position of `key` in key order.
    ///
    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.shared.read(|m| m.index_of_key(key))
    }

    pub fn remove(&self, key: &K) -> bool {
        self.shared.write(|m| m.remove(key).is_some())
    }

    /// Removes the pair at ordinal position `index`.
    ///
    pub fn remove_at(&self, index: usize) -> Result<(K, V)> {
        self.shared.write(|m| m.remove_at(index))
    }

    pub fn set_value_at(&self, index: usize, value: V) -> Result<V> {
        self.shared.write(|m| m.set_value_at(index, value))
    }

    pub fn clear(&self) {
        self.shared.write(|m| m.clear());
    }

    /// Live view of the keys in sorted order.
    ///
    pub fn keys(&self) -> KeysView<K, V, C> {
        KeysView::new(Arc::clone(&self.shared))
    }

    /// Live view of the values in key order.
    ///
    pub fn values(&self) -> ValuesView<K, V, C> {
        ValuesView::new(Arc::clone(&self.shared))
    }
}

impl<K, V, C> SyncSortedMap<K, V, C>
where
    C: Comparer<K> + Clone,
{
    pub fn comparer(&self) -> C {
        self.shared.read(|m| m.comparer().clone())
    }
}

impl<K, V, C> SyncSortedMap<K, V, C>
where
    C: Comparer<K>,
    V: Clone,
{
    /// Returns the value for `key`; fails with [`CollectionError::KeyNotFound`].
    ///
    pub fn get(&self, key: &K) -> Result<V> {
        self.try_get(key)
            .ok_or_else(|| error::rejected(CollectionError::KeyNotFound))
    }

    pub fn try_get(&self, key: &K) -> Option<V> {
        self.with_value(key, V::clone)
    }

    pub fn value_at(&self, index: usize) -> Result<V> {
        self.shared.read(|m| m.value_at(index).cloned())
    }
}

impl<K, V, C> SyncSortedMap<K, V, C>
where
    C: Comparer<K>,
    K: Clone,
{
    pub fn key_at(&self, index: usize) -> Result<K> {
        self.shared.read(|m| m.key_at(index).cloned())
    }
}

impl<K, V, C> SyncSortedMap<K, V, C>
where
    C: Comparer<K>,
    V: PartialEq,
{
    /// Linear scan over the values.
    ///
    pub fn contains_value(&self, value: &V) -> bool {
        self.index_of_value(value).is_some()
    }

    pub fn index_of_value(&self, value: &V) -> Option<usize> {
        self.shared.read(|m| m.index_of_value(value))
    }
}

impl<K, V, C> SyncSortedMap<K, V, C>
where
    C: Comparer<K>,
    K: Clone,
    V: Clone,
{
    /// Copies every pair, in key order, in a single critical section.
    ///
    pub fn snapshot(&self) -> Snapshot<(K, V)> {
        snapshot::capture(&self.shared, |m: &SortedPairs<K, V, C>| {
            m.pairs().map(|(k, v)| (k.clone(), v.clone())).collect()
        })
    }

    pub fn iter(&self) -> SnapshotIter<(K, V)> {
        self.snapshot().into_iter()
    }

    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.snapshot().into_vec()
    }

    /// Copies every pair into `dest` starting at `dest_index`.
    ///
    pub fn copy_to(&self, dest: &mut [(K, V)], dest_index: usize) -> Result<()> {
        self.shared.read(|m| {
            error::check_destination(dest_index, m.len(), dest.len())?;
            for (slot, (k, v)) in dest[dest_index..].iter_mut().zip(m.pairs()) {
                *slot = (k.clone(), v.clone());
            }
            Ok(())
        })
    }
}

impl<K, V, C> Default for SyncSortedMap<K, V, C>
where
    C: Comparer<K> + Default,
{
    fn default() -> Self {
        Self::with_comparer(C::default())
    }
}

/// Later pairs overwrite earlier ones with the same key.
///
impl<K: Ord, V> FromIterator<(K, V)> for SyncSortedMap<K, V, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut inner = SortedPairs::with_capacity(iter.size_hint().0, NaturalOrder);
        for (key, value) in iter {
            inner.upsert(key, value);
        }
        Self::from_pairs(inner)
    }
}

/// Produces an independent map with its own region.
///
impl<K, V, C> Clone for SyncSortedMap<K, V, C>
where
    C: Comparer<K> + Clone,
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let inner = self.shared.read(|m| {
            let mut copy = SortedPairs::with_capacity(m.len(), m.comparer().clone());
            for (k, v) in m.pairs() {
                // Source keys are already unique and sorted.
                //
                copy.upsert(k.clone(), v.clone());
            }
            copy
        });
        trace!("cloned sorted map of {} pairs", inner.len());
        Self::from_pairs(inner)
    }
}

impl<K, V, C> fmt::Debug for SyncSortedMap<K, V, C>
where
    C: Comparer<K>,
    K: Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_map()
            .entries(snapshot.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a SyncSortedMap<K, V, C>
where
    C: Comparer<K>,
    K: Clone,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = SnapshotIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
