//! Unsynchronized key-sorted pair store.
//!
//! Keys and values live in two parallel vectors kept sorted by the
//! comparer, which gives binary-search lookup, ordinal access in key
//! order and a storage reservation that can be queried and resized.
//! `SyncSortedMap` is the only owner; nothing here locks.

use crate::comparer::{self, Comparer, SearchOutcome};
use crate::error::{self, CollectionError, Result};

pub(crate) struct SortedPairs<K, V, C> {
    keys: Vec<K>,
    values: Vec<V>,
    comparer: C,
}

impl<K, V, C> SortedPairs<K, V, C>
where
    C: Comparer<K>,
{
    pub(crate) fn with_capacity(capacity: usize, comparer: C) -> Self {
        SortedPairs {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            comparer,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.keys.capacity().min(self.values.capacity())
    }

    pub(crate) fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        let len = self.len();
        if capacity < len {
            return Err(error::rejected(CollectionError::CapacityTooSmall {
                requested: capacity,
                len,
            }));
        }

        if capacity > self.capacity() {
            self.keys.reserve_exact(capacity - len);
            self.values.reserve_exact(capacity - len);
        } else {
            self.keys.shrink_to(capacity);
            self.values.shrink_to(capacity);
        }
        Ok(())
    }

    pub(crate) fn trim_excess(&mut self) {
        self.keys.shrink_to_fit();
        self.values.shrink_to_fit();
    }

    pub(crate) fn comparer(&self) -> &C {
        &self.comparer
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    fn search(&self, key: &K) -> SearchOutcome {
        comparer::binary_search_by(&self.keys, key, &self.comparer)
    }

    pub(crate) fn index_of_key(&self, key: &K) -> Option<usize> {
        self.search(key).found()
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.index_of_key(key).map(|index| &self.values[index])
    }

    /// Inserts a key that must not be present yet.
    ///
    pub(crate) fn insert_new(&mut self, key: K, value: V) -> Result<()> {
        match self.search(&key) {
            SearchOutcome::Found(_) => Err(error::rejected(CollectionError::DuplicateKey)),
            SearchOutcome::NotFound { insert_at } => {
                self.keys.insert(insert_at, key);
                self.values.insert(insert_at, value);
                Ok(())
            }
        }
    }

    /// Inserts or overwrites, returning the replaced value.
    ///
    pub(crate) fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            SearchOutcome::Found(index) => Some(std::mem::replace(&mut self.values[index], value)),
            SearchOutcome::NotFound { insert_at } => {
                self.keys.insert(insert_at, key);
                self.values.insert(insert_at, value);
                None
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.index_of_key(key)?;
        Some((self.keys.remove(index), self.values.remove(index)))
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Result<(K, V)> {
        error::check_index(index, self.len())?;
        Ok((self.keys.remove(index), self.values.remove(index)))
    }

    pub(crate) fn key_at(&self, index: usize) -> Result<&K> {
        error::check_index(index, self.len())?;
        Ok(&self.keys[index])
    }

    pub(crate) fn value_at(&self, index: usize) -> Result<&V> {
        error::check_index(index, self.len())?;
        Ok(&self.values[index])
    }

    pub(crate) fn set_value_at(&mut self, index: usize, value: V) -> Result<V> {
        error::check_index(index, self.len())?;
        Ok(std::mem::replace(&mut self.values[index], value))
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    pub(crate) fn pairs(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().zip(self.values.iter())
    }
}

impl<K, V: PartialEq, C> SortedPairs<K, V, C> {
    pub(crate) fn index_of_value(&self, value: &V) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}
