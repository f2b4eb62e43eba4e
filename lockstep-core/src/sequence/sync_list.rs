use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::comparer::{self, Comparer, NaturalOrder, SearchOutcome};
use crate::error::{self, CollectionError, Result};
use crate::region::{Guarded, SyncRoot};
use crate::sequence::{ReadOnlyList, SyncSequence};
use crate::snapshot::{self, Snapshot, SnapshotIter};

/// Synchronized adapter over a `Vec<T>`.
///
/// Every operation holds the list's [`SyncRoot`] for its own duration,
/// so concurrent calls are linearizable. Iteration walks a snapshot.
/// Derived lists (`get_range`, `find_all`, `convert_all`, `clone`) are
/// independent lists with their own region.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use lockstep_core::SyncList;
///
/// let list = Arc::new(SyncList::from_vec(vec![1, 2, 3, 4]));
///
/// let writer = {
///     let list = Arc::clone(&list);
///     thread::spawn(move || list.remove(&3))
/// };
///
/// // Never faults, whatever the interleaving.
/// let seen: Vec<i32> = list.iter().collect();
/// assert!(seen == vec![1, 2, 3, 4] || seen == vec![1, 2, 4]);
///
/// assert!(writer.join().unwrap());
/// assert_eq!(list.len(), 3);
/// ```
///
pub struct SyncList<T> {
    shared: Arc<Guarded<Vec<T>>>,
}

impl<T> SyncList<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Creates an empty list guarded by an existing region.
    ///
    pub fn with_root(root: SyncRoot) -> Self {
        Self::from_vec_with_root(Vec::new(), root)
    }

    /// Takes ownership of `items`; nothing else can reach them afterwards.
    ///
    pub fn from_vec(items: Vec<T>) -> Self {
        SyncList {
            shared: Arc::new(Guarded::new(items)),
        }
    }

    pub fn from_vec_with_root(items: Vec<T>, root: SyncRoot) -> Self {
        SyncList {
            shared: Arc::new(Guarded::with_root(items, root)),
        }
    }

    pub(crate) fn shared(&self) -> &Arc<Guarded<Vec<T>>> {
        &self.shared
    }

    /// Returns the region guarding this list.
    ///
    /// Holding its lock groups several list operations into one critical
    /// section.
    ///
    pub fn sync_root(&self) -> &SyncRoot {
        self.shared.root()
    }

    pub fn len(&self) -> usize {
        self.shared.read(|v| v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.shared.read(|v| v.is_empty())
    }

    pub fn capacity(&self) -> usize {
        self.shared.read(|v| v.capacity())
    }

    /// Sets the reserved storage to exactly `capacity` elements where the
    /// allocator allows it.
    ///
    pub fn set_capacity(&self, capacity: usize) -> Result<()> {
        self.shared.write(|v| {
            if capacity < v.len() {
                return Err(error::rejected(CollectionError::CapacityTooSmall {
                    requested: capacity,
                    len: v.len(),
                }));
            }

            let previous = v.capacity();
            if capacity > previous {
                v.reserve_exact(capacity - v.len());
            } else {
                v.shrink_to(capacity);
            }
            debug!("capacity changed from {} to {}", previous, v.capacity());
            Ok(())
        })
    }

    /// Releases reserved storage beyond the current length.
    ///
    pub fn trim_excess(&self) {
        self.shared.write(|v| v.shrink_to_fit());
    }

    /// Applies `f` to the element at `index` while the region is held.
    ///
    pub fn with_item<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.shared.read(|v| {
            error::check_index(index, v.len())?;
            Ok(f(&v[index]))
        })
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        self.shared.write(|v| {
            error::check_index(index, v.len())?;
            Ok(std::mem::replace(&mut v[index], value))
        })
    }

    pub fn add(&self, value: T) {
        self.shared.write(|v| v.push(value));
    }

    /// Appends every item in one atomic step.
    ///
    /// The iterator is drained before the region is taken.
    ///
    pub fn add_range<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return;
        }
        self.shared.write(|v| v.extend(items));
    }

    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        self.shared.write(|v| {
            error::check_insert_index(index, v.len())?;
            v.insert(index, value);
            Ok(())
        })
    }

    /// Inserts every item at `index` in one atomic step.
    ///
    pub fn insert_range<I>(&self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        self.shared.write(|v| {
            error::check_insert_index(index, v.len())?;
            v.splice(index..index, items);
            Ok(())
        })
    }

    /// Overwrites the elements starting at `index` with `items` in one
    /// atomic step.
    ///
    /// Fails with [`CollectionError::InvalidRange`] before writing anything
    /// if the run would extend past the end.
    ///
    pub fn set_range<I>(&self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        self.shared.write(|v| {
            error::check_range(index, items.len(), v.len())?;
            for (slot, item) in v[index..].iter_mut().zip(items) {
                *slot = item;
            }
            Ok(())
        })
    }

    pub fn remove_at(&self, index: usize) -> Result<T> {
        self.shared.write(|v| {
            error::check_index(index, v.len())?;
            Ok(v.remove(index))
        })
    }

    pub fn remove_range(&self, start: usize, count: usize) -> Result<()> {
        self.shared.write(|v| {
            error::check_range(start, count, v.len())?;
            v.drain(start..start + count);
            Ok(())
        })
    }

    /// Removes every element matching `predicate`, returning how many were removed.
    ///
    /// The predicate runs against the unmodified list, so it may read the
    /// list itself. Evaluation and removal form one critical section.
    ///
    pub fn remove_all(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let _root = self.shared.root().lock();
        let doomed: Vec<bool> = self
            .shared
            .read(|v| v.iter().map(|item| predicate(item)).collect());
        let removed = doomed.iter().filter(|&&hit| hit).count();
        if removed > 0 {
            self.shared.write(|v| {
                let mut mask = doomed.iter();
                v.retain(|_| !mask.next().copied().unwrap_or(false));
            });
        }
        removed
    }

    pub fn clear(&self) {
        self.shared.write(|v| v.clear());
    }

    pub fn find_index(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.shared.read(|v| v.iter().position(predicate))
    }

    /// Searches `[start, len)`.
    ///
    pub fn find_index_from(
        &self,
        start: usize,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<Option<usize>> {
        self.shared.read(|v| {
            error::check_insert_index(start, v.len())?;
            Ok(v[start..].iter().position(predicate).map(|i| i + start))
        })
    }

    /// Searches `[start, start + count)`.
    ///
    pub fn find_index_in(
        &self,
        start: usize,
        count: usize,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<Option<usize>> {
        self.shared.read(|v| {
            error::check_range(start, count, v.len())?;
            Ok(v[start..start + count]
                .iter()
                .position(predicate)
                .map(|i| i + start))
        })
    }

    pub fn find_last_index(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.shared.read(|v| v.iter().rposition(predicate))
    }

    /// Searches backward from `index` (inclusive) to the front.
    ///
    pub fn find_last_index_from(
        &self,
        index: usize,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<Option<usize>> {
        self.shared.read(|v| {
            error::check_index(index, v.len())?;
            Ok(v[..=index].iter().rposition(predicate))
        })
    }

    /// Searches the `count` elements ending at `index` (inclusive), backward.
    ///
    pub fn find_last_index_in(
        &self,
        index: usize,
        count: usize,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<Option<usize>> {
        self.shared.read(|v| {
            let first = error::check_backward_range(index, count, v.len())?;
            Ok(v[first..index + 1]
                .iter()
                .rposition(predicate)
                .map(|i| i + first))
        })
    }

    pub fn exists(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.shared.read(|v| v.iter().any(|item| predicate(item)))
    }

    pub fn true_for_all(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.shared.read(|v| v.iter().all(|item| predicate(item)))
    }

    /// Sorts with a [`Comparer`].
    ///
    /// The comparer sees the unmodified list and may read it; the new
    /// order is applied afterwards in the same critical section. The sort
    /// is stable.
    ///
    pub fn sort_by<C>(&self, comparer: &C)
    where
        C: Comparer<T> + ?Sized,
    {
        self.sort_with(|a, b| comparer.compare(a, b));
    }

    /// Sorts with a comparison function.
    ///
    /// Closure parameter types are inferred here, unlike with
    /// [`sort_by`](SyncList::sort_by).
    ///
    pub fn sort_with(&self, compare: impl FnMut(&T, &T) -> Ordering) {
        let _root = self.shared.root().lock();
        let len = self.len();
        self.reorder(0, len, compare);
    }

    /// Sorts `[start, start + count)` with a [`Comparer`].
    ///
    pub fn sort_range_by<C>(&self, start: usize, count: usize, comparer: &C) -> Result<()>
    where
        C: Comparer<T> + ?Sized,
    {
        let _root = self.shared.root().lock();
        error::check_range(start, count, self.len())?;
        self.reorder(start, count, |a, b| comparer.compare(a, b));
        Ok(())
    }

    /// Stable sort of `[start, start + count)`. The caller holds the root
    /// and has checked the range.
    ///
    /// The permutation is computed under a shared borrow, so `compare` may
    /// call read operations on this list. A panicking `compare` leaves the
    /// list untouched.
    ///
    fn reorder(&self, start: usize, count: usize, mut compare: impl FnMut(&T, &T) -> Ordering) {
        let order: Vec<usize> = self.shared.read(|v| {
            let window = &v[start..start + count];
            let mut order: Vec<usize> = (0..count).collect();
            order.sort_by(|&a, &b| compare(&window[a], &window[b]));
            order
        });
        if order.iter().enumerate().all(|(i, &j)| i == j) {
            return;
        }

        self.shared.write(|v| {
            let mut slots: Vec<Option<T>> = v.drain(start..start + count).map(Some).collect();
            let sorted: Vec<T> = order.iter().filter_map(|&i| slots[i].take()).collect();
            v.splice(start..start, sorted);
        });
    }

    /// Binary search with a [`Comparer`].
    ///
    /// The list must already be sorted by the same comparer; otherwise the
    /// outcome is unspecified.
    ///
    pub fn binary_search_by<C>(&self, item: &T, comparer: &C) -> SearchOutcome
    where
        C: Comparer<T> + ?Sized,
    {
        self.shared
            .read(|v| comparer::binary_search_by(v, item, comparer))
    }

    /// Binary search within `[start, start + count)`. Indices in the
    /// outcome are relative to the whole list.
    ///
    pub fn binary_search_range_by<C>(
        &self,
        start: usize,
        count: usize,
        item: &T,
        comparer: &C,
    ) -> Result<SearchOutcome>
    where
        C: Comparer<T> + ?Sized,
    {
        self.shared.read(|v| {
            error::check_range(start, count, v.len())?;
            Ok(comparer::binary_search_by(&v[start..start + count], item, comparer).offset(start))
        })
    }

    pub fn reverse(&self) {
        self.shared.write(|v| v.reverse());
    }

    pub fn reverse_range(&self, start: usize, count: usize) -> Result<()> {
        self.shared.write(|v| {
            error::check_range(start, count, v.len())?;
            v[start..start + count].reverse();
            Ok(())
        })
    }

    /// Maps every element into a new independent list.
    ///
    /// `converter` runs while the region is held.
    ///
    pub fn convert_all<U>(&self, converter: impl FnMut(&T) -> U) -> SyncList<U> {
        let converted: Vec<U> = self.shared.read(|v| v.iter().map(converter).collect());
        trace!("convert_all produced a list of {} elements", converted.len());
        SyncList::from_vec(converted)
    }
}

impl<T: Clone> SyncList<T> {
    pub fn from_slice(items: &[T]) -> Self {
        Self::from_vec(items.to_vec())
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.with_item(index, T::clone)
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.shared
            .read(|v| v.iter().find(|item| predicate(item)).cloned())
    }

    pub fn find_last(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.shared
            .read(|v| v.iter().rev().find(|item| predicate(item)).cloned())
    }

    /// Copies the matching elements into a new independent list.
    ///
    pub fn find_all(&self, mut predicate: impl FnMut(&T) -> bool) -> SyncList<T> {
        let found: Vec<T> = self.shared.read(|v| {
            v.iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect()
        });
        trace!("find_all produced a list of {} elements", found.len());
        SyncList::from_vec(found)
    }

    /// Copies `[start, start + count)` into a new independent list.
    ///
    pub fn get_range(&self, start: usize, count: usize) -> Result<SyncList<T>> {
        let range: Vec<T> = self.shared.read(|v| {
            error::check_range(start, count, v.len())?;
            Ok::<_, CollectionError>(v[start..start + count].to_vec())
        })?;
        trace!("get_range produced a list of {} elements", range.len());
        Ok(SyncList::from_vec(range))
    }

    /// Runs `action` over a snapshot, outside the region.
    ///
    /// `action` may call back into this list; elements added or removed
    /// meanwhile are not observed.
    ///
    pub fn for_each(&self, action: impl FnMut(&T)) {
        self.snapshot().iter().for_each(action);
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.shared.read(|v| v.clone())
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        snapshot::capture(&self.shared, |v: &Vec<T>| v.clone())
    }

    pub fn iter(&self) -> SnapshotIter<T> {
        self.snapshot().into_iter()
    }

    /// Copies `[start, start + count)` in a single critical section.
    ///
    pub fn snapshot_range(&self, start: usize, count: usize) -> Result<Snapshot<T>> {
        let _root = self.shared.root().lock();
        error::check_range(start, count, self.len())?;
        Ok(snapshot::capture(&self.shared, |v: &Vec<T>| {
            v[start..start + count].to_vec()
        }))
    }

    pub fn iter_range(&self, start: usize, count: usize) -> Result<SnapshotIter<T>> {
        Ok(self.snapshot_range(start, count)?.into_iter())
    }

    /// Copies every element into the front of `dest`.
    ///
    pub fn copy_to(&self, dest: &mut [T]) -> Result<()> {
        self.copy_to_at(dest, 0)
    }

    /// Copies every element into `dest` starting at `dest_index`.
    ///
    pub fn copy_to_at(&self, dest: &mut [T], dest_index: usize) -> Result<()> {
        self.shared.read(|v| {
            error::check_destination(dest_index, v.len(), dest.len())?;
            dest[dest_index..dest_index + v.len()].clone_from_slice(v);
            Ok(())
        })
    }

    /// Copies `[start, start + count)` into `dest` starting at `dest_index`.
    ///
    pub fn copy_range_to(
        &self,
        start: usize,
        dest: &mut [T],
        dest_index: usize,
        count: usize,
    ) -> Result<()> {
        self.shared.read(|v| {
            error::check_range(start, count, v.len())?;
            error::check_destination(dest_index, count, dest.len())?;
            dest[dest_index..dest_index + count].clone_from_slice(&v[start..start + count]);
            Ok(())
        })
    }

    /// Returns a live read-only facade sharing this list's region and storage.
    ///
    pub fn as_read_only(&self) -> ReadOnlyList<T> {
        ReadOnlyList::new(Arc::clone(&self.shared))
    }
}

impl<T: PartialEq> SyncList<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.shared.read(|v| v.contains(item))
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.shared.read(|v| v.iter().position(|x| x == item))
    }

    /// Searches `[start, len)`.
    ///
    pub fn index_of_from(&self, item: &T, start: usize) -> Result<Option<usize>> {
        self.find_index_from(start, |x| x == item)
    }

    /// Searches `[start, start + count)`.
    ///
    pub fn index_of_in(&self, item: &T, start: usize, count: usize) -> Result<Option<usize>> {
        self.find_index_in(start, count, |x| x == item)
    }

    pub fn last_index_of(&self, item: &T) -> Option<usize> {
        self.find_last_index(|x| x == item)
    }

    /// Searches backward from `index` (inclusive) to the front.
    ///
    pub fn last_index_of_from(&self, item: &T, index: usize) -> Result<Option<usize>> {
        self.find_last_index_from(index, |x| x == item)
    }

    /// Searches the `count` elements ending at `index` (inclusive), backward.
    ///
    pub fn last_index_of_in(&self, item: &T, index: usize, count: usize) -> Result<Option<usize>> {
        self.find_last_index_in(index, count, |x| x == item)
    }

    /// Removes the first element equal to `item`.
    ///
    pub fn remove(&self, item: &T) -> bool {
        self.shared.write(|v| match v.iter().position(|x| x == item) {
            Some(index) => {
                v.remove(index);
                true
            }
            None => false,
        })
    }
}

impl<T: Ord> SyncList<T> {
    pub fn sort(&self) {
        self.shared.write(|v| v.sort());
    }

    /// Binary search by the natural order of `T`.
    ///
    pub fn binary_search(&self, item: &T) -> SearchOutcome {
        self.binary_search_by(item, &NaturalOrder)
    }
}

impl<T> Default for SyncList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for SyncList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for SyncList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

/// Produces an independent list with its own region.
///
impl<T: Clone> Clone for SyncList<T> {
    fn clone(&self) -> Self {
        Self::from_vec(self.to_vec())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for SyncList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SyncList").field(&self.snapshot()).finish()
    }
}

impl<'a, T: Clone> IntoIterator for &'a SyncList<T> {
    type Item = T;
    type IntoIter = SnapshotIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> SyncSequence<T> for SyncList<T> {
    fn len(&self) -> usize {
        SyncList::len(self)
    }

    fn get(&self, index: usize) -> Result<T> {
        SyncList::get(self, index)
    }

    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        SyncList::index_of(self, item)
    }

    fn snapshot(&self) -> Snapshot<T> {
        SyncList::snapshot(self)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn sync_root(&self) -> &SyncRoot {
        SyncList::sync_root(self)
    }

    fn try_set(&self, index: usize, value: T) -> Result<T> {
        self.set(index, value)
    }

    fn try_add(&self, value: T) -> Result<()> {
        self.add(value);
        Ok(())
    }

    fn try_insert(&self, index: usize, value: T) -> Result<()> {
        self.insert(index, value)
    }

    fn try_remove(&self, item: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        Ok(self.remove(item))
    }

    fn try_remove_at(&self, index: usize) -> Result<T> {
        self.remove_at(index)
    }

    fn try_clear(&self) -> Result<()> {
        self.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let list = SyncList::new();
        assert!(list.is_empty());

        list.add(1);
        list.add_range(vec![2, 3, 4]);
        list.insert(0, 0).unwrap();
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);

        assert_eq!(list.set(2, 20).unwrap(), 2);
        assert_eq!(list.get(2).unwrap(), 20);
        assert!(list.remove(&20));
        assert!(!list.remove(&20));
        assert_eq!(list.remove_at(0).unwrap(), 0);
        assert_eq!(list.to_vec(), vec![1, 3, 4]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_index_errors() {
        let list = SyncList::from_vec(vec![1, 2, 3]);

        assert_eq!(
            list.get(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(list.set(5, 0).is_err());
        assert!(list.insert(4, 0).is_err());
        assert!(list.insert(3, 4).is_ok());
        assert_eq!(
            list.remove_range(2, 3),
            Err(CollectionError::InvalidRange {
                start: 2,
                count: 3,
                len: 4
            })
        );

        // Failed calls left nothing behind.
        //
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ranges() {
        let list = SyncList::from_vec(vec![1, 2, 3, 4, 5]);

        list.insert_range(2, vec![10, 20]).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 10, 20, 3, 4, 5]);

        list.remove_range(2, 2).unwrap();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);

        let range = list.get_range(1, 3).unwrap();
        assert_eq!(range.to_vec(), vec![2, 3, 4]);
        assert!(!range.sync_root().same_as(list.sync_root()));

        list.reverse_range(0, 3).unwrap();
        assert_eq!(list.to_vec(), vec![3, 2, 1, 4, 5]);
        list.reverse();
        assert_eq!(list.to_vec(), vec![5, 4, 1, 2, 3]);
    }

    #[test]
    fn test_search() {
        let list = SyncList::from_vec(vec![1, 2, 3, 2, 1]);

        assert_eq!(list.index_of(&2), Some(1));
        assert_eq!(list.index_of_from(&2, 2).unwrap(), Some(3));
        assert_eq!(list.index_of_in(&2, 2, 1).unwrap(), None);
        assert_eq!(list.index_of_from(&2, 5).unwrap(), None);
        assert!(list.index_of_from(&2, 6).is_err());

        assert_eq!(list.last_index_of(&1), Some(4));
        assert_eq!(list.last_index_of_from(&1, 3).unwrap(), Some(0));
        assert_eq!(list.last_index_of_in(&2, 4, 2).unwrap(), Some(3));
        assert_eq!(list.last_index_of_in(&1, 3, 3).unwrap(), None);
        assert!(list.last_index_of_in(&1, 3, 5).is_err());

        assert_eq!(list.find(|x| *x > 1), Some(2));
        assert_eq!(list.find_last(|x| *x > 2), Some(3));
        assert_eq!(list.find_index(|x| *x == 3), Some(2));
        assert_eq!(list.find_last_index(|x| *x == 2), Some(3));
        assert!(list.exists(|x| *x == 3));
        assert!(list.true_for_all(|x| *x > 0));
        assert!(!list.true_for_all(|x| *x > 1));
    }

    #[test]
    fn test_sort_and_binary_search() {
        let list = SyncList::from_vec(vec![4, 1, 3, 2]);

        list.sort();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(list.binary_search(&3), SearchOutcome::Found(2));
        assert_eq!(
            list.binary_search(&5),
            SearchOutcome::NotFound { insert_at: 4 }
        );

        list.sort_with(|a, b| b.cmp(a));
        assert_eq!(list.to_vec(), vec![4, 3, 2, 1]);

        list.sort_range_by(1, 3, &NaturalOrder).unwrap();
        assert_eq!(list.to_vec(), vec![4, 1, 2, 3]);
        assert_eq!(
            list.binary_search_range_by(1, 3, &2, &NaturalOrder).unwrap(),
            SearchOutcome::Found(2)
        );
    }

    #[test]
    fn test_capacity() {
        let list: SyncList<i32> = SyncList::with_capacity(16);
        assert!(list.capacity() >= 16);

        list.add_range(0..4);
        assert_eq!(
            list.set_capacity(2),
            Err(CollectionError::CapacityTooSmall {
                requested: 2,
                len: 4
            })
        );
        list.set_capacity(64).unwrap();
        assert!(list.capacity() >= 64);

        list.trim_excess();
        assert!(list.capacity() >= 4);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_convert_and_copy() {
        let list = SyncList::from_vec(vec![1, 2, 3]);

        let strings = list.convert_all(|x| x.to_string());
        assert_eq!(strings.to_vec(), vec!["1", "2", "3"]);

        let mut dest = [0; 5];
        list.copy_to_at(&mut dest, 1).unwrap();
        assert_eq!(dest, [0, 1, 2, 3, 0]);
        assert_eq!(
            list.copy_to_at(&mut dest, 3),
            Err(CollectionError::DestinationTooSmall {
                required: 6,
                available: 5
            })
        );

        let mut small = [0; 2];
        list.copy_range_to(1, &mut small, 0, 2).unwrap();
        assert_eq!(small, [2, 3]);
    }

    #[test]
    fn test_for_each_may_reenter() {
        let list = SyncList::from_vec(vec![1, 2, 3]);

        let mut seen = Vec::new();
        list.for_each(|x| {
            list.add(*x * 10);
            seen.push(*x);
        });

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 10, 20, 30]);
    }

    #[test]
    fn test_shared_root() {
        let root = SyncRoot::new();
        let first: SyncList<i32> = SyncList::with_root(root.clone());
        let second = SyncList::from_vec_with_root(vec![1], root.clone());

        assert!(first.sync_root().same_as(second.sync_root()));

        let _guard = root.lock();
        first.add(1);
        assert_eq!(first.to_vec(), second.to_vec());
    }

    #[test]
    fn test_remove_all_predicate_reads_list() {
        let list = SyncList::from_vec(vec![1, 2, 3, 4]);

        // Every predicate call sees the unmodified length.
        //
        let removed = list.remove_all(|x| *x as usize >= list.len() - 1);

        assert_eq!(removed, 2);
        assert_eq!(list.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_sort_comparer_reads_list() {
        let list = SyncList::from_vec(vec![3, 1, 2]);
        let mut calls = 0;

        list.sort_with(|a, b| {
            assert_eq!(list.len(), 3);
            calls += 1;
            a.cmp(b)
        });
        list.sort_range_by(0, 2, &|a: &i32, b: &i32| {
            assert!(list.contains(a));
            b.cmp(a)
        })
        .unwrap();

        assert!(calls > 0);
        assert_eq!(list.to_vec(), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let list = SyncList::from_vec(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);

        list.sort_with(|a, b| a.0.cmp(&b.0));

        assert_eq!(list.to_vec(), vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_set_range() {
        let list = SyncList::from_vec(vec![0, 1, 2, 3, 4]);

        list.set_range(1, [10, 20]).unwrap();
        assert_eq!(list.to_vec(), vec![0, 10, 20, 3, 4]);

        assert_eq!(
            list.set_range(4, [7, 8]),
            Err(CollectionError::InvalidRange {
                start: 4,
                count: 2,
                len: 5
            })
        );
        assert_eq!(list.to_vec(), vec![0, 10, 20, 3, 4]);
    }

    #[test]
    fn test_snapshot_range() {
        let list = SyncList::from_vec(vec![0, 1, 2, 3, 4]);

        let range = list.snapshot_range(1, 3).unwrap();
        let mut iter = list.iter_range(3, 2).unwrap();
        list.clear();

        assert_eq!(range.as_slice(), &[1, 2, 3]);
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next(), Some(4));
        assert_eq!(iter.next(), None);
        assert!(matches!(
            list.snapshot_range(0, 1),
            Err(CollectionError::InvalidRange { .. })
        ));
    }
}
