//! Pluggable total order for sorting and searching.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Implemented by [`NaturalOrder`] for `T: Ord` and by every closure
/// `Fn(&T, &T) -> Ordering`. Closures passed through a `Comparer` bound
/// need annotated parameters, as in `sort_by(&|a: &i32, b: &i32| b.cmp(a))`;
/// `SyncList::sort_with` takes an unannotated closure.
///
/// # Example
///
/// ```rust
/// use lockstep_core::SyncList;
///
/// let list = SyncList::from_vec(vec![1, 3, 2]);
///
/// list.sort_by(&|a: &i32, b: &i32| b.cmp(a));
/// assert_eq!(list.to_vec(), vec![3, 2, 1]);
///
/// list.sort_with(|a, b| a.cmp(b));
/// assert_eq!(list.to_vec(), vec![1, 2, 3]);
/// ```
///
pub trait Comparer<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The `Ord` ordering of `T`.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparer<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses another comparer.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for Reverse<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Result of a binary search.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Index of a matching element.
    Found(usize),
    /// No match; inserting at `insert_at` keeps the sequence sorted.
    NotFound { insert_at: usize },
}

impl SearchOutcome {
    pub fn found(self) -> Option<usize> {
        match self {
            SearchOutcome::Found(index) => Some(index),
            SearchOutcome::NotFound { .. } => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// Shifts the outcome by `offset`, used when searching a sub-range.
    ///
    pub(crate) fn offset(self, offset: usize) -> Self {
        match self {
            SearchOutcome::Found(index) => SearchOutcome::Found(index + offset),
            SearchOutcome::NotFound { insert_at } => SearchOutcome::NotFound {
                insert_at: insert_at + offset,
            },
        }
    }
}

impl From<std::result::Result<usize, usize>> for SearchOutcome {
    fn from(result: std::result::Result<usize, usize>) -> Self {
        match result {
            Ok(index) => SearchOutcome::Found(index),
            Err(insert_at) => SearchOutcome::NotFound { insert_at },
        }
    }
}

/// Binary search over a slice sorted by `comparer`.
///
pub(crate) fn binary_search_by<T, C>(items: &[T], item: &T, comparer: &C) -> SearchOutcome
where
    C: Comparer<T> + ?Sized,
{
    items
        .binary_search_by(|probe| comparer.compare(probe, item))
        .into()
}
