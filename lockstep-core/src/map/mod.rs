//! Synchronized sorted map.
//!
//! ```text
//! SyncSortedMap<K, V, C>
//!     │
//!     └── Arc<Guarded<SortedPairs<K, V, C>>>
//!             ├── keys:   Vec<K>   (sorted by C)
//!             └── values: Vec<V>   (parallel to keys)
//!
//! KeysView / ValuesView clone the Arc and read through the same root.
//! ```
//!
//! Keys are unique under the comparer. Lookup by key is a binary search;
//! lookup by value is a linear scan.

pub(crate) mod sorted_pairs;
pub mod sync_sorted_map;
pub mod views;

pub use sync_sorted_map::SyncSortedMap;
pub use views::{KeysView, ValuesView};
