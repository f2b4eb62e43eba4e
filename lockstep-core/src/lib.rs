//! Thread-safe adapters over ordinary collections.
//!
//! Each adapter owns one exclusive region ([`SyncRoot`]) and runs every
//! operation inside it. Iteration never walks live storage: it walks a
//! [`Snapshot`] copied in a single critical section. Callers that need
//! a compound sequence to be atomic hold the root themselves.

pub mod common_tests;
pub mod comparer;
pub mod error;
pub mod map;
pub mod region;
pub mod sequence;
pub mod snapshot;

pub use comparer::{Comparer, NaturalOrder, Reverse, SearchOutcome};
pub use error::{CollectionError, Result};
pub use map::{KeysView, SyncSortedMap, ValuesView};
pub use region::{RootGuard, SyncRoot};
pub use sequence::{ReadOnlyList, SyncList, SyncSequence};
pub use snapshot::{Snapshot, SnapshotIter};
