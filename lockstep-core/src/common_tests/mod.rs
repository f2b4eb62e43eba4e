//! Generic test bodies shared by the unit and integration tests.
//!
//! Each function is written against [`SyncSequence`](crate::SyncSequence)
//! so the same body runs over a list with its own region, a list sharing
//! a region, and the read-only facades.

pub mod sequence_core_tests;
