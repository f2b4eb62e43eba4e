//! Error type shared by every synchronized adapter.
//!
//! All variants are usage errors. They are detected inside the critical
//! section before any mutation happens, so an `Err` never leaves a
//! partially modified collection behind.

use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("range starting at {start} with count {count} exceeds length {len}")]
    InvalidRange { start: usize, count: usize, len: usize },

    #[error("backward range ending at {index} with count {count} runs past the front (length {len})")]
    InvalidBackwardRange { index: usize, count: usize, len: usize },

    #[error("an element with the same key already exists")]
    DuplicateKey,

    #[error("the given key was not present")]
    KeyNotFound,

    #[error("capacity {requested} is smaller than the current length {len}")]
    CapacityTooSmall { requested: usize, len: usize },

    #[error("destination holds {available} slots but {required} are required")]
    DestinationTooSmall { required: usize, available: usize },

    #[error("collection is read-only")]
    ReadOnly,
}

pub type Result<T> = std::result::Result<T, CollectionError>;

/// Logs a rejected call and hands the error back.
///
pub(crate) fn rejected(err: CollectionError) -> CollectionError {
    debug!("rejected: {}", err);
    err
}

/// Checks `index < len`.
///
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(rejected(CollectionError::IndexOutOfRange { index, len }))
    }
}

/// Checks `index <= len`, the valid positions for an insertion.
///
pub(crate) fn check_insert_index(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(rejected(CollectionError::IndexOutOfRange { index, len }))
    }
}

/// Checks that `[start, start + count)` lies within `[0, len)`.
///
pub(crate) fn check_range(start: usize, count: usize, len: usize) -> Result<()> {
    match start.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(rejected(CollectionError::InvalidRange { start, count, len })),
    }
}

/// Checks the backward window of `count` elements ending at `index` (inclusive).
///
/// Returns the first index of the window.
///
pub(crate) fn check_backward_range(index: usize, count: usize, len: usize) -> Result<usize> {
    check_index(index, len)?;
    if count > index + 1 {
        return Err(rejected(CollectionError::InvalidBackwardRange {
            index,
            count,
            len,
        }));
    }
    Ok(index + 1 - count)
}

/// Checks that `count` slots are available in `dest` starting at `dest_index`.
///
pub(crate) fn check_destination(dest_index: usize, count: usize, available: usize) -> Result<()> {
    match dest_index.checked_add(count) {
        Some(required) if required <= available => Ok(()),
        Some(required) => Err(rejected(CollectionError::DestinationTooSmall {
            required,
            available,
        })),
        None => Err(rejected(CollectionError::DestinationTooSmall {
            required: usize::MAX,
            available,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(CollectionError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(check_insert_index(1, 1).is_ok());
        assert!(check_insert_index(2, 1).is_err());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(0, 4, 4).is_ok());
        assert!(check_range(4, 0, 4).is_ok());
        assert!(check_range(3, 2, 4).is_err());
        assert!(check_range(usize::MAX, 2, 4).is_err());
    }

    #[test]
    fn test_check_backward_range() {
        assert_eq!(check_backward_range(3, 4, 4), Ok(0));
        assert_eq!(check_backward_range(3, 2, 4), Ok(2));
        assert_eq!(
            check_backward_range(3, 5, 4),
            Err(CollectionError::InvalidBackwardRange {
                index: 3,
                count: 5,
                len: 4
            })
        );
        assert!(check_backward_range(4, 1, 4).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = CollectionError::InvalidRange {
            start: 3,
            count: 2,
            len: 4,
        };
        assert_eq!(
            err.to_string(),
            "range starting at 3 with count 2 exceeds length 4"
        );
        assert_eq!(
            CollectionError::InvalidBackwardRange {
                index: 1,
                count: 3,
                len: 4
            }
            .to_string(),
            "backward range ending at 1 with count 3 runs past the front (length 4)"
        );
        assert_eq!(CollectionError::ReadOnly.to_string(), "collection is read-only");
    }
}
