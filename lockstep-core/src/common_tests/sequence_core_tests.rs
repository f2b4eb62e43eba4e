use std::sync::Arc;
use std::thread;

use crate::error::CollectionError;
use crate::sequence::SyncSequence;

/// Test add, insert, set, remove and clear on an empty writable sequence
pub fn test_basic_operations<S>(sequence: &S)
where
    S: SyncSequence<i32>,
{
    assert!(sequence.is_empty());
    assert!(!sequence.is_read_only());

    sequence.try_add(1).unwrap();
    sequence.try_add(3).unwrap();
    sequence.try_insert(1, 2).unwrap();
    assert_eq!(sequence.to_vec(), vec![1, 2, 3]);

    // Insertion at the end is allowed
    sequence.try_insert(3, 4).unwrap();
    assert_eq!(sequence.len(), 4);

    assert_eq!(sequence.try_set(0, 10), Ok(1));
    assert_eq!(sequence.get(0), Ok(10));

    assert!(sequence.contains(&4));
    assert_eq!(sequence.index_of(&3), Some(2));
    assert_eq!(sequence.index_of(&99), None);

    assert_eq!(sequence.try_remove(&2), Ok(true));
    assert_eq!(sequence.try_remove(&2), Ok(false));
    assert_eq!(sequence.try_remove_at(0), Ok(10));
    assert_eq!(sequence.to_vec(), vec![3, 4]);

    sequence.try_clear().unwrap();
    assert!(sequence.is_empty());
}

/// Test that out-of-range indices fail without modifying the sequence
pub fn test_index_errors<S>(sequence: &S)
where
    S: SyncSequence<i32>,
{
    sequence.try_add(7).unwrap();

    assert_eq!(
        sequence.get(1),
        Err(CollectionError::IndexOutOfRange { index: 1, len: 1 })
    );
    assert_eq!(
        sequence.try_set(5, 0),
        Err(CollectionError::IndexOutOfRange { index: 5, len: 1 })
    );
    assert_eq!(
        sequence.try_insert(2, 0),
        Err(CollectionError::IndexOutOfRange { index: 2, len: 1 })
    );
    assert_eq!(
        sequence.try_remove_at(1),
        Err(CollectionError::IndexOutOfRange { index: 1, len: 1 })
    );

    assert_eq!(sequence.to_vec(), vec![7]);
}

/// Test that a snapshot is unaffected by later mutations
pub fn test_snapshot_isolation<S>(sequence: &S)
where
    S: SyncSequence<i32>,
{
    for i in 0..5 {
        sequence.try_add(i).unwrap();
    }

    let snapshot = sequence.snapshot();
    let mut iter = sequence.iter();
    assert_eq!(iter.next(), Some(0));

    sequence.try_clear().unwrap();
    sequence.try_add(42).unwrap();

    assert_eq!(snapshot.as_slice(), &[0, 1, 2, 3, 4]);
    assert_eq!(iter.collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(sequence.to_vec(), vec![42]);
}

/// Test that every mutator of a read-only sequence fails and reads still work
pub fn test_read_only_rejects<S>(sequence: &S, expected: &[i32])
where
    S: SyncSequence<i32>,
{
    assert!(sequence.is_read_only());

    assert_eq!(sequence.try_add(0), Err(CollectionError::ReadOnly));
    assert_eq!(sequence.try_insert(0, 0), Err(CollectionError::ReadOnly));
    assert_eq!(sequence.try_set(0, 0), Err(CollectionError::ReadOnly));
    assert_eq!(sequence.try_remove(&0), Err(CollectionError::ReadOnly));
    assert_eq!(sequence.try_remove_at(0), Err(CollectionError::ReadOnly));
    assert_eq!(sequence.try_clear(), Err(CollectionError::ReadOnly));

    assert_eq!(sequence.to_vec(), expected);
    assert_eq!(sequence.len(), expected.len());
}

/// Test that a held root admits the owning thread's own calls
pub fn test_reentrant_root<S>(sequence: &S)
where
    S: SyncSequence<i32>,
{
    sequence.try_add(1).unwrap();
    sequence.try_add(2).unwrap();

    let _guard = sequence.sync_root().lock();
    assert!(sequence.sync_root().is_held_by_current_thread());

    let total: i32 = sequence.iter().sum();
    sequence.try_add(total).unwrap();
    assert_eq!(sequence.to_vec(), vec![1, 2, 3]);
}

/// Test concurrent appends from multiple threads
pub fn test_concurrent_operations<S>(sequence: Arc<S>)
where
    S: SyncSequence<i32> + Send + Sync + 'static,
{
    let num_threads = 4;
    let items_per_thread = 100;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let sequence = Arc::clone(&sequence);
            thread::spawn(move || {
                for i in 0..items_per_thread {
                    sequence.try_add(thread_id * items_per_thread + i).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sequence.len(), (num_threads * items_per_thread) as usize);
    for i in 0..(num_threads * items_per_thread) {
        assert!(sequence.contains(&i), "Missing item: {}", i);
    }
}
