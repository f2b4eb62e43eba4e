use std::cell::RefCell;

use super::SyncRoot;

/// An inner collection reachable only through its [`SyncRoot`].
///
/// `read` and `write` are the only entry points. Each one holds the root
/// for the duration of the closure, so the `RefCell` is touched by at most
/// one thread at a time.
///
pub(crate) struct Guarded<C> {
    root: SyncRoot,
    inner: RefCell<C>,
}

impl<C> Guarded<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self::with_root(inner, SyncRoot::new())
    }

    pub(crate) fn with_root(inner: C, root: SyncRoot) -> Self {
        Guarded {
            root,
            inner: RefCell::new(inner),
        }
    }

    pub(crate) fn root(&self) -> &SyncRoot {
        &self.root
    }

    /// Runs `f` with shared access to the inner collection.
    ///
    pub(crate) fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        let _guard = self.root.lock();
        let inner = match self.inner.try_borrow() {
            Ok(inner) => inner,
            Err(_) => panic!("synchronized collection read while it is being mutated"),
        };
        f(&inner)
    }

    /// Runs `f` with exclusive access to the inner collection.
    ///
    /// Panics if the current thread re-enters from inside a `read` or
    /// `write` callback of the same collection.
    ///
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let _guard = self.root.lock();
        let mut inner = match self.inner.try_borrow_mut() {
            Ok(inner) => inner,
            Err(_) => panic!("synchronized collection mutated from inside its own callback"),
        };
        f(&mut inner)
    }
}

// Thread safety
//
// The RefCell borrow flag is only read or written while `root` is held,
// and the reentrant root admits one thread at a time.
//
unsafe impl<C: Send> Sync for Guarded<C> {}
