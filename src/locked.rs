use std::{cell::UnsafeCell, fmt};

use crate::{flag_lock::FlagLock, guard::LockGuard, timeout::Timeout, Exclusive, Lockable, TryLockable};

/// Data protected by a lock of kind `L`.
///
/// Access goes through a closure that runs with the lock held; the lock is
/// released when the closure returns or unwinds. Closure access needs an
/// [`Exclusive`] lock; with [`NoLock`] the data is only reachable through
/// `&mut self`, so nested access is rejected at compile time:
///
/// ```compile_fail
/// use liblocks::{Locked, NoLock};
///
/// let data: Locked<u32, NoLock> = Locked::new(0);
/// data.with(|a| data.with(|b| *a += *b));
/// ```
///
/// [`NoLock`]: crate::NoLock
pub struct Locked<T, L = FlagLock> {
    lock: L,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send, L: Exclusive + Sync> Sync for Locked<T, L> {}

impl<T, L: Lockable + Default> Locked<T, L> {
    pub fn new(data: T) -> Self {
        Self::with_lock(L::default(), data)
    }
}

impl<T, L: Lockable> Locked<T, L> {
    pub fn with_lock(lock: L, data: T) -> Self {
        Self {
            lock,
            data: UnsafeCell::new(data),
        }
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T, L: Exclusive> Locked<T, L> {
    /// Run `f` on the data with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let _guard = LockGuard::new(&self.lock);
        // SAFETY: the guard holds an `Exclusive` lock until the end of this
        // scope, so no other `&mut T` can exist.
        f(unsafe { &mut *self.data.get() })
    }
}

impl<T, L: Exclusive + TryLockable> Locked<T, L> {
    /// Run `f` on the data if the lock can be taken within `timeout`.
    pub fn try_with_timeout<R>(
        &self,
        timeout: &mut Timeout,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let mut guard = LockGuard::deferred(&self.lock);
        if !guard.try_lock_timeout(timeout) {
            return None;
        }
        // SAFETY: as in `with`.
        Some(f(unsafe { &mut *self.data.get() }))
    }

    /// Run `f` on the data if the lock is free right now.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_with_timeout(&mut Timeout::zero(), f)
    }
}

impl<T: Default, L: Lockable + Default> Default for Locked<T, L> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, L: fmt::Debug> fmt::Debug for Locked<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locked").field("lock", &self.lock).finish_non_exhaustive()
    }
}
