use std::mem;

use crate::{timeout::Timeout, Lockable, TryLockable};

/// A simple RAII type that owns a lock.
///
/// The lock is acquired on construction and released on drop if this guard
/// still owns it. It can also be released and re-acquired explicitly.
#[must_use = "if unused the lock is released immediately"]
#[derive(Debug)]
pub struct LockGuard<'a, L: Lockable> {
    /// The managed lock, `None` once ownership moved to another guard.
    lock: Option<&'a L>,
    /// Whether this guard currently holds the lock.
    owned: bool,
}

impl<'a, L: Lockable> LockGuard<'a, L> {
    /// Acquires `lock`.
    pub fn new(lock: &'a L) -> Self {
        lock.lock();
        Self {
            lock: Some(lock),
            owned: true,
        }
    }

    /// Bind to `lock` without acquiring it.
    pub fn deferred(lock: &'a L) -> Self {
        Self {
            lock: Some(lock),
            owned: false,
        }
    }

    /// Move the lock and its ownership into a new guard, leaving this one
    /// detached. Dropping a detached guard does nothing.
    pub fn take(&mut self) -> Self {
        Self {
            lock: self.lock.take(),
            owned: mem::replace(&mut self.owned, false),
        }
    }

    /// Explicitly lock the wrapped lock. Must be called with the lock
    /// released by this guard.
    pub fn lock(&mut self) {
        lock_assert!(!self.owned, "Trying to lock an already-locked lock");
        lock_assert!(self.lock.is_some(), "Trying to lock through a detached guard");
        if let Some(lock) = self.lock {
            lock.lock();
            self.owned = true;
        }
    }

    /// Explicitly unlock the wrapped lock. Must be called with the lock held
    /// by this guard.
    pub fn unlock(&mut self) {
        lock_assert!(self.owned, "Trying to unlock an unlocked lock");
        if let Some(lock) = self.lock {
            lock.unlock();
            self.owned = false;
        }
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Whether this guard still refers to a lock.
    pub fn is_attached(&self) -> bool {
        self.lock.is_some()
    }
}

impl<'a, L: TryLockable> LockGuard<'a, L> {
    /// Try to lock the wrapped lock within `timeout`. Must be called with the
    /// lock released by this guard. Returns whether the lock is now held.
    pub fn try_lock_timeout(&mut self, timeout: &mut Timeout) -> bool {
        lock_assert!(!self.owned, "Trying to lock an already-locked lock");
        self.owned = match self.lock {
            Some(lock) => lock.try_lock_timeout(timeout),
            None => false,
        };
        self.owned
    }

    /// Non-blocking [`try_lock_timeout`](Self::try_lock_timeout).
    pub fn try_lock(&mut self) -> bool {
        self.try_lock_timeout(&mut Timeout::zero())
    }
}

impl<L: Lockable> Drop for LockGuard<'_, L> {
    fn drop(&mut self) {
        if self.owned {
            if let Some(lock) = self.lock {
                lock.unlock();
            }
        }
    }
}
