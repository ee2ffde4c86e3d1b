use crate::{timeout::Timeout, Lockable, TryLockable};

/// Implements the locking traits but does not lock.
///
/// For lock-generic data structures instantiated where no locking is
/// needed. It is deliberately not [`Exclusive`](crate::Exclusive).
#[derive(Default, Debug, Clone, Copy)]
pub struct NoLock;

impl NoLock {
    pub const fn new() -> Self {
        NoLock
    }
}

impl Lockable for NoLock {
    #[inline(always)]
    fn lock(&self) {}

    #[inline(always)]
    fn unlock(&self) {}
}

impl TryLockable for NoLock {
    /// Always succeeds.
    #[inline(always)]
    fn try_lock_timeout(&self, _timeout: &mut Timeout) -> bool {
        true
    }

    /// Always succeeds.
    #[inline(always)]
    fn try_lock(&self) -> bool {
        true
    }
}
