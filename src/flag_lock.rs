use std::{
    sync::atomic::Ordering::{Acquire, Relaxed, Release},
    time::{Duration, Instant},
};

use lock_api::{GuardSend, RawMutex, RawMutexTimed};
use strum::{Display, FromRepr};

use crate::{futex::FutexWord, timeout::Timeout, Exclusive, Lockable, TryLockable};

/// States of the lock word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr)]
#[repr(u32)]
pub enum Flag {
    /// The lock is not held.
    Unlocked = 0,
    /// The lock is held.
    Locked = 1,
    /// The lock is held and one or more threads may be waiting on it.
    LockedWithWaiters = 2,
}

const UNLOCKED: u32 = Flag::Unlocked as u32;
const LOCKED: u32 = Flag::Locked as u32;
const LOCKED_WITH_WAITERS: u32 = Flag::LockedWithWaiters as u32;

/// A simple flag lock, wrapping an atomic word used with futex calls.
///
/// Threads blocked on this are woken in whatever order the kernel picks
/// (priority order for real-time threads). Priority is not propagated to the
/// holder, so a low-priority holder can stall a high-priority waiter.
///
/// Any code with a reference to the lock can release it, whether or not it
/// holds it. Mutual exclusion here assumes cooperating callers.
#[derive(Default, Debug)]
pub struct FlagLock {
    flag: FutexWord,
}

/// A mutex owning its data, built on [`FlagLock`].
pub type FlagMutex<T> = lock_api::Mutex<FlagLock, T>;
pub type FlagMutexGuard<'a, T> = lock_api::MutexGuard<'a, FlagLock, T>;

impl FlagLock {
    pub const fn new() -> Self {
        Self {
            flag: FutexWord::new(UNLOCKED),
        }
    }

    /// Try to acquire the lock, blocking until `timeout` has run out.
    pub fn try_lock_timeout(&self, timeout: &mut Timeout) -> bool {
        let mut old = match self.flag.compare_exchange(UNLOCKED, LOCKED, Acquire, Relaxed) {
            Ok(_) => return true,
            Err(old) => old,
        };

        while timeout.may_block() {
            // If there are already waiters, don't bother with the atomic call.
            if old != LOCKED_WITH_WAITERS {
                lock_assert!(old == LOCKED, "Unexpected flag value: {}", old);
                old = match self
                    .flag
                    .compare_exchange(LOCKED, LOCKED_WITH_WAITERS, Relaxed, Relaxed)
                {
                    Ok(_) => LOCKED_WITH_WAITERS,
                    Err(value) => value,
                };
            }

            if old != UNLOCKED {
                lock_log!("hitting slow path wait for {:p}", self);
                self.flag.wait(old, timeout);
            }

            // Acquire with waiters so that a wake owed to another thread is
            // not lost if we win the race.
            match self
                .flag
                .compare_exchange(UNLOCKED, LOCKED_WITH_WAITERS, Acquire, Relaxed)
            {
                Ok(_) => return true,
                Err(value) => old = value,
            }
        }

        false
    }

    /// Try to acquire the lock, do not block.
    #[inline]
    pub fn try_lock(&self) -> bool {
        self.try_lock_timeout(&mut Timeout::zero())
    }

    /// Acquire the lock, potentially blocking forever.
    #[inline]
    pub fn lock(&self) {
        self.try_lock_timeout(&mut Timeout::unlimited());
    }

    /// Release the lock.
    ///
    /// Note: this does not check that the lock is held by the caller.
    pub fn unlock(&self) {
        let old = self.flag.swap(UNLOCKED, Release);
        lock_assert!(old != UNLOCKED, "Double-unlocking {:p}", self);

        if old == LOCKED_WITH_WAITERS {
            lock_log!("hitting slow path wake for {:p}", self);
            self.flag.notify_all();
        }
    }

    /// Snapshot of the lock word.
    pub fn state(&self) -> Flag {
        let raw = self.flag.load(Relaxed);
        let state = Flag::from_repr(raw);
        lock_assert!(state.is_some(), "Unexpected flag value {} in {:p}", raw, self);
        // A corrupt word reads as held with waiters: callers then keep
        // treating it as locked and the next unlock still wakes everyone.
        state.unwrap_or(Flag::LockedWithWaiters)
    }

    pub fn is_locked(&self) -> bool {
        self.state() != Flag::Unlocked
    }
}

impl Lockable for FlagLock {
    #[inline]
    fn lock(&self) {
        FlagLock::lock(self)
    }

    #[inline]
    fn unlock(&self) {
        FlagLock::unlock(self)
    }
}

impl TryLockable for FlagLock {
    #[inline]
    fn try_lock_timeout(&self, timeout: &mut Timeout) -> bool {
        FlagLock::try_lock_timeout(self, timeout)
    }
}

unsafe impl Exclusive for FlagLock {}

unsafe impl RawMutex for FlagLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: FlagLock = FlagLock::new();

    type GuardMarker = GuardSend;

    #[inline]
    fn lock(&self) {
        FlagLock::lock(self)
    }

    #[inline]
    fn try_lock(&self) -> bool {
        FlagLock::try_lock(self)
    }

    #[inline]
    unsafe fn unlock(&self) {
        FlagLock::unlock(self)
    }

    #[inline]
    fn is_locked(&self) -> bool {
        FlagLock::is_locked(self)
    }
}

unsafe impl RawMutexTimed for FlagLock {
    type Duration = Duration;
    type Instant = Instant;

    fn try_lock_for(&self, timeout: Duration) -> bool {
        FlagLock::try_lock_timeout(self, &mut Timeout::new(timeout))
    }

    fn try_lock_until(&self, deadline: Instant) -> bool {
        let remaining = deadline.saturating_duration_since(Instant::now());
        FlagLock::try_lock_timeout(self, &mut Timeout::new(remaining))
    }
}
