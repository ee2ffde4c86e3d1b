#[macro_use]
mod debug;

pub mod flag_lock;
pub mod futex;
pub mod guard;
pub mod locked;
pub mod no_lock;
pub mod ticket_lock;
pub mod timeout;


pub use flag_lock::{Flag, FlagLock, FlagMutex, FlagMutexGuard};
pub use guard::LockGuard;
pub use locked::Locked;
pub use no_lock::NoLock;
pub use ticket_lock::TicketLock;
pub use timeout::Timeout;

/// Anything that can be locked and unlocked.
///
/// Generic containers take their lock kind as a type parameter bounded by
/// this trait, so the choice of lock is made at compile time.
pub trait Lockable {
    /// Blocking: acquire the lock, waiting as long as it takes.
    fn lock(&self);

    /// Release the lock.
    ///
    /// Must only be called by the current holder. This is not checked.
    fn unlock(&self);
}

/// A [`Lockable`] that also supports bounded acquisition.
pub trait TryLockable: Lockable {
    /// Try to acquire the lock, blocking for at most the time left in
    /// `timeout`. Time spent blocked is charged to `timeout`.
    fn try_lock_timeout(&self, timeout: &mut Timeout) -> bool;

    /// Non-blocking: try to acquire the lock once.
    fn try_lock(&self) -> bool {
        self.try_lock_timeout(&mut Timeout::zero())
    }
}

/// Marker for locks that really exclude each other's holders.
///
/// # Safety
///
/// Between a `lock()` (or successful `try_lock*`) and the matching
/// `unlock()`, no other caller may acquire the lock.
pub unsafe trait Exclusive: Lockable {}

const _: () = {
    const fn try_lockable<L: TryLockable>() {}
    const fn lockable<L: Lockable>() {}

    try_lockable::<NoLock>();
    try_lockable::<FlagLock>();
    lockable::<TicketLock>();
};
