use std::sync::atomic::{AtomicU32, Ordering::SeqCst};

use crossbeam::utils::CachePadded;

use crate::{futex::FutexWord, timeout::Timeout, Exclusive, Lockable};

/// A simple ticket lock.
///
/// Threads are served strictly in the order they took their ticket, with no
/// regard for priority. A taken ticket can't be handed back, so there is no
/// `try_lock`.
#[derive(Default, Debug)]
pub struct TicketLock {
    /// The ticket currently being served.
    current: CachePadded<FutexWord>,
    /// The next ticket to hand out.
    next: CachePadded<AtomicU32>,
}

impl TicketLock {
    pub const fn new() -> Self {
        Self {
            current: CachePadded::new(FutexWord::new(0)),
            next: CachePadded::new(AtomicU32::new(0)),
        }
    }

    /// A released lock whose next ticket is `ticket`.
    #[cfg(test)]
    pub(crate) const fn starting_at(ticket: u32) -> Self {
        Self {
            current: CachePadded::new(FutexWord::new(ticket)),
            next: CachePadded::new(AtomicU32::new(ticket)),
        }
    }

    /// Acquire the lock.
    pub fn lock(&self) {
        let ticket = self.next.fetch_add(1, SeqCst);
        loop {
            let current = self.current.load(SeqCst);
            if current == ticket {
                return;
            }
            lock_log!("ticket {} waiting on {} in {:p}", ticket, current, self);
            self.current.wait(current, &mut Timeout::unlimited());
        }
    }

    /// Release the lock.
    ///
    /// Note: this does not check that the lock is held by the caller.
    pub fn unlock(&self) {
        lock_assert!(self.is_locked(), "Unlocking unheld ticket lock {:p}", self);

        let current = self.current.fetch_add(1, SeqCst).wrapping_add(1);
        if self.next.load(SeqCst) != current {
            lock_log!("waking waiters for ticket {} in {:p}", current, self);
            self.current.notify_all();
        }
    }

    /// Number of tickets handed out and not yet released, holder included.
    pub fn queue_len(&self) -> u32 {
        let current = self.current.load(SeqCst);
        self.next.load(SeqCst).wrapping_sub(current)
    }

    pub fn is_locked(&self) -> bool {
        self.queue_len() != 0
    }
}

impl Lockable for TicketLock {
    #[inline]
    fn lock(&self) {
        TicketLock::lock(self)
    }

    #[inline]
    fn unlock(&self) {
        TicketLock::unlock(self)
    }
}

unsafe impl Exclusive for TicketLock {}
