use std::{ops::Deref, sync::atomic::AtomicU32};

use linux_futex::{Futex, Private, TimedWaitError, WaitError};
use quanta::Instant;

use crate::timeout::Timeout;

const MAX_TIMESPEC_SECS: u64 = i64::MAX as u64;

/// A 32-bit atomic word that threads can block on.
///
/// The atomic operations are reached through `Deref`. Waiting never reports
/// why it returned: callers always re-read the word afterwards.
#[derive(Default, Debug)]
pub struct FutexWord {
    futex: Futex<Private>,
}

impl FutexWord {
    pub const fn new(value: u32) -> Self {
        Self {
            futex: Futex::new(value),
        }
    }

    /// Block while the word still holds `expected`, for at most the time left
    /// in `timeout`. The time spent here is charged to `timeout`.
    pub fn wait(&self, expected: u32, timeout: &mut Timeout) {
        if !timeout.may_block() {
            return;
        }

        let begin = Instant::now();

        // The kernel rejects relative timeouts whose seconds overflow a
        // `timespec`; waits that long are indistinguishable from forever.
        let bounded = timeout
            .remaining()
            .filter(|remaining| remaining.as_secs() <= MAX_TIMESPEC_SECS);

        match bounded {
            None => match self.futex.wait(expected) {
                Ok(()) | Err(WaitError::WrongValue) | Err(WaitError::Interrupted) => {}
            },
            Some(remaining) => match self.futex.wait_for(expected, remaining) {
                Ok(())
                | Err(TimedWaitError::WrongValue)
                | Err(TimedWaitError::Interrupted)
                | Err(TimedWaitError::TimedOut) => {}
            },
        }

        timeout.elapse(Instant::now().duration_since(begin));
    }

    /// Wake every thread blocked on this word. Returns how many were woken.
    pub fn notify_all(&self) -> usize {
        self.futex.wake(i32::MAX).max(0) as usize
    }
}

impl Deref for FutexWord {
    type Target = AtomicU32;

    fn deref(&self) -> &AtomicU32 {
        &self.futex.value
    }
}
