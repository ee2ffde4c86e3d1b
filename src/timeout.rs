use std::time::Duration;

/// Time left to wait for a blocking operation.
///
/// Blocking calls charge the time they spent blocked to the timeout they
/// were handed, so one `Timeout` can bound a whole sequence of waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    /// `None` means wait forever.
    remaining: Option<Duration>,
    elapsed: Duration,
}

impl Timeout {
    pub const fn new(remaining: Duration) -> Self {
        Self {
            remaining: Some(remaining),
            elapsed: Duration::ZERO,
        }
    }

    /// A timeout that never runs out.
    pub const fn unlimited() -> Self {
        Self {
            remaining: None,
            elapsed: Duration::ZERO,
        }
    }

    /// An already exhausted timeout: operations must not block.
    pub const fn zero() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Total time charged to this timeout so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_unlimited(&self) -> bool {
        self.remaining.is_none()
    }

    /// Whether there is any time left to block for.
    pub fn may_block(&self) -> bool {
        self.remaining.map_or(true, |remaining| !remaining.is_zero())
    }

    /// Charge `time` against the budget.
    pub fn elapse(&mut self, time: Duration) {
        self.elapsed = self.elapsed.saturating_add(time);
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(time);
        }
    }
}

impl From<Duration> for Timeout {
    fn from(remaining: Duration) -> Self {
        Self::new(remaining)
    }
}
