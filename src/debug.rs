//! Debug-only diagnostics shared by the locks.
//!
//! Assertions are `debug_assert!`s and vanish from release builds. Slow-path
//! tracing additionally needs the `debug_locks` feature.

pub(crate) const DEBUG_LOCKS: bool = cfg!(feature = "debug_locks");

/// Check a caller contract. Never changes control flow in release builds.
macro_rules! lock_assert {
    ($cond:expr, $($arg:tt)+) => {
        debug_assert!($cond, "Locking: {}", format_args!($($arg)+))
    };
}

/// Trace a lock slow path when built with `debug_locks`.
macro_rules! lock_log {
    ($($arg:tt)+) => {
        if $crate::debug::DEBUG_LOCKS {
            debug_print::debug_eprintln!("Locking: {}", format_args!($($arg)+));
        }
    };
}
