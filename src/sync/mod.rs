//! Lock ports
//!
//! A port is the platform capability every logging context needs: one
//! non-recursive lock and a millisecond clock. The contract builds on
//! [`lock_api::RawMutex`] and adds a bounded acquire and two timestamps.
//!
//! Three ports are provided:
//!
//! - [`NoOsPort`]: single-threaded targets. Locking only asserts that the
//!   lock is not already held.
//! - [`ThreadedPort`] (`std` feature): parking_lot mutex with a timed wait.
//! - [`RtosPort`]: the target scheduler's native mutex plus the holding
//!   task id, with time counted in scheduler ticks.
//!
//! [`DefaultPort`] picks the port used by the process-wide context.

mod noos;
mod rtos;
#[cfg(feature = "std")]
mod threaded;

pub use noos::NoOsPort;
pub use rtos::{RtosPort, Scheduler};
#[cfg(feature = "std")]
pub use threaded::ThreadedPort;

/// Port used by the process-wide logging context
#[cfg(feature = "std")]
pub type DefaultPort = ThreadedPort;

/// Port used by the process-wide logging context
#[cfg(not(feature = "std"))]
pub type DefaultPort = NoOsPort;

/// Mutual exclusion and time source for a logging context.
///
/// Implementations must behave identically as seen by the context:
///
/// - `lock` blocks until the lock is held and panics if the caller already
///   holds it. Recursion is a bug in the caller, never a runtime condition.
/// - `lock_timeout` returns `false` if the lock could not be taken within
///   the bound. The caller then treats its operation as not having happened.
/// - `unlock` releases a lock taken by `lock`, `try_lock` or `lock_timeout`.
/// - `timestamp` is the ordinary runtime clock, `early_timestamp` must work
///   before any scheduler runs and after it has crashed.
pub trait LockPort: lock_api::RawMutex {
    /// Acquires the lock, waiting at most `timeout_ms` milliseconds.
    fn lock_timeout(&self, timeout_ms: u32) -> bool;

    /// Milliseconds since an arbitrary start point.
    fn timestamp(&self) -> u32;

    /// Milliseconds from a source that does not depend on the scheduler.
    fn early_timestamp(&self) -> u32;
}
