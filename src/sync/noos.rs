use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::LockPort;

/// Port for targets without threads.
///
/// There is nobody to wait for, so the lock is just a flag that catches
/// recursive use, and the clock is a counter that advances on every read.
#[derive(Debug)]
pub struct NoOsPort {
    locked: AtomicBool,
    ticks: AtomicU32,
}

impl NoOsPort {
    /// Creates an unlocked port with the clock at zero.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
            ticks: AtomicU32::new(0),
        }
    }
}

impl Default for NoOsPort {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl lock_api::RawMutex for NoOsPort {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardNoSend;

    fn lock(&self) {
        let was_locked = self.locked.swap(true, Ordering::Acquire);
        assert!(!was_locked, "recursive acquisition of the log lock");
    }

    fn try_lock(&self) -> bool {
        !self.locked.swap(true, Ordering::Acquire)
    }

    unsafe fn unlock(&self) {
        let was_locked = self.locked.swap(false, Ordering::Release);
        debug_assert!(was_locked, "log lock released while not held");
    }

    fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl LockPort for NoOsPort {
    fn lock_timeout(&self, _timeout_ms: u32) -> bool {
        lock_api::RawMutex::lock(self);
        true
    }

    fn timestamp(&self) -> u32 {
        self.ticks.fetch_add(1, Ordering::Relaxed)
    }

    fn early_timestamp(&self) -> u32 {
        self.ticks.fetch_add(1, Ordering::Relaxed)
    }
}
