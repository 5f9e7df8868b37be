use core::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use lock_api::{RawMutex as _, RawMutexTimed as _};
use once_cell::sync::Lazy;

use super::LockPort;

/// Clock origin, fixed by the first timestamp taken in the process.
static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

std::thread_local! {
    static OWNER_TOKEN: u8 = const { 0 };
}

/// Non-zero value unique to the calling thread while it is alive.
fn current_owner() -> usize {
    OWNER_TOKEN.with(|token| token as *const u8 as usize)
}

/// Port for hosted targets with preemptive threads.
///
/// Waiters park instead of spinning; `lock_timeout` parks for at most the
/// given bound. The owner is recorded so that a thread locking twice trips
/// an assertion instead of deadlocking.
pub struct ThreadedPort {
    raw: parking_lot::RawMutex,
    owner: AtomicUsize,
}

impl ThreadedPort {
    /// Creates an unlocked port.
    pub const fn new() -> Self {
        Self {
            raw: parking_lot::RawMutex::INIT,
            owner: AtomicUsize::new(0),
        }
    }

    fn assert_not_owner(&self, me: usize) {
        // Only this thread can have stored `me`, so a relaxed read suffices.
        assert_ne!(
            self.owner.load(Ordering::Relaxed),
            me,
            "recursive acquisition of the log lock"
        );
    }
}

impl Default for ThreadedPort {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ThreadedPort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThreadedPort")
            .field("locked", &self.raw.is_locked())
            .finish()
    }
}

unsafe impl lock_api::RawMutex for ThreadedPort {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardNoSend;

    fn lock(&self) {
        let me = current_owner();
        self.assert_not_owner(me);
        self.raw.lock();
        self.owner.store(me, Ordering::Relaxed);
    }

    fn try_lock(&self) -> bool {
        let locked = self.raw.try_lock();
        if locked {
            self.owner.store(current_owner(), Ordering::Relaxed);
        }
        locked
    }

    unsafe fn unlock(&self) {
        self.owner.store(0, Ordering::Relaxed);
        unsafe { self.raw.unlock() };
    }

    fn is_locked(&self) -> bool {
        self.raw.is_locked()
    }
}

impl LockPort for ThreadedPort {
    fn lock_timeout(&self, timeout_ms: u32) -> bool {
        let me = current_owner();
        self.assert_not_owner(me);
        let locked = self
            .raw
            .try_lock_for(Duration::from_millis(u64::from(timeout_ms)));
        if locked {
            self.owner.store(me, Ordering::Relaxed);
        }
        locked
    }

    fn timestamp(&self) -> u32 {
        EPOCH.elapsed().as_millis() as u32
    }

    fn early_timestamp(&self) -> u32 {
        self.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::thread;

    use lock_api::RawMutex;

    use super::*;

    #[test]
    fn timed_lock_fails_while_held_elsewhere() {
        let port = Arc::new(ThreadedPort::new());
        let (locked_tx, locked_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let holder = {
            let port = Arc::clone(&port);
            thread::spawn(move || {
                port.lock();
                locked_tx.send(()).unwrap();
                release_rx.recv().unwrap();
                unsafe { port.unlock() };
            })
        };

        locked_rx.recv().unwrap();
        assert!(!port.lock_timeout(5));

        release_tx.send(()).unwrap();
        holder.join().unwrap();
        assert!(port.lock_timeout(5));
        unsafe { port.unlock() };
    }

    #[test]
    #[should_panic(expected = "recursive acquisition")]
    fn recursive_lock_panics() {
        let port = ThreadedPort::new();
        port.lock();
        port.lock();
    }

    #[test]
    fn clock_is_monotonic() {
        let port = ThreadedPort::new();
        let first = port.timestamp();
        thread::sleep(Duration::from_millis(2));
        assert!(port.timestamp() >= first);
        assert!(port.early_timestamp() >= first);
    }
}
