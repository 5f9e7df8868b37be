use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::LockPort;

/// Scheduler services an RTOS target exposes to [`RtosPort`].
///
/// These are free functions on the target (there is exactly one scheduler),
/// so the trait only has associated items.
pub trait Scheduler {
    /// Storage of one native scheduler mutex.
    ///
    /// Targets with priority inheritance should use a mutex that has it, so
    /// a high priority task waiting for the log lock lends its priority to
    /// the holder.
    type Mutex: Sync;

    /// An unlocked mutex. Targets that create mutexes at runtime create the
    /// native object on the first `mutex_take`.
    const MUTEX_INIT: Self::Mutex;

    /// Takes `mutex`, blocking for at most `timeout_ticks` ticks, or
    /// indefinitely for `None`. Returns whether the mutex was taken.
    fn mutex_take(mutex: &Self::Mutex, timeout_ticks: Option<u32>) -> bool;

    /// Releases `mutex`, taken by the calling task.
    fn mutex_give(mutex: &Self::Mutex);

    /// Identifier of the running task. Must differ between live tasks.
    fn current_task() -> usize;

    /// Scheduler tick counter.
    fn tick_count() -> u32;

    /// Length of one tick in milliseconds.
    fn tick_period_ms() -> u32;

    /// Free-running CPU cycle counter, readable without the scheduler.
    fn cycle_count() -> u64;

    /// CPU cycles per millisecond.
    fn cycles_per_ms() -> u32;
}

/// Port for targets running an RTOS.
///
/// Waiting happens in the scheduler's own mutex, and bounded waits are
/// measured in ticks. The holding task is recorded next to the mutex so
/// that a task locking twice trips an assertion instead of deadlocking.
/// Any `usize` is a valid task id.
pub struct RtosPort<S: Scheduler> {
    mutex: S::Mutex,
    held: AtomicBool,
    /// Task id of the holder, meaningful while `held` is set.
    owner: AtomicUsize,
    _scheduler: PhantomData<fn() -> S>,
}

impl<S: Scheduler> RtosPort<S> {
    /// Creates an unlocked port.
    pub const fn new() -> Self {
        Self {
            mutex: S::MUTEX_INIT,
            held: AtomicBool::new(false),
            owner: AtomicUsize::new(0),
            _scheduler: PhantomData,
        }
    }

    fn take(&self, timeout_ticks: Option<u32>) -> bool {
        let me = S::current_task();
        assert!(
            !(self.held.load(Ordering::Acquire) && self.owner.load(Ordering::Relaxed) == me),
            "recursive acquisition of the log lock"
        );
        if !S::mutex_take(&self.mutex, timeout_ticks) {
            return false;
        }
        self.owner.store(me, Ordering::Relaxed);
        self.held.store(true, Ordering::Release);
        true
    }
}

impl<S: Scheduler> Default for RtosPort<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> core::fmt::Debug for RtosPort<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RtosPort")
            .field("held", &self.held.load(Ordering::Relaxed))
            .field("owner", &self.owner.load(Ordering::Relaxed))
            .finish()
    }
}

unsafe impl<S: Scheduler> lock_api::RawMutex for RtosPort<S> {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self::new();

    type GuardMarker = lock_api::GuardNoSend;

    fn lock(&self) {
        let taken = self.take(None);
        assert!(taken, "scheduler mutex returned without being taken");
    }

    fn try_lock(&self) -> bool {
        self.take(Some(0))
    }

    unsafe fn unlock(&self) {
        self.held.store(false, Ordering::Release);
        S::mutex_give(&self.mutex);
    }

    fn is_locked(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }
}

impl<S: Scheduler> LockPort for RtosPort<S> {
    fn lock_timeout(&self, timeout_ms: u32) -> bool {
        let ticks = timeout_ms.div_ceil(S::tick_period_ms().max(1)).max(1);
        self.take(Some(ticks))
    }

    fn timestamp(&self) -> u32 {
        S::tick_count().wrapping_mul(S::tick_period_ms())
    }

    fn early_timestamp(&self) -> u32 {
        (S::cycle_count() / u64::from(S::cycles_per_ms().max(1))) as u32
    }
}
