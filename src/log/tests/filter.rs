// src/log/tests/filter.rs

use core::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::sync::LockPort;

#[test]
fn test_unconfigured_tag_uses_default() {
    let log = capturing_core(LogLevel::Info);
    let tag = "ANY";

    assert!(log.is_visible(LogLevel::Error, tag));
    assert!(log.is_visible(LogLevel::Info, tag));
    assert!(!log.is_visible(LogLevel::Debug, tag));
}

#[test]
fn test_override_beats_default() {
    let log = capturing_core(LogLevel::Error);
    let (net, disk) = ("NET", "DISK");

    log.set_level(net, LogLevel::Debug);
    log.set_level(disk, LogLevel::None);

    assert!(log.is_visible(LogLevel::Debug, net));
    assert!(!log.is_visible(LogLevel::Verbose, net));
    assert!(!log.is_visible(LogLevel::Error, disk));
}

#[test]
fn test_override_changes_after_cached() {
    let log = capturing_core(LogLevel::Info);
    let net = "NET";

    assert!(log.is_visible(LogLevel::Info, net));
    log.set_level(net, LogLevel::Error);
    assert!(!log.is_visible(LogLevel::Info, net));
    log.set_level(net, LogLevel::Verbose);
    assert!(log.is_visible(LogLevel::Verbose, net));
}

#[test]
fn test_override_matches_by_content() {
    let log = capturing_core(LogLevel::Warn);
    let cached: &'static str = "SENSOR";
    assert!(!log.is_visible(LogLevel::Info, cached));

    // A different string with the same text reaches the same override.
    let configured = alloc::string::String::from("SENSOR");
    log.set_level(&configured, LogLevel::Info);

    assert!(log.is_visible(LogLevel::Info, cached));
}

#[test]
fn test_wildcard_drops_overrides() {
    let log = capturing_core(LogLevel::Verbose);
    let net = "NET";

    log.set_level(net, LogLevel::Verbose);
    log.set_level("*", LogLevel::Warn);

    assert_eq!(log.default_level(), LogLevel::Warn);
    assert!(!log.is_visible(LogLevel::Info, net));
    assert!(log.is_visible(LogLevel::Warn, net));
}

#[test]
fn test_last_writer_wins() {
    let log = capturing_core(LogLevel::Verbose);
    let net = "NET";

    log.set_level("*", LogLevel::Error);
    log.set_level(net, LogLevel::Debug);
    assert!(log.is_visible(LogLevel::Debug, net));

    log.set_level(net, LogLevel::Debug);
    log.set_level("*", LogLevel::Error);
    assert!(!log.is_visible(LogLevel::Debug, net));
}

#[test]
fn test_all_levels_against_each_setting() {
    let log = capturing_core(LogLevel::None);
    let tag = "T";

    for configured in LogLevel::ALL {
        log.set_level(tag, configured);
        for level in LogLevel::ALL {
            assert_eq!(
                log.is_visible(level, tag),
                level <= configured,
                "message {level:?} with tag at {configured:?}"
            );
        }
    }
}

/// Port whose bounded lock never succeeds
struct BusyPort {
    locked: AtomicBool,
}

unsafe impl lock_api::RawMutex for BusyPort {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        locked: AtomicBool::new(false),
    };

    type GuardMarker = lock_api::GuardNoSend;

    fn lock(&self) {
        assert!(!self.locked.swap(true, Ordering::Acquire));
    }

    fn try_lock(&self) -> bool {
        !self.locked.swap(true, Ordering::Acquire)
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

impl LockPort for BusyPort {
    fn lock_timeout(&self, _timeout_ms: u32) -> bool {
        false
    }

    fn timestamp(&self) -> u32 {
        0
    }

    fn early_timestamp(&self) -> u32 {
        0
    }
}

#[test]
fn test_lock_timeout_fails_closed() {
    let log: LogCore<BusyPort> = LogCore::with_config(LogLevel::Verbose, LineFormat::empty());
    log.set_vprintf(capture_output);
    let tag = "BUSY";

    assert!(!log.is_visible(LogLevel::Error, tag));
    test_log!(log, LogLevel::Error, tag, "never");
    log.write_buffer_hex(LogLevel::Error, tag, b"abc");
    log.writev(LogLevel::Error, tag, format_args!("never"));

    assert!(take_lines().is_empty());
    // Configuration still goes through the blocking lock.
    log.set_level("*", LogLevel::Info);
    assert_eq!(log.default_level(), LogLevel::Info);
}

#[cfg(feature = "std")]
#[test]
fn test_lock_held_elsewhere_fails_closed() {
    use std::sync::{Arc, mpsc};
    use std::thread;

    use crate::sync::ThreadedPort;

    let log: Arc<LogCore<ThreadedPort>> = Arc::new(LogCore::new());
    let tag = "HELD";
    assert!(log.is_visible(LogLevel::Error, tag));

    let (locked_tx, locked_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let holder = {
        let log = Arc::clone(&log);
        thread::spawn(move || {
            let guard = log.hold_lock();
            locked_tx.send(()).unwrap();
            release_rx.recv().unwrap();
            drop(guard);
        })
    };

    locked_rx.recv().unwrap();
    assert!(!log.is_visible(LogLevel::Error, tag));

    release_tx.send(()).unwrap();
    holder.join().unwrap();
    assert!(log.is_visible(LogLevel::Error, tag));
}
