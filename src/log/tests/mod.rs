// src/log/tests/mod.rs

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use super::level::LogLevel;
use super::line::LineFormat;
use super::log_core::LogCore;
use crate::sync::NoOsPort;

// ========== Capture sinks ==========

std::thread_local! {
    static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static RECORDS: RefCell<Vec<(LogLevel, &'static str, String)>> =
        const { RefCell::new(Vec::new()) };
}

/// Output function that records every line on the calling thread
fn capture_output(args: fmt::Arguments<'_>) {
    LINES.with(|lines| lines.borrow_mut().push(args.to_string()));
}

/// Structured callback that records level, tag and text on the calling thread
fn capture_records(level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
    RECORDS.with(|records| records.borrow_mut().push((level, tag, args.to_string())));
}

/// Drains the lines captured so far.
fn take_lines() -> Vec<String> {
    LINES.with(|lines| core::mem::take(&mut *lines.borrow_mut()))
}

/// Drains the structured records captured so far.
fn take_records() -> Vec<(LogLevel, &'static str, String)> {
    RECORDS.with(|records| core::mem::take(&mut *records.borrow_mut()))
}

/// Context writing undecorated lines into the capture sink
fn capturing_core(default_level: LogLevel) -> LogCore<NoOsPort> {
    let log = LogCore::with_config(default_level, LineFormat::empty());
    log.set_vprintf(capture_output);
    log
}

// ========== Test helper macros ==========

/// Writes through a local context the way the `log*!` macros do.
macro_rules! test_log {
    ($log:expr, $level:expr, $tag:expr, $($arg:tt)*) => {
        $log.write($level, $tag, None, format_args!($($arg)*))
    };
}

mod filter;
