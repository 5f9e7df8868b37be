//! Tag-scoped log filtering and formatting for constrained targets.
//!
//! Every log call carries a severity and a *tag*. Whether the line is emitted
//! is decided per tag: explicit overrides live in an unbounded registry, and
//! a small generation-ordered cache keeps the hot path free of string
//! comparisons. Visible lines are rendered and handed to a swappable output
//! function.
//!
//! ```ignore
//! use taglog::{logi, log::{self, LogLevel}};
//!
//! const TAG: &str = "NET";
//!
//! log::set_level("*", LogLevel::Warn);
//! logi!(TAG, "connect {}", "ok"); // filtered
//!
//! log::set_level(TAG, LogLevel::Info);
//! logi!(TAG, "connect {}", "ok"); // I (12) NET: src/main.rs:9 [main] connect ok
//! ```
//!
//! All state belongs to a [`log::LogCore`] context guarded by a
//! [`sync::LockPort`]. The free functions in [`log`] and the macros operate
//! on the process-wide context.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod log;
pub mod sync;
