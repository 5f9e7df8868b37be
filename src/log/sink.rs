//! Output sinks
//!
//! Rendered lines leave the crate through two swappable function pointers:
//! a printf-like output function that receives the finished text, and an
//! optional structured callback that additionally receives level and tag,
//! for forwarding into another logging framework.

use core::fmt;

use super::level::LogLevel;
use super::line::LineFormat;

/// Receives every visible line, already decorated and newline-terminated.
pub type OutputFn = fn(fmt::Arguments<'_>);

/// Receives every visible line together with its level and tag.
pub type WritevFn = fn(LogLevel, &'static str, fmt::Arguments<'_>);

/// Writes to the process standard output.
#[cfg(feature = "std")]
pub fn stdout_output(args: fmt::Arguments<'_>) {
    use std::io::Write;
    let _ = std::io::stdout().lock().write_fmt(args);
}

/// Drops the line. Default output without `std`; install a UART writer
/// with `set_vprintf`.
pub fn discard_output(_args: fmt::Arguments<'_>) {}

/// Output function installed in new contexts
#[cfg(feature = "std")]
pub const DEFAULT_OUTPUT: OutputFn = stdout_output;

/// Output function installed in new contexts
#[cfg(not(feature = "std"))]
pub const DEFAULT_OUTPUT: OutputFn = discard_output;

/// Snapshot of the installed sinks, taken under the context lock
#[derive(Clone, Copy)]
pub(crate) struct Sinks {
    pub(crate) output: OutputFn,
    pub(crate) structured: Option<WritevFn>,
    pub(crate) format: LineFormat,
}

impl Sinks {
    pub(crate) fn emit(&self, level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
        (self.output)(args);
        if let Some(structured) = self.structured {
            structured(level, tag, args);
        }
    }
}
