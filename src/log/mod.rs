//! Tag-scoped logging
//!
//! The free functions here operate on the process-wide context, the same
//! one the `log*!` macros write to. Tests and targets that want a private
//! instance create their own [`LogCore`].
//!
//! # Resolution
//!
//! The level of a tag comes from, in order:
//!
//! 1. the level cache, a 31-slot min-heap keyed by tag address
//! 2. the registry of `set_level` overrides, keyed by tag content
//! 3. the default level, changed with `set_level("*", ..)`
//!
//! A message is written when its level is at or below the resolved one.

mod buffer;
mod cache;
pub mod config;
mod level;
mod line;
mod log_core;
mod macros;
mod registry;
mod sink;

#[cfg(test)]
mod tests;

use core::fmt;

pub use cache::{CacheStats, LevelCache};
pub use level::LogLevel;
#[doc(hidden)]
pub use line::short_function_name;
pub use line::{CallSite, LineFormat};
pub use log_core::{LogCore, WILDCARD_TAG};
pub use registry::{LevelRegistry, RegistryEntry};
#[cfg(feature = "std")]
pub use sink::stdout_output;
pub use sink::{DEFAULT_OUTPUT, OutputFn, WritevFn, discard_output};

use crate::sync::DefaultPort;

/// Global logging context, initialized at compile time
static GLOBAL_LOG: LogCore<DefaultPort> = LogCore::new();

/// The process-wide context
pub fn global() -> &'static LogCore<DefaultPort> {
    &GLOBAL_LOG
}

/// Sets the level of `tag`; `"*"` sets the default level and drops all overrides.
pub fn set_level(tag: &str, level: LogLevel) {
    GLOBAL_LOG.set_level(tag, level);
}

/// Installs the text output function and returns the previous one.
pub fn set_vprintf(output: OutputFn) -> OutputFn {
    GLOBAL_LOG.set_vprintf(output)
}

/// Installs or removes the structured callback and returns the previous one.
pub fn set_writev(structured: Option<WritevFn>) -> Option<WritevFn> {
    GLOBAL_LOG.set_writev(structured)
}

/// Replaces the line decoration and returns the previous one.
pub fn set_line_format(format: LineFormat) -> LineFormat {
    GLOBAL_LOG.set_line_format(format)
}

/// Whether a message at `level` for `tag` would be written.
#[inline]
pub fn is_visible(level: LogLevel, tag: &'static str) -> bool {
    GLOBAL_LOG.is_visible(level, tag)
}

/// Writes a decorated line. Called by the `log*!` macros.
pub fn write(
    level: LogLevel,
    tag: &'static str,
    call_site: Option<&CallSite>,
    args: fmt::Arguments<'_>,
) {
    GLOBAL_LOG.write(level, tag, call_site, args);
}

/// Forwards an undecorated message to the installed sinks.
pub fn writev(level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
    GLOBAL_LOG.writev(level, tag, args);
}

/// Writes `buffer` as hex bytes.
pub fn write_buffer_hex(level: LogLevel, tag: &'static str, buffer: &[u8]) {
    GLOBAL_LOG.write_buffer_hex(level, tag, buffer);
}

/// Writes `buffer` as characters.
pub fn write_buffer_char(level: LogLevel, tag: &'static str, buffer: &[u8]) {
    GLOBAL_LOG.write_buffer_char(level, tag, buffer);
}

/// Writes `buffer` as a hexdump.
pub fn write_buffer_hexdump(level: LogLevel, tag: &'static str, buffer: &[u8]) {
    GLOBAL_LOG.write_buffer_hexdump(level, tag, buffer);
}

/// Milliseconds from the runtime clock
pub fn timestamp() -> u32 {
    GLOBAL_LOG.timestamp()
}

/// Milliseconds from the clock that works before the scheduler starts
pub fn early_timestamp() -> u32 {
    GLOBAL_LOG.early_timestamp()
}

/// Hit and miss counters of the global level cache
pub fn cache_stats() -> CacheStats {
    GLOBAL_LOG.cache_stats()
}
