//! Logging context
//!
//! [`LogCore`] owns everything a logging instance needs: the default level,
//! the per-tag registry, the level cache and the installed sinks. All of it
//! sits behind the lock of one [`LockPort`], so a context can be a `static`
//! shared by every thread or a local instance inside a test.

use core::cell::UnsafeCell;
use core::fmt;
use core::ops::{Deref, DerefMut};

use super::buffer::{char_lines, hex_lines, hexdump_lines};
use super::cache::{CacheStats, LevelCache};
use super::config::{DEFAULT_LINE_FORMAT, DEFAULT_LOG_LEVEL, LOCK_TIMEOUT_MS, TAG_CACHE_SIZE};
use super::level::LogLevel;
use super::line::{CallSite, Line, LineFormat};
use super::registry::LevelRegistry;
use super::sink::{DEFAULT_OUTPUT, OutputFn, Sinks, WritevFn};
use crate::sync::LockPort;

/// Tag that addresses every tag at once in [`LogCore::set_level`]
pub const WILDCARD_TAG: &str = "*";

/// State guarded by the context lock
struct LogState {
    default_level: LogLevel,
    registry: LevelRegistry,
    cache: LevelCache<TAG_CACHE_SIZE>,
    output: OutputFn,
    structured: Option<WritevFn>,
    format: LineFormat,
}

impl LogState {
    const fn new(default_level: LogLevel, format: LineFormat) -> Self {
        Self {
            default_level,
            registry: LevelRegistry::new(),
            cache: LevelCache::new(),
            output: DEFAULT_OUTPUT,
            structured: None,
            format,
        }
    }

    /// Cache, then registry, then the default level.
    fn resolve(&mut self, tag: &'static str) -> LogLevel {
        if let Some(level) = self.cache.try_get(tag) {
            return level;
        }
        let level = self.registry.lookup(tag).unwrap_or(self.default_level);
        self.cache.insert(tag, level);
        level
    }

    fn sinks(&self) -> Sinks {
        Sinks {
            output: self.output,
            structured: self.structured,
            format: self.format,
        }
    }
}

/// A logging context.
///
/// The context is generic over its [`LockPort`], which is fixed per target.
/// Configuration calls (`set_*`) wait for the lock; log calls wait at most
/// [`LOCK_TIMEOUT_MS`] and drop the message if the lock stays busy.
///
/// # Tags
///
/// Tags passed to log calls are `&'static str` and are cached by *address*:
/// two different strings with the same content are distinct cache entries
/// even though they share one registry override. Declare each tag once,
/// e.g. `static TAG: &str = "NET";`, and reuse it.
///
/// # Examples
///
/// ```ignore
/// static LOG: LogCore<NoOsPort> = LogCore::new();
///
/// LOG.set_level("*", LogLevel::Warn);
/// assert!(!LOG.is_visible(LogLevel::Info, "NET"));
/// ```
pub struct LogCore<P: LockPort> {
    port: P,
    state: UnsafeCell<LogState>,
}

// SAFETY: `state` is only reached through `StateGuard`, which holds the port lock.
unsafe impl<P: LockPort + Sync> Sync for LogCore<P> {}

impl<P: LockPort> LogCore<P> {
    /// Creates a context with [`DEFAULT_LOG_LEVEL`] and [`DEFAULT_LINE_FORMAT`].
    pub const fn new() -> Self {
        Self::with_config(DEFAULT_LOG_LEVEL, DEFAULT_LINE_FORMAT)
    }

    /// Creates a context with the given default level and line format.
    pub const fn with_config(default_level: LogLevel, format: LineFormat) -> Self {
        Self {
            port: P::INIT,
            state: UnsafeCell::new(LogState::new(default_level, format)),
        }
    }

    /// Sets the level of `tag`, or with [`WILDCARD_TAG`] the default level.
    ///
    /// The wildcard also drops every per-tag override. A tag that cannot be
    /// registered for lack of memory keeps its previous level.
    pub fn set_level(&self, tag: &str, level: LogLevel) {
        let mut state = self.lock();
        if tag == WILDCARD_TAG {
            state.default_level = level;
            state.registry.clear();
            state.cache.reset();
            return;
        }
        if state.registry.set(tag, level).is_ok() {
            state.cache.update_matching(tag, level);
        }
    }

    /// Installs the text output function and returns the previous one.
    pub fn set_vprintf(&self, output: OutputFn) -> OutputFn {
        core::mem::replace(&mut self.lock().output, output)
    }

    /// Installs or removes the structured callback and returns the previous one.
    pub fn set_writev(&self, structured: Option<WritevFn>) -> Option<WritevFn> {
        core::mem::replace(&mut self.lock().structured, structured)
    }

    /// Replaces the line decoration and returns the previous one.
    pub fn set_line_format(&self, format: LineFormat) -> LineFormat {
        core::mem::replace(&mut self.lock().format, format)
    }

    /// Current line decoration
    pub fn line_format(&self) -> LineFormat {
        self.lock().format
    }

    /// Level used for tags without an override
    pub fn default_level(&self) -> LogLevel {
        self.lock().default_level
    }

    /// Whether a message at `level` for `tag` would be written.
    ///
    /// Returns `false` when the lock cannot be taken in time. Use it to skip
    /// building expensive arguments.
    pub fn is_visible(&self, level: LogLevel, tag: &'static str) -> bool {
        self.visible_sinks(level, tag).is_some()
    }

    /// Forwards an already formatted message to the installed sinks if visible.
    pub fn writev(&self, level: LogLevel, tag: &'static str, args: fmt::Arguments<'_>) {
        if let Some(sinks) = self.visible_sinks(level, tag) {
            sinks.emit(level, tag, args);
        }
    }

    /// Writes a decorated line if visible.
    ///
    /// `call_site` supplies the file, line and function segments; without it
    /// only the level, timestamp and tag precede the message.
    pub fn write(
        &self,
        level: LogLevel,
        tag: &'static str,
        call_site: Option<&CallSite>,
        args: fmt::Arguments<'_>,
    ) {
        if let Some(sinks) = self.visible_sinks(level, tag) {
            self.emit_line(&sinks, level, tag, call_site, args);
        }
    }

    /// Writes `buffer` as hex bytes, 16 per line.
    pub fn write_buffer_hex(&self, level: LogLevel, tag: &'static str, buffer: &[u8]) {
        self.write_buffer(level, tag, buffer, hex_lines);
    }

    /// Writes `buffer` as characters, 16 per line.
    pub fn write_buffer_char(&self, level: LogLevel, tag: &'static str, buffer: &[u8]) {
        self.write_buffer(level, tag, buffer, char_lines);
    }

    /// Writes `buffer` as a hexdump with addresses and a printable column.
    pub fn write_buffer_hexdump(&self, level: LogLevel, tag: &'static str, buffer: &[u8]) {
        self.write_buffer(level, tag, buffer, hexdump_lines);
    }

    /// Milliseconds from the port's runtime clock
    pub fn timestamp(&self) -> u32 {
        self.port.timestamp()
    }

    /// Milliseconds from the port's scheduler-independent clock
    pub fn early_timestamp(&self) -> u32 {
        self.port.early_timestamp()
    }

    /// Hit and miss counters of the level cache
    pub fn cache_stats(&self) -> CacheStats {
        self.lock().cache.stats()
    }

    // ========== Internal helpers ==========

    fn lock(&self) -> StateGuard<'_, P> {
        self.port.lock();
        StateGuard { core: self }
    }

    #[cfg(test)]
    pub(crate) fn hold_lock(&self) -> impl Sized + '_ {
        self.lock()
    }

    fn lock_timeout(&self, timeout_ms: u32) -> Option<StateGuard<'_, P>> {
        self.port
            .lock_timeout(timeout_ms)
            .then(|| StateGuard { core: self })
    }

    /// Resolves visibility and snapshots the sinks under one lock acquisition.
    fn visible_sinks(&self, level: LogLevel, tag: &'static str) -> Option<Sinks> {
        let mut state = self.lock_timeout(LOCK_TIMEOUT_MS)?;
        let configured = state.resolve(tag);
        level.is_enabled_for(configured).then(|| state.sinks())
    }

    fn write_buffer(
        &self,
        level: LogLevel,
        tag: &'static str,
        buffer: &[u8],
        lines: fn(&[u8], &mut dyn FnMut(&str)),
    ) {
        if buffer.is_empty() {
            return;
        }
        let Some(sinks) = self.visible_sinks(level, tag) else {
            return;
        };
        lines(buffer, &mut |line| {
            self.emit_line(&sinks, level, tag, None, format_args!("{line}"));
        });
    }

    fn emit_line(
        &self,
        sinks: &Sinks,
        level: LogLevel,
        tag: &'static str,
        call_site: Option<&CallSite>,
        args: fmt::Arguments<'_>,
    ) {
        let line = Line {
            level,
            timestamp: self.timestamp(),
            tag,
            call_site,
            format: sinks.format,
            args,
        };
        sinks.emit(level, tag, format_args!("{line}"));
    }
}

impl<P: LockPort> Default for LogCore<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access to the state, released on drop
struct StateGuard<'a, P: LockPort> {
    core: &'a LogCore<P>,
}

impl<P: LockPort> Deref for StateGuard<'_, P> {
    type Target = LogState;

    fn deref(&self) -> &LogState {
        // SAFETY: the guard holds the port lock.
        unsafe { &*self.core.state.get() }
    }
}

impl<P: LockPort> DerefMut for StateGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut LogState {
        // SAFETY: the guard holds the port lock.
        unsafe { &mut *self.core.state.get() }
    }
}

impl<P: LockPort> Drop for StateGuard<'_, P> {
    fn drop(&mut self) {
        // SAFETY: the guard was created after a successful acquire.
        unsafe { self.core.port.unlock() };
    }
}
