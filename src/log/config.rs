//! Logging configuration

use super::level::LogLevel;
use super::line::LineFormat;

/// Default level for tags without an override, until `set_level("*", ..)`
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Verbose;

/// Highest level whose macros are compiled in.
///
/// Selected with the `max-level-*` features; the most restrictive one wins.
pub const MAX_ENABLED_LEVEL: LogLevel = if cfg!(feature = "max-level-none") {
    LogLevel::None
} else if cfg!(feature = "max-level-error") {
    LogLevel::Error
} else if cfg!(feature = "max-level-warn") {
    LogLevel::Warn
} else if cfg!(feature = "max-level-info") {
    LogLevel::Info
} else if cfg!(feature = "max-level-debug") {
    LogLevel::Debug
} else {
    LogLevel::Verbose
};

/// Number of tags kept in the lookup cache. Must be 2^n - 1, n >= 2.
pub const TAG_CACHE_SIZE: usize = 31;

/// Bytes rendered per line by the buffer formatters
pub const BYTES_PER_LINE: usize = 16;

/// How long a log call waits for the context lock before dropping the line
pub const LOCK_TIMEOUT_MS: u32 = 10;

/// Maximum length of a rendered buffer line
pub const MAX_LOG_LINE_LENGTH: usize = 128;

/// Line decoration used by new contexts
pub const DEFAULT_LINE_FORMAT: LineFormat = if cfg!(feature = "colors") {
    LineFormat::FILENAME
        .union(LineFormat::FUNCTION_NAME)
        .union(LineFormat::COLORS)
} else {
    LineFormat::FILENAME.union(LineFormat::FUNCTION_NAME)
};
