//! Log severity levels

/// Severity of a log message, or the verbosity configured for a tag.
///
/// Lower values are more important. A message is shown when its level is
/// less than or equal to the level configured for its tag.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// No output
    None = 0,
    /// Critical errors, the module cannot recover on its own
    Error = 1,
    /// Error conditions from which recovery measures have been taken
    Warn = 2,
    /// Messages describing the normal flow of events
    Info = 3,
    /// Extra information not needed for normal use
    Debug = 4,
    /// Bigger chunks of debugging information, or frequent messages
    Verbose = 5,
}

impl LogLevel {
    /// All levels, most important first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::None,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Verbose,
    ];

    /// Converts a raw level, saturating anything above `Verbose`.
    pub const fn from_u8(level: u8) -> Self {
        match level {
            0 => LogLevel::None,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Verbose,
        }
    }

    /// Single letter printed at the start of every line.
    pub const fn letter(&self) -> &'static str {
        match self {
            LogLevel::None => "N",
            LogLevel::Error => "E",
            LogLevel::Warn => "W",
            LogLevel::Info => "I",
            LogLevel::Debug => "D",
            LogLevel::Verbose => "V",
        }
    }

    /// ANSI color prefix, empty for levels printed in the terminal default.
    pub const fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[0;31m",
            LogLevel::Warn => "\x1b[0;33m",
            LogLevel::Info => "\x1b[0;32m",
            LogLevel::None | LogLevel::Debug | LogLevel::Verbose => "",
        }
    }

    /// ANSI reset sequence.
    pub const fn reset_color_code(&self) -> &'static str {
        "\x1b[0m"
    }

    /// Whether a message at `self` passes a tag configured at `configured`.
    #[inline(always)]
    pub const fn is_enabled_for(self, configured: LogLevel) -> bool {
        self as u8 <= configured as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_priority() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Debug < LogLevel::Verbose);
        assert!(LogLevel::Info.is_enabled_for(LogLevel::Info));
        assert!(!LogLevel::Debug.is_enabled_for(LogLevel::Info));
        assert!(LogLevel::None.is_enabled_for(LogLevel::None));
    }

    #[test]
    fn from_u8_saturates() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_u8(level as u8), level);
        }
        assert_eq!(LogLevel::from_u8(200), LogLevel::Verbose);
    }
}
