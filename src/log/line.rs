//! Line decoration
//!
//! A visible message is written as
//!
//! ```text
//! <color><L> (<timestamp>) <tag>: <file>:<line> [<function>] <message><reset>\n
//! ```
//!
//! where every segment except the letter, timestamp, tag and message can be
//! switched off through [`LineFormat`]. A switched-off segment takes its
//! trailing space with it, so a bare line reads `<L> (<ts>) <tag>: <message>`
//! with a single space after the colon, not the doubled space a fixed
//! printf template leaves behind. Nothing here allocates: the line is a
//! `Display` value handed to the output function as `fmt::Arguments`.

use core::cmp::min;
use core::fmt::{self, Write};

use super::level::LogLevel;

bitflags::bitflags! {
    /// Optional decorations of a rendered line
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LineFormat: u8 {
        /// Wrap the line in the level's ANSI color
        const COLORS = 1 << 0;
        /// Print `file:line` of the call site
        const FILENAME = 1 << 1;
        /// Print `[function]` of the call site
        const FUNCTION_NAME = 1 << 2;
        /// Print the timestamp as `HH:MM:SS.sss` instead of milliseconds
        const SYSTEM_TIME = 1 << 3;
    }
}

/// Source location of a log macro invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Source file, as given by `file!()`
    pub file: &'static str,
    /// Line number, as given by `line!()`
    pub line: u32,
    /// Name of the enclosing function
    pub function: &'static str,
}

impl CallSite {
    /// Creates a call site record.
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

/// Trims the path produced by `__function_name!` to the function itself.
#[doc(hidden)]
pub fn short_function_name(path: &'static str) -> &'static str {
    let path = path.strip_suffix("::__f").unwrap_or(path);
    let mut segments = path.rsplit("::").filter(|s| *s != "{{closure}}");
    segments.next().unwrap_or(path)
}

/// A fully decorated log line
pub(crate) struct Line<'a> {
    pub(crate) level: LogLevel,
    pub(crate) timestamp: u32,
    pub(crate) tag: &'a str,
    pub(crate) call_site: Option<&'a CallSite>,
    pub(crate) format: LineFormat,
    pub(crate) args: fmt::Arguments<'a>,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colors = self.format.contains(LineFormat::COLORS);
        if colors {
            f.write_str(self.level.color_code())?;
        }

        f.write_str(self.level.letter())?;
        if self.format.contains(LineFormat::SYSTEM_TIME) {
            write!(f, " ({}) ", SystemTime(self.timestamp))?;
        } else {
            write!(f, " ({}) ", self.timestamp)?;
        }
        write!(f, "{}: ", self.tag)?;

        if let Some(site) = self.call_site {
            if self.format.contains(LineFormat::FILENAME) {
                write!(f, "{}:{} ", site.file, site.line)?;
            }
            if self.format.contains(LineFormat::FUNCTION_NAME) {
                write!(f, "[{}] ", site.function)?;
            }
        }

        f.write_fmt(self.args)?;
        if colors {
            f.write_str(self.level.reset_color_code())?;
        }
        f.write_char('\n')
    }
}

/// Milliseconds rendered as wall-clock time of day
struct SystemTime(u32);

impl fmt::Display for SystemTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = (self.0 / 1000) % 86_400;
        let nanos = (self.0 % 1000) * 1_000_000;
        match chrono::NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos) {
            Some(time) => write!(f, "{}", time.format("%H:%M:%S%.3f")),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Fixed-capacity text buffer on the stack.
///
/// Writes past the capacity are dropped at a character boundary.
pub(crate) struct LineBuffer<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> LineBuffer<N> {
    pub(crate) const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}

impl<const N: usize> Write for LineBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = N - self.len;
        let mut to_copy = min(s.len(), remaining);
        while !s.is_char_boundary(to_copy) {
            to_copy -= 1;
        }
        self.bytes[self.len..self.len + to_copy].copy_from_slice(&s.as_bytes()[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}

impl<const N: usize> fmt::Display for LineBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    fn render(format: LineFormat, site: Option<&CallSite>) -> String {
        Line {
            level: LogLevel::Warn,
            timestamp: 1234,
            tag: "NET",
            call_site: site,
            format,
            args: format_args!("link {}", "down"),
        }
        .to_string()
    }

    const SITE: CallSite = CallSite::new("src/net.rs", 42, "poll");

    #[test]
    fn full_line_without_colors() {
        let line = render(LineFormat::FILENAME | LineFormat::FUNCTION_NAME, Some(&SITE));
        assert_eq!(line, "W (1234) NET: src/net.rs:42 [poll] link down\n");
    }

    #[test]
    fn segments_are_independent() {
        assert_eq!(
            render(LineFormat::FUNCTION_NAME, Some(&SITE)),
            "W (1234) NET: [poll] link down\n"
        );
        assert_eq!(
            render(LineFormat::FILENAME, Some(&SITE)),
            "W (1234) NET: src/net.rs:42 link down\n"
        );
        assert_eq!(
            render(LineFormat::empty(), Some(&SITE)),
            "W (1234) NET: link down\n"
        );
        assert_eq!(
            render(LineFormat::all() - LineFormat::COLORS - LineFormat::SYSTEM_TIME, None),
            "W (1234) NET: link down\n"
        );
    }

    #[test]
    fn switched_off_segments_leave_no_double_space() {
        for format in [
            LineFormat::empty(),
            LineFormat::FILENAME,
            LineFormat::FUNCTION_NAME,
        ] {
            let line = render(format, Some(&SITE));
            assert!(!line.contains("  "), "{format:?}: {line:?}");
            assert!(line.starts_with("W (1234) NET: "));
        }
        assert_eq!(render(LineFormat::empty(), None), "W (1234) NET: link down\n");
    }

    #[test]
    fn colors_wrap_line() {
        let line = render(LineFormat::COLORS, None);
        assert_eq!(line, "\x1b[0;33mW (1234) NET: link down\x1b[0m\n");
    }

    #[test]
    fn system_time() {
        let line = Line {
            level: LogLevel::Info,
            timestamp: 3_723_004,
            tag: "T",
            call_site: None,
            format: LineFormat::SYSTEM_TIME,
            args: format_args!("x"),
        }
        .to_string();
        assert_eq!(line, "I (01:02:03.004) T: x\n");
    }

    #[test]
    fn function_name_is_trimmed() {
        assert_eq!(short_function_name("app::net::poll::__f"), "poll");
        assert_eq!(short_function_name("app::main::{{closure}}::__f"), "main");
        assert_eq!(short_function_name("main"), "main");
    }

    #[test]
    fn line_buffer_truncates_on_char_boundary() {
        let mut buffer = LineBuffer::<5>::new();
        let _ = write!(buffer, "ab{}", "ñññ");
        assert_eq!(buffer.as_str(), "abñ");

        buffer.clear();
        let _ = buffer.write_str("hello world");
        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.to_string(), "hello");
    }
}
