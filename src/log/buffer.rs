//! Byte buffer formatters
//!
//! Each formatter walks the buffer in chunks of [`BYTES_PER_LINE`] bytes,
//! copies the chunk into a stack array, renders it into a fixed stack line
//! and hands the line to `emit`. One chunk, one line: a buffer of `k * 16`
//! bytes yields exactly `k` lines and an empty buffer yields none.
//!
//! The copy step keeps the rendering loop on an aligned local array even
//! when the source is a packed or device-backed slice.

use core::fmt::Write;

use super::config::{BYTES_PER_LINE, MAX_LOG_LINE_LENGTH};
use super::line::LineBuffer;

/// Calls `f(offset, chunk, source)` for every chunk of `buffer`.
///
/// `source` is the chunk inside `buffer`, `chunk` its local copy.
fn for_each_chunk(buffer: &[u8], mut f: impl FnMut(usize, &[u8], &[u8])) {
    let mut local = [0u8; BYTES_PER_LINE];
    let mut offset = 0;
    while offset < buffer.len() {
        let len = core::cmp::min(buffer.len() - offset, BYTES_PER_LINE);
        let source = &buffer[offset..offset + len];
        local[..len].copy_from_slice(source);
        f(offset, &local[..len], source);
        offset += len;
    }
}

/// Renders `buffer` as lowercase hex, `"xx "` per byte.
pub(crate) fn hex_lines(buffer: &[u8], emit: &mut dyn FnMut(&str)) {
    let mut line = LineBuffer::<{ 3 * BYTES_PER_LINE }>::new();
    for_each_chunk(buffer, |_, chunk, _| {
        line.clear();
        for byte in chunk {
            let _ = write!(line, "{byte:02x} ");
        }
        emit(line.as_str());
    });
}

/// Renders `buffer` byte by byte as characters, without filtering.
pub(crate) fn char_lines(buffer: &[u8], emit: &mut dyn FnMut(&str)) {
    let mut line = LineBuffer::<{ 2 * BYTES_PER_LINE }>::new();
    for_each_chunk(buffer, |_, chunk, _| {
        line.clear();
        for &byte in chunk {
            let _ = line.write_char(char::from(byte));
        }
        emit(line.as_str());
    });
}

/// Renders `buffer` as a classic hexdump:
///
/// ```text
/// 0x3ffb4280 (00000000)  45 53 50 33 32 20 69 73  20 67 72 65 61 74 2c 20  |ESP32 is great, |
/// ```
pub(crate) fn hexdump_lines(buffer: &[u8], emit: &mut dyn FnMut(&str)) {
    let mut line = LineBuffer::<MAX_LOG_LINE_LENGTH>::new();
    for_each_chunk(buffer, |offset, chunk, source| {
        line.clear();
        let _ = write!(line, "{:p} ({:08X})", source.as_ptr(), offset);
        for column in 0..BYTES_PER_LINE {
            if column % 8 == 0 {
                let _ = line.write_char(' ');
            }
            match chunk.get(column) {
                Some(byte) => {
                    let _ = write!(line, " {byte:02x}");
                }
                None => {
                    let _ = line.write_str("   ");
                }
            }
        }
        let _ = line.write_str("  |");
        for &byte in chunk {
            let _ = line.write_char(if is_printable(byte) {
                char::from(byte)
            } else {
                '.'
            });
        }
        let _ = line.write_char('|');
        emit(line.as_str());
    });
}

/// ASCII printable characters, space included
fn is_printable(byte: u8) -> bool {
    byte == b' ' || byte.is_ascii_graphic()
}
