//! Logging macros
//!
//! One macro per level, taking a tag and a format string:
//!
//! ```ignore
//! static TAG: &str = "NET";
//!
//! loge!(TAG, "socket {} closed: {}", fd, err);
//! logi!(TAG, "connected to {}", addr);
//! logd_buffer_hexdump!(TAG, &frame, "rx frame, {} bytes", frame.len());
//! ```
//!
//! The buffer forms accept an optional message, written as a normal line
//! before the dump.
//!
//! # Compile-time pruning
//!
//! The `max-level-*` features set the most verbose level that is compiled
//! in. Macros above it expand to `()`: no call, no format string, and their
//! argument expressions are never evaluated. Levels at or below it still go
//! through the runtime per-tag filter.

/// Name of the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::log::short_function_name(type_name_of(__f))
    }};
}

/// Writes one decorated line with the call site attached
#[doc(hidden)]
#[macro_export]
macro_rules! __log_write {
    ($level:expr, $tag:expr, $($arg:tt)+) => {{
        let site = $crate::log::CallSite::new(
            ::core::file!(),
            ::core::line!(),
            $crate::__function_name!(),
        );
        $crate::log::write($level, $tag, ::core::option::Option::Some(&site), ::core::format_args!($($arg)+));
    }};
}

/// Writes an optional message line, then the buffer
#[doc(hidden)]
#[macro_export]
macro_rules! __log_buffer {
    ($level:expr, $writer:ident, $tag:expr, $buffer:expr $(,)?) => {{
        let buffer: &[u8] = ::core::convert::AsRef::<[u8]>::as_ref(&$buffer);
        $crate::log::$writer($level, $tag, buffer);
    }};
    ($level:expr, $writer:ident, $tag:expr, $buffer:expr, $($arg:tt)+) => {{
        let tag: &'static str = $tag;
        $crate::__log_write!($level, tag, $($arg)+);
        $crate::__log_buffer!($level, $writer, tag, $buffer)
    }};
}

// ========== Build-time level gates ==========

#[doc(hidden)]
#[macro_export]
#[cfg(not(feature = "max-level-none"))]
macro_rules! __if_error_enabled {
    ($($body:tt)*) => {{ $($body)* }};
}

#[doc(hidden)]
#[macro_export]
#[cfg(feature = "max-level-none")]
macro_rules! __if_error_enabled {
    ($($body:tt)*) => {
        ()
    };
}

#[doc(hidden)]
#[macro_export]
#[cfg(not(any(feature = "max-level-none", feature = "max-level-error")))]
macro_rules! __if_warn_enabled {
    ($($body:tt)*) => {{ $($body)* }};
}

#[doc(hidden)]
#[macro_export]
#[cfg(any(feature = "max-level-none", feature = "max-level-error"))]
macro_rules! __if_warn_enabled {
    ($($body:tt)*) => {
        ()
    };
}

#[doc(hidden)]
#[macro_export]
#[cfg(not(any(
    feature = "max-level-none",
    feature = "max-level-error",
    feature = "max-level-warn"
)))]
macro_rules! __if_info_enabled {
    ($($body:tt)*) => {{ $($body)* }};
}

#[doc(hidden)]
#[macro_export]
#[cfg(any(
    feature = "max-level-none",
    feature = "max-level-error",
    feature = "max-level-warn"
))]
macro_rules! __if_info_enabled {
    ($($body:tt)*) => {
        ()
    };
}

#[doc(hidden)]
#[macro_export]
#[cfg(not(any(
    feature = "max-level-none",
    feature = "max-level-error",
    feature = "max-level-warn",
    feature = "max-level-info"
)))]
macro_rules! __if_debug_enabled {
    ($($body:tt)*) => {{ $($body)* }};
}

#[doc(hidden)]
#[macro_export]
#[cfg(any(
    feature = "max-level-none",
    feature = "max-level-error",
    feature = "max-level-warn",
    feature = "max-level-info"
))]
macro_rules! __if_debug_enabled {
    ($($body:tt)*) => {
        ()
    };
}

#[doc(hidden)]
#[macro_export]
#[cfg(not(any(
    feature = "max-level-none",
    feature = "max-level-error",
    feature = "max-level-warn",
    feature = "max-level-info",
    feature = "max-level-debug"
)))]
macro_rules! __if_verbose_enabled {
    ($($body:tt)*) => {{ $($body)* }};
}

#[doc(hidden)]
#[macro_export]
#[cfg(any(
    feature = "max-level-none",
    feature = "max-level-error",
    feature = "max-level-warn",
    feature = "max-level-info",
    feature = "max-level-debug"
))]
macro_rules! __if_verbose_enabled {
    ($($body:tt)*) => {
        ()
    };
}

// ========== Message macros ==========

/// Logs a message at the ERROR level
///
/// # Examples
///
/// ```ignore
/// loge!(TAG, "Failed to allocate {} bytes", size);
/// ```
#[macro_export]
macro_rules! loge {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__if_error_enabled! {
            $crate::__log_write!($crate::log::LogLevel::Error, $tag, $($arg)+)
        }
    };
}

/// Logs a message at the WARN level
///
/// # Examples
///
/// ```ignore
/// logw!(TAG, "Retrying in {} ms", backoff);
/// ```
#[macro_export]
macro_rules! logw {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__if_warn_enabled! {
            $crate::__log_write!($crate::log::LogLevel::Warn, $tag, $($arg)+)
        }
    };
}

/// Logs a message at the INFO level
#[macro_export]
macro_rules! logi {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__if_info_enabled! {
            $crate::__log_write!($crate::log::LogLevel::Info, $tag, $($arg)+)
        }
    };
}

/// Logs a message at the DEBUG level
#[macro_export]
macro_rules! logd {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__if_debug_enabled! {
            $crate::__log_write!($crate::log::LogLevel::Debug, $tag, $($arg)+)
        }
    };
}

/// Logs a message at the VERBOSE level
#[macro_export]
macro_rules! logv {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__if_verbose_enabled! {
            $crate::__log_write!($crate::log::LogLevel::Verbose, $tag, $($arg)+)
        }
    };
}

// ========== Buffer macros ==========

/// Logs a buffer as hex bytes at the ERROR level
#[macro_export]
macro_rules! loge_buffer_hex {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_error_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Error, write_buffer_hex, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as characters at the ERROR level
#[macro_export]
macro_rules! loge_buffer_char {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_error_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Error, write_buffer_char, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as a hexdump at the ERROR level
#[macro_export]
macro_rules! loge_buffer_hexdump {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_error_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Error, write_buffer_hexdump, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as hex bytes at the WARN level
#[macro_export]
macro_rules! logw_buffer_hex {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_warn_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Warn, write_buffer_hex, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as characters at the WARN level
#[macro_export]
macro_rules! logw_buffer_char {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_warn_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Warn, write_buffer_char, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as a hexdump at the WARN level
#[macro_export]
macro_rules! logw_buffer_hexdump {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_warn_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Warn, write_buffer_hexdump, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as hex bytes at the INFO level
///
/// # Examples
///
/// ```ignore
/// logi_buffer_hex!(TAG, &mac);
/// logi_buffer_hex!(TAG, &mac, "station {}", index);
/// ```
#[macro_export]
macro_rules! logi_buffer_hex {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_info_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Info, write_buffer_hex, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as characters at the INFO level
#[macro_export]
macro_rules! logi_buffer_char {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_info_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Info, write_buffer_char, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as a hexdump at the INFO level
#[macro_export]
macro_rules! logi_buffer_hexdump {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_info_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Info, write_buffer_hexdump, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as hex bytes at the DEBUG level
#[macro_export]
macro_rules! logd_buffer_hex {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_debug_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Debug, write_buffer_hex, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as characters at the DEBUG level
#[macro_export]
macro_rules! logd_buffer_char {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_debug_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Debug, write_buffer_char, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as a hexdump at the DEBUG level
#[macro_export]
macro_rules! logd_buffer_hexdump {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_debug_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Debug, write_buffer_hexdump, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as hex bytes at the VERBOSE level
#[macro_export]
macro_rules! logv_buffer_hex {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_verbose_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Verbose, write_buffer_hex, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as characters at the VERBOSE level
#[macro_export]
macro_rules! logv_buffer_char {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_verbose_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Verbose, write_buffer_char, $tag, $($rest)+)
        }
    };
}

/// Logs a buffer as a hexdump at the VERBOSE level
#[macro_export]
macro_rules! logv_buffer_hexdump {
    ($tag:expr, $($rest:tt)+) => {
        $crate::__if_verbose_enabled! {
            $crate::__log_buffer!($crate::log::LogLevel::Verbose, write_buffer_hexdump, $tag, $($rest)+)
        }
    };
}
