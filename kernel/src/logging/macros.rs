//! Logging macros
//!
//! - `log_error!` - Critical errors that may cause system failure
//! - `log_warn!` - Warning conditions that should be investigated
//! - `log_info!` - Informational messages about normal operation
//! - `log_debug!` - Debugging information for development
//! - `log_trace!` - Detailed trace information for deep debugging
//!
//! All macros capture the module path, file and line automatically; DEBUG
//! and TRACE additionally capture the calling function's name. Messages are
//! formatted into a buffer on the caller's stack, never the heap.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $function:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MESSAGE_CAPACITY];
        let mut writer = $crate::logging::StackWriter::new(&mut buf);
        let _ = core::fmt::Write::write_fmt(&mut writer, format_args!($($arg)*));
        $crate::logging::log_impl(
            $level,
            module_path!(),
            file!(),
            line!(),
            $function,
            writer.as_str(),
        )
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        type_name_of(f).rsplit("::").nth(1)
    }};
}

/// Log an ERROR level message
///
/// ```text
/// [ERROR module] message
/// ```
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log_at!($crate::logging::LogLevel::Error, None, $($arg)*)
    };
}

/// Log a WARN level message
///
/// ```text
/// [WARN module] message
/// ```
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log_at!($crate::logging::LogLevel::Warn, None, $($arg)*)
    };
}

/// Log an INFO level message
///
/// ```text
/// [INFO module] message
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log_at!($crate::logging::LogLevel::Info, None, $($arg)*)
    };
}

/// Log a DEBUG level message (includes function name)
///
/// ```text
/// [DEBUG module::function@file:line] message
/// ```
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__log_at!(
            $crate::logging::LogLevel::Debug,
            $crate::__function_name!(),
            $($arg)*
        )
    };
}

/// Log a TRACE level message (includes function name)
///
/// ```text
/// [TRACE module::function@file:line] message
/// ```
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::__log_at!(
            $crate::logging::LogLevel::Trace,
            $crate::__function_name!(),
            $($arg)*
        )
    };
}
