//! Unified logging subsystem
//!
//! This module provides the kernel's logging framework with:
//! - **Log Levels**: ERROR, WARN, INFO, DEBUG, TRACE
//! - **Per-Module Filtering**: Different log levels for different modules
//! - **Multiple Output Targets**: QEMU debug port, serial, both, or none
//! - **Allocation-Free**: Safe to use from the monitor while the heap is suspect
//! - **Rich Formatting**: Shows module, file, line, function for DEBUG/TRACE
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::{log_debug, log_info, log_warn};
//!
//! log_info!("monitor session started");
//! log_debug!("dispatching '{}' with {} argument(s)", name, argc);
//! log_warn!("unknown monitor command '{}'", name);
//! ```
//!
//! ## Output Format
//!
//! - **INFO/WARN/ERROR**: `[LEVEL module] message`
//! - **DEBUG/TRACE**: `[LEVEL module::function@file:line] message`
//!
//! Default levels and targets are set in `config.rs`. Port output only happens
//! on bare metal; hosted builds (unit tests) drop the formatted bytes.

mod filter;
mod output;

#[macro_use]
pub mod macros;

pub use filter::{get_module_level, set_module_level, ModuleFilter};
pub use output::{get_output_target, set_output_target, OutputTarget};

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// Capacity of the per-call message buffer used by the logging macros
pub const MESSAGE_CAPACITY: usize = 256;

/// Capacity of a fully formatted log entry
const ENTRY_CAPACITY: usize = 512;

/// Log levels (ordered from most to least severe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    /// Critical errors that may cause system failure
    Error = 0,
    /// Warning conditions that should be investigated
    Warn = 1,
    /// Informational messages about normal operation
    Info = 2,
    /// Debugging information for development
    Debug = 3,
    /// Detailed trace information for deep debugging
    Trace = 4,
}

impl LogLevel {
    /// Convert log level to its fixed-width prefix
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN ",
            LogLevel::Info => "INFO ",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    pub(crate) const fn from_u8(val: u8) -> Self {
        match val {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the logging subsystem
///
/// Loads default levels and output targets from config. Idempotent.
pub fn init() {
    if LOGGING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    filter::init_default_filters();
    output::init_default_targets();
}

/// Log a message (internal function used by macros)
///
/// # Arguments
/// * `level` - Log level
/// * `module` - Module path (from module_path!())
/// * `file` - Source file (from file!())
/// * `line` - Line number (from line!())
/// * `function` - Function name (DEBUG/TRACE only)
/// * `message` - Pre-formatted message string
#[doc(hidden)]
pub fn log_impl(
    level: LogLevel,
    module: &str,
    file: &str,
    line: u32,
    function: Option<&str>,
    message: &str,
) {
    if !filter::should_log(module, level) {
        return;
    }

    let target = output::get_output_target(level);
    if target == OutputTarget::None {
        return;
    }

    let mut buf = [0u8; ENTRY_CAPACITY];
    let len = format_log_entry(&mut buf, level, module, file, line, function, message);

    output::write_bytes(target, &buf[..len]);
}

/// Bounded cursor over an entry buffer; silently truncates once full and
/// always keeps one byte free for the trailing newline.
struct EntryCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl EntryCursor<'_> {
    fn push(&mut self, byte: u8) {
        if self.pos + 1 < self.buf.len() {
            self.buf[self.pos] = byte;
            self.pos += 1;
        }
    }

    fn push_str(&mut self, s: &str, limit: usize) {
        for byte in s.bytes().take(limit) {
            self.push(byte);
        }
    }

    fn push_decimal(&mut self, mut value: u32) {
        let mut digits = [0u8; 10];
        let mut count = 0;
        loop {
            digits[count] = b'0' + (value % 10) as u8;
            value /= 10;
            count += 1;
            if value == 0 {
                break;
            }
        }
        for i in (0..count).rev() {
            self.push(digits[i]);
        }
    }

    fn finish(self) -> usize {
        let mut pos = self.pos;
        if pos < self.buf.len() {
            self.buf[pos] = b'\n';
            pos += 1;
        }
        pos
    }
}

/// Format a log entry into a caller-provided buffer
///
/// - INFO/WARN/ERROR: `[LEVEL module] message\n`
/// - DEBUG/TRACE: `[LEVEL module::function@file:line] message\n`
///
/// # Returns
/// Number of bytes written to buffer
fn format_log_entry(
    buf: &mut [u8],
    level: LogLevel,
    module: &str,
    file: &str,
    line: u32,
    function: Option<&str>,
    message: &str,
) -> usize {
    let mut out = EntryCursor { buf, pos: 0 };

    out.push(b'[');
    out.push_str(level.as_str(), 5);
    out.push(b' ');

    // "kmon_kernel::monitor" -> "monitor", "kmon_kernel" -> "kernel"
    let module = match module.find("::") {
        Some(idx) => &module[idx + 2..],
        None if module == "kmon_kernel" => "kernel",
        None => module,
    };
    out.push_str(module, 64);

    if level >= LogLevel::Debug {
        if let Some(func) = function {
            out.push_str("::", 2);
            out.push_str(func, 32);
        }
        out.push(b'@');
        let filename = file.rsplit('/').next().unwrap_or(file);
        out.push_str(filename, 32);
        out.push(b':');
        out.push_decimal(line);
    }

    out.push_str("] ", 2);
    out.push_str(message, usize::MAX);
    out.finish()
}

/// Stack-based string writer (no heap allocation)
///
/// Used by the logging macros to format a message into a buffer that lives
/// on the caller's stack. Output beyond the buffer is dropped.
pub struct StackWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> StackWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Written content; a multi-byte character cut by truncation is dropped.
    pub fn as_str(&self) -> &str {
        let written = &self.buf[..self.pos];
        match core::str::from_utf8(written) {
            Ok(s) => s,
            Err(err) => core::str::from_utf8(&written[..err.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl fmt::Write for StackWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);

        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;

        Ok(())
    }
}
