//! Log output target management
//!
//! Log entries can go to:
//! - QEMU debug port (0xE9) - for development/debugging
//! - Serial port (COM1) - shared with the monitor console
//! - Both targets
//! - None - to disable output for a specific level
//!
//! Port I/O is only performed when running on bare metal. Hosted builds (the
//! unit and integration tests) format entries but discard the bytes.

use super::LogLevel;
use core::sync::atomic::{AtomicU8, Ordering};

/// Output target for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputTarget {
    /// No output (discard the message)
    None = 0,
    /// QEMU debug port (0xE9) only
    QemuDebug = 1,
    /// Serial port (COM1) only
    Serial = 2,
    /// Both QEMU debug and serial
    Both = 3,
}

impl OutputTarget {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputTarget::None => "none",
            OutputTarget::QemuDebug => "qemu",
            OutputTarget::Serial => "serial",
            OutputTarget::Both => "both",
        }
    }

    const fn from_u8(val: u8) -> Self {
        match val {
            1 => OutputTarget::QemuDebug,
            2 => OutputTarget::Serial,
            3 => OutputTarget::Both,
            _ => OutputTarget::None,
        }
    }
}

/// Output target for each log level, indexed by `LogLevel as usize`
static OUTPUT_TARGETS: [AtomicU8; 5] = [
    AtomicU8::new(OutputTarget::Both as u8),
    AtomicU8::new(OutputTarget::Both as u8),
    AtomicU8::new(OutputTarget::QemuDebug as u8),
    AtomicU8::new(OutputTarget::QemuDebug as u8),
    AtomicU8::new(OutputTarget::QemuDebug as u8),
];

pub(super) fn init_default_targets() {
    use crate::config;

    set_output_target(LogLevel::Error, config::LOG_OUTPUT_ERROR);
    set_output_target(LogLevel::Warn, config::LOG_OUTPUT_WARN);
    set_output_target(LogLevel::Info, config::LOG_OUTPUT_INFO);
    set_output_target(LogLevel::Debug, config::LOG_OUTPUT_DEBUG);
    set_output_target(LogLevel::Trace, config::LOG_OUTPUT_TRACE);
}

/// Get output target for a log level
pub fn get_output_target(level: LogLevel) -> OutputTarget {
    OUTPUT_TARGETS
        .get(level as usize)
        .map(|slot| OutputTarget::from_u8(slot.load(Ordering::Relaxed)))
        .unwrap_or(OutputTarget::None)
}

/// Set output target for a log level
pub fn set_output_target(level: LogLevel, target: OutputTarget) {
    if let Some(slot) = OUTPUT_TARGETS.get(level as usize) {
        slot.store(target as u8, Ordering::Relaxed);
    }
}

/// Write bytes to the specified output target(s)
pub fn write_bytes(target: OutputTarget, bytes: &[u8]) {
    match target {
        OutputTarget::None => {}
        OutputTarget::QemuDebug => write_qemu_debug(bytes),
        OutputTarget::Serial => write_serial(bytes),
        OutputTarget::Both => {
            write_qemu_debug(bytes);
            write_serial(bytes);
        }
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
fn write_qemu_debug(bytes: &[u8]) {
    use x86_64::instructions::port::Port;

    let mut port: Port<u8> = Port::new(kmon_shared::constants::io_ports::QEMU_DEBUG);
    for &byte in bytes {
        unsafe { port.write(byte) };
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
fn write_serial(bytes: &[u8]) {
    crate::serial::SerialPort::com1().write_buffer(bytes);
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
fn write_qemu_debug(_bytes: &[u8]) {}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
fn write_serial(_bytes: &[u8]) {}
