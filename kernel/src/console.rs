//! Console devices the monitor prints to
//!
//! The monitor only needs a byte sink. On x86_64 that is the COM1 UART; the
//! in-memory [`BufferConsole`] captures a session transcript instead.

use alloc::string::String;
use alloc::vec::Vec;

/// Byte sink for monitor output
pub trait Console {
    fn write_bytes(&mut self, bytes: &[u8]);

    fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }
}

/// Console that records everything written to it
#[derive(Debug, Default)]
pub struct BufferConsole {
    bytes: Vec<u8>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Transcript so far, with invalid UTF-8 replaced.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Drain the transcript.
    pub fn take(&mut self) -> String {
        let text = self.contents();
        self.bytes.clear();
        text
    }
}

impl Console for BufferConsole {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

/// Monitor console on a 16550 UART
#[cfg(target_arch = "x86_64")]
pub struct SerialConsole {
    port: crate::serial::SerialPort,
}

#[cfg(target_arch = "x86_64")]
impl SerialConsole {
    /// Console on COM1. The port must already be programmed.
    pub const fn com1() -> Self {
        Self {
            port: crate::serial::SerialPort::com1(),
        }
    }
}

#[cfg(target_arch = "x86_64")]
impl Console for SerialConsole {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.port.write_buffer(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_console_records_and_drains() {
        let mut console = BufferConsole::new();
        console.write_str("K> ");
        console.write_bytes(b"help\n");
        assert_eq!(console.as_bytes(), b"K> help\n");
        assert_eq!(console.take(), "K> help\n");
        assert!(console.as_bytes().is_empty());
    }
}
