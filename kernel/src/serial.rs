//! COM1 UART access
//!
//! Polled 16550 driver used by the monitor console, the monitor's line input
//! and the serial log target. There is no interrupt path: the monitor owns the
//! CPU while it runs and simply spins on the line status register.

use kmon_shared::constants::hardware::COM1_BAUD_DIVISOR;
use kmon_shared::constants::io_ports::com1;
use x86_64::instructions::port::Port;

// Register offsets from the UART base, taken from the COM1 map
const INT_ENABLE: u16 = com1::INT_ENABLE - com1::DATA;
const FIFO_CTRL: u16 = com1::FIFO_CTRL - com1::DATA;
const LINE_CTRL: u16 = com1::LINE_CTRL - com1::DATA;
const MODEM_CTRL: u16 = com1::MODEM_CTRL - com1::DATA;
const LINE_STATUS: u16 = com1::LINE_STATUS - com1::DATA;

/// Line status: received data ready
const LSR_DATA_READY: u8 = 0x01;
/// Line status: transmit holding register empty
const LSR_THR_EMPTY: u8 = 0x20;

#[derive(Debug, Clone, Copy)]
pub struct SerialPort {
    base: u16,
}

impl SerialPort {
    pub const fn new(base: u16) -> Self {
        Self { base }
    }

    pub const fn com1() -> Self {
        Self::new(com1::DATA)
    }

    /// Program the UART for 115200 8N1 with FIFOs enabled.
    ///
    /// # Safety
    /// Performs raw port I/O on `base..=base + LINE_STATUS`; the caller must
    /// own that UART.
    pub unsafe fn init(&self) {
        let mut data = Port::<u8>::new(self.base);
        let mut int_enable = Port::<u8>::new(self.base + INT_ENABLE);
        let mut fifo_ctrl = Port::<u8>::new(self.base + FIFO_CTRL);
        let mut line_ctrl = Port::<u8>::new(self.base + LINE_CTRL);
        let mut modem_ctrl = Port::<u8>::new(self.base + MODEM_CTRL);

        int_enable.write(0x00);
        line_ctrl.write(0x80);
        data.write((COM1_BAUD_DIVISOR & 0xFF) as u8);
        int_enable.write((COM1_BAUD_DIVISOR >> 8) as u8);
        line_ctrl.write(0x03);
        fifo_ctrl.write(0xC7);
        modem_ctrl.write(0x0B);
    }

    fn line_status(&self) -> u8 {
        let mut port = Port::<u8>::new(self.base + LINE_STATUS);
        unsafe { port.read() }
    }

    fn write_byte(&self, byte: u8) {
        while self.line_status() & LSR_THR_EMPTY == 0 {
            core::hint::spin_loop();
        }
        let mut port = Port::<u8>::new(self.base);
        unsafe { port.write(byte) };
    }

    /// Non-blocking read of one received byte.
    pub fn try_read_byte(&self) -> Option<u8> {
        if self.line_status() & LSR_DATA_READY == 0 {
            return None;
        }
        let mut port = Port::<u8>::new(self.base);
        Some(unsafe { port.read() })
    }

    /// Write a buffer, expanding `\n` to `\r\n` for terminals.
    pub fn write_buffer(&self, buf: &[u8]) {
        for &b in buf {
            if b == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(b);
        }
    }
}
