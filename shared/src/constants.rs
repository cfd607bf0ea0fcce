//! Constants and magic numbers used by the kernel monitor
//!
//! This module centralizes I/O port addresses, memory layout values and the
//! fixed limits of the command line so that the kernel and tests agree on them.

/// I/O Port Addresses
pub mod io_ports {
    /// QEMU debug output port - writes directly to QEMU's debug console
    pub const QEMU_DEBUG: u16 = 0xe9;

    /// COM1 Serial Port I/O addresses
    pub mod com1 {
        /// COM1 data register
        pub const DATA: u16 = 0x3f8;
        /// COM1 interrupt enable register (divisor high byte while DLAB is set)
        pub const INT_ENABLE: u16 = 0x3f9;
        /// COM1 FIFO control register
        pub const FIFO_CTRL: u16 = 0x3fa;
        /// COM1 line control register
        pub const LINE_CTRL: u16 = 0x3fb;
        /// COM1 modem control register
        pub const MODEM_CTRL: u16 = 0x3fc;
        /// COM1 line status register
        pub const LINE_STATUS: u16 = 0x3fd;
    }
}

/// Memory layout constants
pub mod memory {
    /// Size of a base page (4KB)
    pub const PAGE_SIZE: u64 = 4096;

    /// Virtual address the kernel image is linked at
    pub const KERNEL_VIRTUAL_BASE: u64 = 0xFFFF_FFFF_8000_0000;
}

/// Kernel monitor limits
pub mod monitor {
    /// Maximum length of one command line (one VGA text line)
    pub const CMDBUF_SIZE: usize = 80;

    /// Size of the argument vector; one slot stays reserved, so a line may
    /// carry at most `MAX_ARGS - 1` tokens
    pub const MAX_ARGS: usize = 16;

    /// Argument words printed for every backtrace frame
    pub const BACKTRACE_ARGS: usize = 5;
}

/// Hardware Constants
pub mod hardware {
    /// COM1 baud rate divisor for 115200 baud
    pub const COM1_BAUD_DIVISOR: u16 = 1;
}
