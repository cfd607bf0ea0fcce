//! kmon kernel library
//!
//! The kernel monitor and the pieces of kernel state it inspects. The boot
//! code links this library, publishes its symbol table with
//! `monitor::register_symbols` and drops into `monitor::enter`. Host
//! builds (unit and integration tests) get the same monitor, driven through
//! the collaborator traits instead of real hardware.
//!
//! Hardware access is confined to `target_arch = "x86_64"`, and port I/O or
//! linker symbols additionally to `target_os = "none"`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Logging macros must be in scope before the modules that use them
#[macro_use]
pub mod logging;

pub mod backtrace;
pub mod console;
pub mod debuginfo;
pub mod layout;
pub mod memory;
pub mod monitor;
#[cfg(target_arch = "x86_64")]
pub mod serial;

// Config must come after logging since it references logging types
pub mod config;

pub use backtrace::{Frame, StackWalker};
pub use console::{BufferConsole, Console};
pub use debuginfo::{DebugInfo, SymbolResolver, SymbolTable};
pub use layout::KernelLayout;
pub use monitor::{FrameOrigin, KernelView, Monitor};
