//! # Kernel Monitor - Interactive Debugging Console
//!
//! A small line-oriented shell for inspecting the running kernel. It reads a
//! line, splits it into arguments and dispatches to a fixed command table:
//!
//! - `help`: List commands
//! - `kerninfo`: Kernel image symbols and memory footprint
//! - `backtrace`: Walk the frame-pointer chain, with symbol resolution
//! - `showmappings`: Virtual-to-physical mappings and `P/U/W` permissions
//!
//! The monitor is an inspector only. Nothing it does writes kernel memory or
//! page tables.
//!
//! ## Usage
//!
//! On bare metal the monitor talks to COM1:
//!
//! - QEMU: `-serial stdio` or `-serial unix:/tmp/qemu.sock,server,nowait`
//! - Physical hardware: `minicom -D /dev/ttyS0 -b 115200`
//!
//! ## Module Organization
//!
//! - `commands/`: The command table and one file per command category
//! - `parsing`: Tokenizer and address parsing
//! - `readline`: Line sources and the serial line editor
//! - `error`: User-facing input errors
//!
//! The shell never touches hardware directly: output goes to a [`Console`],
//! input comes from a [`LineSource`], and kernel state is reached through
//! the traits in [`KernelView`]. `enter` wires up the live implementations.

pub mod commands;
pub mod error;
pub mod parsing;
pub mod readline;

pub use commands::{Command, COMMANDS};
pub use error::MonitorError;
pub use readline::{Edit, LineEditor, LineSource};

use crate::config;
use crate::console::Console;
use crate::debuginfo::SymbolResolver;
use crate::layout::KernelLayout;
use crate::memory::{MemoryReader, PageTableView};
use core::ops::ControlFlow;

/// Kernel state the commands inspect
#[derive(Clone, Copy)]
pub struct KernelView<'a> {
    pub symbols: &'a dyn SymbolResolver,
    pub page_table: &'a dyn PageTableView,
    pub memory: &'a dyn MemoryReader,
    pub layout: KernelLayout,
}

/// Where `backtrace` starts walking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOrigin {
    /// The frame of the running `backtrace` command
    Current,
    /// A saved frame pointer, e.g. from a trap frame
    At(usize),
}

/// Kernel monitor state
///
/// One value per session. Commands are methods on this type, implemented in
/// `commands/`.
pub struct Monitor<'a> {
    console: &'a mut dyn Console,
    view: KernelView<'a>,
    frame_origin: FrameOrigin,
    frame_limit: Option<usize>,
}

impl<'a> Monitor<'a> {
    pub fn new(console: &'a mut dyn Console, view: KernelView<'a>) -> Self {
        Self {
            console,
            view,
            frame_origin: FrameOrigin::Current,
            frame_limit: config::BACKTRACE_FRAME_LIMIT,
        }
    }

    pub fn with_frame_origin(mut self, origin: FrameOrigin) -> Self {
        self.frame_origin = origin;
        self
    }

    /// Cap the number of frames `backtrace` prints (`None` for no cap).
    pub fn with_frame_limit(mut self, limit: Option<usize>) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Print the session banner.
    pub fn greet(&mut self) {
        log_info!("monitor session started");
        self.writeln("Welcome to the kernel monitor!");
        self.writeln("Type 'help' for a list of commands.");
    }

    /// Read and run one line.
    ///
    /// Breaks with the handler's status once a command returns a negative
    /// value. A null read is skipped.
    pub fn poll(&mut self, input: &mut dyn LineSource) -> ControlFlow<i32> {
        let Some(line) = input.read_line(config::MONITOR_PROMPT, &mut *self.console) else {
            return ControlFlow::Continue(());
        };
        match self.run_command(&line) {
            status if status < 0 => ControlFlow::Break(status),
            _ => ControlFlow::Continue(()),
        }
    }

    /// Greet, then run lines until a command asks to leave.
    pub fn run(&mut self, input: &mut dyn LineSource) -> i32 {
        self.greet();
        loop {
            if let ControlFlow::Break(status) = self.poll(input) {
                log_info!("monitor session ended ({})", status);
                return status;
            }
        }
    }

    /// Tokenize `line` and run the command it names.
    ///
    /// Input errors are printed and reported as status 0.
    pub fn run_command(&mut self, line: &str) -> i32 {
        let args = match parsing::tokenize(line) {
            Ok(args) => args,
            Err(err) => {
                log_warn!("line rejected: {}", err);
                self.writeln(&alloc::format!("{}", err));
                return 0;
            }
        };
        let Some(&name) = args.first() else {
            return 0;
        };

        match Command::lookup(name) {
            Some(command) => {
                log_debug!("dispatching '{}' with {} argument(s)", name, args.len() - 1);
                self.dispatch(command, &args)
            }
            None => {
                let err = MonitorError::UnknownCommand(name.into());
                log_warn!("{}", err);
                self.writeln(&alloc::format!("{}", err));
                0
            }
        }
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.console.write_str(s);
    }

    pub(crate) fn writeln(&mut self, s: &str) {
        self.write(s);
        self.write("\n");
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod live {
    use super::*;
    use crate::console::SerialConsole;
    use crate::memory::{CheckedMemory, KernelPageTable};
    use super::readline::SerialLineSource;
    use spin::Mutex;
    use x86_64::VirtAddr;

    /// Symbols published by the boot code
    static SYMBOLS: Mutex<Option<&'static (dyn SymbolResolver + Sync)>> = Mutex::new(None);

    /// Publish the kernel's symbol table.
    ///
    /// Until this is called `backtrace` prints frames without source lines.
    pub fn register_symbols(symbols: &'static (dyn SymbolResolver + Sync)) {
        *SYMBOLS.lock() = Some(symbols);
    }

    /// Run the monitor on COM1 against the live kernel, forever.
    ///
    /// # Safety
    /// All physical memory must be mapped at `phys_offset`, and COM1 must not
    /// be in use by anything else.
    pub unsafe fn enter(phys_offset: u64) -> ! {
        if !config::ENABLE_KERNEL_MONITOR {
            loop {
                x86_64::instructions::hlt();
            }
        }

        crate::logging::init();
        let port = crate::serial::SerialPort::com1();
        port.init();

        let symbols: &dyn SymbolResolver = match *SYMBOLS.lock() {
            Some(symbols) => symbols,
            None => {
                log_warn!("no symbol table registered; backtraces are unannotated");
                &crate::debuginfo::SymbolTable::EMPTY
            }
        };
        let page_table = KernelPageTable::active(VirtAddr::new(phys_offset));
        let memory = CheckedMemory::new(&page_table);
        let mut console = SerialConsole::com1();
        let mut input = SerialLineSource::com1();

        let view = KernelView {
            symbols,
            page_table: &page_table,
            memory: &memory,
            layout: KernelLayout::from_linker_symbols(),
        };
        let mut monitor = Monitor::new(&mut console, view);
        monitor.run(&mut input);

        // A command asked to leave; nothing to return to.
        loop {
            x86_64::instructions::hlt();
        }
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use live::{enter, register_symbols};
