//! Monitor command table
//!
//! The command set is closed: [`Command`] names every command and
//! [`COMMANDS`] fixes the order `help` lists them in. Each handler is a
//! method on [`Monitor`], grouped by category:
//! - `system`: `help`, `kerninfo`
//! - `stack`: `backtrace`
//! - `memory`: `showmappings`

pub mod memory;
pub mod stack;
pub mod system;

use crate::monitor::Monitor;

/// Commands the monitor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    KernInfo,
    Backtrace,
    ShowMappings,
}

/// Every command, in the order `help` lists them
pub const COMMANDS: [Command; 4] = [
    Command::Help,
    Command::KernInfo,
    Command::Backtrace,
    Command::ShowMappings,
];

impl Command {
    /// Name typed at the prompt
    pub const fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::KernInfo => "kerninfo",
            Command::Backtrace => "backtrace",
            Command::ShowMappings => "showmappings",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Command::Help => "Display this list of commands",
            Command::KernInfo => "Display information about the kernel",
            Command::Backtrace => "Display backtrace",
            Command::ShowMappings => {
                "Display mappings between physical address and virtual address"
            }
        }
    }

    /// Exact, case-sensitive match on the command name.
    pub fn lookup(name: &str) -> Option<Command> {
        COMMANDS.into_iter().find(|cmd| cmd.name() == name)
    }
}

impl Monitor<'_> {
    /// Run `command` with the full token list (token 0 is its name).
    ///
    /// A negative return value ends the shell loop.
    pub(in crate::monitor) fn dispatch(&mut self, command: Command, args: &[&str]) -> i32 {
        match command {
            Command::Help => self.cmd_help(args),
            Command::KernInfo => self.cmd_kerninfo(args),
            Command::Backtrace => self.cmd_backtrace(args),
            Command::ShowMappings => self.cmd_showmappings(args),
        }
    }
}
