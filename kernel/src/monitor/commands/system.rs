//! System information commands
//!
//! - `help`: List every command with its description
//! - `kerninfo`: Kernel image section boundaries and memory footprint

use super::COMMANDS;
use crate::monitor::Monitor;
use alloc::format;

impl Monitor<'_> {
    /// List commands in table order
    ///
    /// # Examples
    /// ```text
    /// K> help
    /// help - Display this list of commands
    /// kerninfo - Display information about the kernel
    /// ...
    /// ```
    pub(in crate::monitor) fn cmd_help(&mut self, _args: &[&str]) -> i32 {
        for command in COMMANDS {
            self.writeln(&format!("{} - {}", command.name(), command.description()));
        }
        0
    }

    /// Display the linker symbols bounding the kernel image
    ///
    /// Virtual addresses are shown with their physical counterparts, plus
    /// the size of the image from `entry` to `end` rounded up to a KiB.
    pub(in crate::monitor) fn cmd_kerninfo(&mut self, _args: &[&str]) -> i32 {
        let layout = self.view.layout;
        self.writeln("Special kernel symbols:");
        self.writeln(&format!("  _start                  {:08x} (phys)", layout.start));
        for (label, virt) in [
            ("entry ", layout.entry),
            ("etext ", layout.etext),
            ("edata ", layout.edata),
            ("end   ", layout.end),
        ] {
            self.writeln(&format!(
                "  {} {:08x} (virt)  {:08x} (phys)",
                label,
                virt,
                layout.phys(virt)
            ));
        }
        self.writeln(&format!(
            "Kernel executable memory footprint: {}KB",
            layout.footprint_kib()
        ));
        0
    }
}
