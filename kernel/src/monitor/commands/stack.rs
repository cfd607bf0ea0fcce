//! Stack inspection command
//!
//! - `backtrace`: Walk the saved frame-pointer chain

use crate::backtrace::StackWalker;
use crate::monitor::{FrameOrigin, Monitor};
use alloc::format;

impl Monitor<'_> {
    /// Display the call stack, innermost frame first
    ///
    /// One line per frame with the frame pointer, return address and five
    /// argument words. When the return address resolves, a second line gives
    /// `file:line: function+offset`.
    ///
    /// # Examples
    /// ```text
    /// K> backtrace
    /// ebp f010ff18 eip f0100087 args 00000000 00000000 00000000 f010ff78 00000001
    /// kern/init.c:24: test_backtrace+71
    /// ```
    ///
    /// # Safety
    /// Stack words are read through the monitor's `MemoryReader`; a chain
    /// that leaves readable memory simply ends the trace.
    #[inline(never)]
    pub(in crate::monitor) fn cmd_backtrace(&mut self, _args: &[&str]) -> i32 {
        let start = match self.frame_origin {
            FrameOrigin::At(fp) => fp,
            FrameOrigin::Current => current_frame_pointer(),
        };

        let memory = self.view.memory;
        let symbols = self.view.symbols;
        let mut walker = StackWalker::new(memory, start);
        if let Some(limit) = self.frame_limit {
            walker = walker.with_limit(limit);
        }

        let mut depth = 0usize;
        for frame in walker {
            log_trace!(
                "frame {} fp={:#x} ret={:#x}",
                depth,
                frame.frame_pointer,
                frame.return_address
            );
            self.writeln(&format!("{}", frame));
            if let Some(info) = symbols.resolve(frame.return_address) {
                self.writeln(&format!(
                    "{}:{}: {}+{}",
                    info.file,
                    info.line,
                    info.name(),
                    info.offset_of(frame.return_address)
                ));
            }
            depth += 1;
        }
        log_debug!("backtrace printed {} frames", depth);
        0
    }
}

/// Frame pointer of the calling function.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn current_frame_pointer() -> usize {
    crate::backtrace::read_frame_pointer()
}

/// No frame-pointer register to read; the trace is empty.
#[cfg(not(target_arch = "x86_64"))]
fn current_frame_pointer() -> usize {
    0
}
