//! Frame-pointer stack walking
//!
//! With frame pointers enabled every function prologue pushes the caller's
//! frame pointer and points the register at that slot, so each frame looks
//! like:
//!
//! ```text
//! [fp + 0*W]  saved frame pointer of the caller
//! [fp + 1*W]  return address
//! [fp + 2*W]  first argument word
//! ...
//! [fp + 6*W]  fifth argument word
//! ```
//!
//! The argument words are only meaningful under a stack-passing calling
//! convention; on x86_64 they are whatever the caller kept above the return
//! address. They are reported regardless.
//!
//! The outermost frame has a saved frame pointer of zero, which ends the walk.
//! Its argument words may lie past the top of the stack; those that cannot be
//! read are reported as missing rather than dropping the frame.

use crate::memory::{MemoryReader, WORD_SIZE};
use core::fmt;
use core::iter::FusedIterator;
use kmon_shared::constants::monitor::BACKTRACE_ARGS;

/// One activation record on the frame-pointer chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub frame_pointer: usize,
    pub return_address: usize,
    /// `None` where the word could not be read
    pub args: [Option<usize>; BACKTRACE_ARGS],
}

impl Frame {
    /// Read the frame whose saved frame pointer sits at `fp`.
    ///
    /// Returns the frame together with the caller's frame pointer, or `None`
    /// if either the saved frame pointer or the return address cannot be
    /// read. Argument words that cannot be read are left as `None`.
    fn read(reader: &dyn MemoryReader, fp: usize) -> Option<(Self, usize)> {
        let word = |index: usize| {
            let addr = fp.checked_add(index.checked_mul(WORD_SIZE)?)?;
            reader.read_word(addr)
        };

        let caller_fp = word(0)?;
        let return_address = word(1)?;
        let mut args = [None; BACKTRACE_ARGS];
        for (i, arg) in args.iter_mut().enumerate() {
            *arg = word(2 + i);
        }

        Some((
            Self {
                frame_pointer: fp,
                return_address,
                args,
            },
            caller_fp,
        ))
    }
}

/// `ebp xxxxxxxx eip xxxxxxxx args xxxxxxxx xxxxxxxx ...`; unreadable
/// argument words print as `????????`.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ebp {:08x} eip {:08x} args",
            self.frame_pointer, self.return_address
        )?;
        for arg in &self.args {
            match arg {
                Some(word) => write!(f, " {:08x}", word)?,
                None => f.write_str(" ????????")?,
            }
        }
        Ok(())
    }
}

/// Lazy walk up the frame-pointer chain, innermost frame first
///
/// The walk ends at a zero frame pointer, at a frame whose saved frame
/// pointer or return address cannot be read, or after the optional frame
/// limit. A cyclic chain over readable memory only ends if a limit is set.
pub struct StackWalker<'a> {
    reader: &'a dyn MemoryReader,
    next: usize,
    remaining: Option<usize>,
}

impl<'a> StackWalker<'a> {
    pub fn new(reader: &'a dyn MemoryReader, frame_pointer: usize) -> Self {
        Self {
            reader,
            next: frame_pointer,
            remaining: None,
        }
    }

    /// Stop after at most `frames` frames.
    pub fn with_limit(mut self, frames: usize) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl Iterator for StackWalker<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next == 0 || self.remaining == Some(0) {
            return None;
        }

        let Some((frame, caller_fp)) = Frame::read(self.reader, self.next) else {
            self.next = 0;
            return None;
        };

        self.next = caller_fp;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(frame)
    }
}

impl FusedIterator for StackWalker<'_> {}

/// Current value of the frame-pointer register.
///
/// Inlined so the value is the frame of the function that calls it.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn read_frame_pointer() -> usize {
    let rbp: usize;
    // SAFETY: copies a register; touches neither memory nor flags.
    unsafe {
        core::arch::asm!("mov {}, rbp", out(reg) rbp, options(nomem, nostack, preserves_flags));
    }
    rbp
}
