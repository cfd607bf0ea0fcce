//! Fake kernel state for driving the monitor on the host
//!
//! - `FakeStack`: word-addressed memory holding hand-built frame chains
//! - `FakePageTable`: page-granular map of virtual pages to mappings
//! - `ScriptedInput`: a `LineSource` replaying canned reads
//! - `Session`: wires the fakes into a monitor and captures its output

#![allow(dead_code)]

use kmon_kernel::debuginfo::{FunctionSymbol, LineRecord, SymbolTable};
use kmon_kernel::memory::{page_round_down, MemoryReader, PageMapping, PageTableView, WORD_SIZE};
use kmon_kernel::monitor::LineSource;
use kmon_kernel::{BufferConsole, Console, FrameOrigin, KernelLayout, KernelView, Monitor};
use std::collections::{BTreeMap, VecDeque};
use std::ops::ControlFlow;
use x86_64::structures::paging::PageTableFlags;

pub const P: PageTableFlags = PageTableFlags::PRESENT;
pub const U: PageTableFlags = PageTableFlags::USER_ACCESSIBLE;
pub const W: PageTableFlags = PageTableFlags::WRITABLE;

#[derive(Default)]
pub struct FakeStack {
    words: BTreeMap<usize, usize>,
}

impl FakeStack {
    /// Lay out a frame record at `fp`.
    pub fn push_frame(&mut self, fp: usize, caller_fp: usize, ret: usize, args: [usize; 5]) {
        self.words.insert(fp, caller_fp);
        self.words.insert(fp + WORD_SIZE, ret);
        for (i, arg) in args.into_iter().enumerate() {
            self.words.insert(fp + (2 + i) * WORD_SIZE, arg);
        }
    }

    /// Make the word at `addr` unreadable, as if its page were unmapped.
    pub fn forget(&mut self, addr: usize) {
        self.words.remove(&addr);
    }

    /// Frames at `base`, `base + stride`, ... linked innermost first, with
    /// return address `ret_base + i`. The last frame's caller is null.
    pub fn chain(base: usize, stride: usize, ret_base: usize, len: usize) -> Self {
        let mut stack = Self::default();
        for i in 0..len {
            let fp = base + i * stride;
            let caller = if i + 1 == len { 0 } else { fp + stride };
            stack.push_frame(fp, caller, ret_base + i, [i; 5]);
        }
        stack
    }
}

impl MemoryReader for FakeStack {
    fn read_word(&self, addr: usize) -> Option<usize> {
        self.words.get(&addr).copied()
    }
}

#[derive(Default)]
pub struct FakePageTable {
    pages: BTreeMap<u64, PageMapping>,
}

impl FakePageTable {
    pub fn map(mut self, virt: u64, phys: u64, flags: PageTableFlags) -> Self {
        self.pages.insert(
            page_round_down(virt),
            PageMapping {
                physical_page: page_round_down(phys),
                flags,
            },
        );
        self
    }
}

impl PageTableView for FakePageTable {
    fn translate(&self, addr: u64) -> Option<PageMapping> {
        self.pages.get(&page_round_down(addr)).copied()
    }
}

/// Replays reads in order; `None` entries are null reads.
pub struct ScriptedInput {
    reads: VecDeque<Option<String>>,
    pub prompts: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(reads: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            reads: reads.into_iter().map(|r| r.map(Into::into)).collect(),
            prompts: 0,
        }
    }

    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| Some(*l)))
    }

    pub fn is_exhausted(&self) -> bool {
        self.reads.is_empty()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str, console: &mut dyn Console) -> Option<String> {
        self.prompts += 1;
        console.write_str(prompt);
        self.reads.pop_front().flatten()
    }
}

pub static SYMBOLS: [FunctionSymbol; 2] = [
    FunctionSymbol {
        name: "test_backtrace:F(0,1)",
        file: "kern/init.c",
        start: 0xf010_0040,
        size: 0x60,
        lines: &[
            LineRecord { offset: 0, line: 13 },
            LineRecord { offset: 0x40, line: 16 },
        ],
    },
    FunctionSymbol {
        name: "i386_init:F(0,1)",
        file: "kern/init.c",
        start: 0xf010_00a0,
        size: 0x80,
        lines: &[LineRecord { offset: 0, line: 24 }],
    },
];

pub fn symbols() -> SymbolTable {
    SymbolTable::new(&SYMBOLS).expect("test symbol table is sorted")
}

pub fn jos_layout() -> KernelLayout {
    KernelLayout {
        start: 0x0010_000c,
        entry: 0xf010_000c,
        etext: 0xf010_1a75,
        edata: 0xf011_2300,
        end: 0xf011_2960,
        kernel_base: 0xf000_0000,
    }
}

/// Kernel state for one monitor session
pub struct Session {
    pub stack: FakeStack,
    pub pages: FakePageTable,
    pub symbols: SymbolTable,
    pub frame_pointer: usize,
    pub frame_limit: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            stack: FakeStack::default(),
            pages: FakePageTable::default(),
            symbols: SymbolTable::EMPTY,
            frame_pointer: 0,
            frame_limit: None,
        }
    }
}

impl Session {
    /// Run each line through `run_command` and return the transcript.
    pub fn run(&self, lines: &[&str]) -> String {
        let mut console = BufferConsole::new();
        let mut monitor = self.monitor(&mut console);
        for line in lines {
            monitor.run_command(line);
        }
        drop(monitor);
        console.take()
    }

    /// Drive `poll` until the script runs out; returns the transcript.
    pub fn poll_all(&self, input: &mut ScriptedInput) -> String {
        let mut console = BufferConsole::new();
        let mut monitor = self.monitor(&mut console);
        while !input.is_exhausted() {
            assert_eq!(monitor.poll(input), ControlFlow::Continue(()));
        }
        drop(monitor);
        console.take()
    }

    fn monitor<'a>(&'a self, console: &'a mut BufferConsole) -> Monitor<'a> {
        let view = KernelView {
            symbols: &self.symbols,
            page_table: &self.pages,
            memory: &self.stack,
            layout: jos_layout(),
        };
        Monitor::new(console, view)
            .with_frame_origin(FrameOrigin::At(self.frame_pointer))
            .with_frame_limit(self.frame_limit)
    }
}

/// Output lines, without the trailing empty line.
pub fn lines(transcript: &str) -> Vec<&str> {
    transcript.lines().collect()
}
