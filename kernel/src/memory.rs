//! Memory introspection
//!
//! Read-only views of the running kernel's address space used by the monitor:
//! - `page_tables`: virtual-to-physical translation through a page table
//! - `mapping`: page-granular ranges and the rows `showmappings` prints
//! - [`MemoryReader`]: word reads that refuse to touch unmapped memory
//!
//! Nothing in this module ever modifies a page table.

pub mod mapping;
pub mod page_tables;

pub use kmon_shared::constants::memory::{KERNEL_VIRTUAL_BASE, PAGE_SIZE};
pub use mapping::{Mapping, PageRange, Permissions};
pub use page_tables::{KernelPageTable, PageMapping, PageTableView};

use x86_64::structures::paging::PageTableFlags;

/// Size of one machine word (one stack slot)
pub const WORD_SIZE: usize = core::mem::size_of::<usize>();

/// Offset-within-page mask
pub const PAGE_MASK: u64 = PAGE_SIZE - 1;

/// Round `addr` down to the start of its page.
pub const fn page_round_down(addr: u64) -> u64 {
    addr & !PAGE_MASK
}

/// Source of machine words for the stack walker
///
/// `None` means the word cannot be read; walkers treat that as the end of
/// the data, never as a fault.
pub trait MemoryReader {
    fn read_word(&self, addr: usize) -> Option<usize>;
}

/// Reads live memory, but only words that sit in a present page
///
/// The page table must describe the address space the caller is executing
/// in; otherwise "present" says nothing about whether the load will fault.
pub struct CheckedMemory<'a> {
    page_table: &'a dyn PageTableView,
}

impl<'a> CheckedMemory<'a> {
    pub fn new(page_table: &'a dyn PageTableView) -> Self {
        Self { page_table }
    }
}

impl MemoryReader for CheckedMemory<'_> {
    fn read_word(&self, addr: usize) -> Option<usize> {
        // Aligned words never straddle a page boundary, so one lookup covers
        // every byte of the load.
        if addr == 0 || addr % WORD_SIZE != 0 {
            return None;
        }
        let mapping = self.page_table.translate(addr as u64)?;
        if !mapping.flags.contains(PageTableFlags::PRESENT) {
            return None;
        }
        // SAFETY: `addr` is word-aligned and lies in a page the active page
        // table marks present.
        Some(unsafe { core::ptr::read_volatile(addr as *const usize) })
    }
}
