//! Page-table lookups
//!
//! [`PageTableView`] is the only question the monitor ever asks of a page
//! table: "what backs this virtual address, and with which bits?".
//! [`KernelPageTable`] answers it by walking a real x86-64 four-level
//! hierarchy through the physical-memory window.

use super::page_round_down;
use x86_64::structures::paging::mapper::{OffsetPageTable, Translate, TranslateResult};
use x86_64::structures::paging::{PageTable, PageTableFlags};
use x86_64::VirtAddr;

/// Leaf translation of one virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMapping {
    /// Start of the 4 KiB physical page backing the address
    pub physical_page: u64,
    /// Raw flags of the leaf entry
    pub flags: PageTableFlags,
}

/// Read-only page-table lookup
pub trait PageTableView {
    /// `None` when no present leaf entry covers `addr`.
    fn translate(&self, addr: u64) -> Option<PageMapping>;
}

/// Page table reached through a linear physical-memory window
pub struct KernelPageTable<'a> {
    inner: OffsetPageTable<'a>,
}

impl<'a> KernelPageTable<'a> {
    /// Wrap a level-4 table whose lower levels are reachable at
    /// `phys_offset + physical address`.
    ///
    /// # Safety
    /// Every table referenced from `level_4` must be mapped at
    /// `phys_offset + its physical address` for the lifetime `'a`.
    pub unsafe fn new(level_4: &'a mut PageTable, phys_offset: VirtAddr) -> Self {
        Self {
            inner: OffsetPageTable::new(level_4, phys_offset),
        }
    }
}

#[cfg(target_arch = "x86_64")]
impl KernelPageTable<'static> {
    /// The hierarchy CR3 currently points at.
    ///
    /// # Safety
    /// All physical memory holding page tables must be mapped at
    /// `phys_offset`, and the returned view must not outlive the mapping.
    pub unsafe fn active(phys_offset: VirtAddr) -> Self {
        use x86_64::registers::control::Cr3;

        let (frame, _) = Cr3::read();
        let level_4 = phys_offset + frame.start_address().as_u64();
        Self::new(&mut *level_4.as_mut_ptr::<PageTable>(), phys_offset)
    }
}

impl PageTableView for KernelPageTable<'_> {
    fn translate(&self, addr: u64) -> Option<PageMapping> {
        // Non-canonical addresses can never be mapped.
        let va = VirtAddr::try_new(addr).ok()?;
        match self.inner.translate(va) {
            // The walker only rejects all-zero leaves; a cleared PRESENT bit
            // still comes back as `Mapped`.
            TranslateResult::Mapped { flags, .. } if !flags.contains(PageTableFlags::PRESENT) => {
                None
            }
            TranslateResult::Mapped { frame, offset, flags } => Some(PageMapping {
                // For 2 MiB / 1 GiB leaves, pick the 4 KiB slice holding `addr`.
                physical_page: page_round_down(frame.start_address().as_u64() + offset),
                flags,
            }),
            TranslateResult::NotMapped | TranslateResult::InvalidFrameAddress(_) => None,
        }
    }
}
