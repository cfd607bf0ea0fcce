//! Page-granular views of a virtual address range
//!
//! `showmappings` turns a user-supplied address range into a [`PageRange`],
//! then renders one [`Mapping`] per page.

use super::{page_round_down, PageTableView, PAGE_SIZE};
use core::fmt;
use x86_64::structures::paging::PageTableFlags;

/// The permission bits `showmappings` reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    pub present: bool,
    pub user: bool,
    pub writable: bool,
}

impl Permissions {
    pub fn from_flags(flags: PageTableFlags) -> Self {
        Self {
            present: flags.contains(PageTableFlags::PRESENT),
            user: flags.contains(PageTableFlags::USER_ACCESSIBLE),
            writable: flags.contains(PageTableFlags::WRITABLE),
        }
    }
}

/// Fixed-width `P/U/W`; each absent bit prints as `X`.
impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            (self.present, 'P'),
            (self.user, 'U'),
            (self.writable, 'W'),
        ];
        for (i, (set, letter)) in parts.into_iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", if set { letter } else { 'X' })?;
        }
        Ok(())
    }
}

/// State of one virtual page, derived on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub virtual_page: u64,
    /// `None` when the page is not mapped
    pub physical_page: Option<u64>,
    pub permissions: Permissions,
}

impl Mapping {
    pub fn lookup(view: &dyn PageTableView, virtual_page: u64) -> Self {
        match view.translate(virtual_page) {
            Some(entry) => Self {
                virtual_page,
                physical_page: Some(entry.physical_page),
                permissions: Permissions::from_flags(entry.flags),
            },
            None => Self {
                virtual_page,
                physical_page: None,
                permissions: Permissions::default(),
            },
        }
    }
}

/// One `showmappings` row: `virtual\tphysical\tpermissions`
impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.physical_page {
            Some(phys) => write!(
                f,
                "{:08x}\t{:08x}\t{}",
                self.virtual_page, phys, self.permissions
            ),
            None => write!(f, "{:08x}\tNULL\tNULL", self.virtual_page),
        }
    }
}

/// Half-open run of whole pages
///
/// The count is computed in 128-bit arithmetic so a range ending at the top
/// of the address space neither overflows nor wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u64,
    pages: u64,
}

impl PageRange {
    /// Pages covering `[begin, end)`: `begin` rounds down, `end` rounds up.
    pub fn new(begin: u64, end: u64) -> Self {
        let page = PAGE_SIZE as u128;
        let start = page_round_down(begin);
        let end = (end as u128).div_ceil(page) * page;
        let pages = if end > start as u128 {
            ((end - start as u128) / page) as u64
        } else {
            0
        };
        Self { start, pages }
    }

    /// The single page containing `addr`.
    pub fn single(addr: u64) -> Self {
        Self {
            start: page_round_down(addr),
            pages: 1,
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn page_count(&self) -> u64 {
        self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages == 0
    }

    /// Page-aligned addresses in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> {
        let start = self.start;
        (0..self.pages).map(move |i| start + i * PAGE_SIZE)
    }
}

/// One [`Mapping`] per page of `range`, queried lazily.
pub fn mappings<'a>(
    view: &'a dyn PageTableView,
    range: PageRange,
) -> impl Iterator<Item = Mapping> + 'a {
    range.iter().map(move |va| Mapping::lookup(view, va))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::PageMapping;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    struct OnePage;

    impl PageTableView for OnePage {
        fn translate(&self, addr: u64) -> Option<PageMapping> {
            (page_round_down(addr) == 0x3000).then_some(PageMapping {
                physical_page: 0x0011_7000,
                flags: PageTableFlags::PRESENT | PageTableFlags::WRITABLE,
            })
        }
    }

    #[test]
    fn permission_strings() {
        let all = PageTableFlags::PRESENT
            | PageTableFlags::USER_ACCESSIBLE
            | PageTableFlags::WRITABLE;
        assert_eq!(Permissions::from_flags(all).to_string(), "P/U/W");
        assert_eq!(
            Permissions::from_flags(PageTableFlags::PRESENT).to_string(),
            "P/X/X"
        );
        assert_eq!(Permissions::default().to_string(), "X/X/X");
    }

    #[test]
    fn range_rounds_outward() {
        let range = PageRange::new(0x1234, 0x3001);
        assert_eq!(range.start(), 0x1000);
        assert_eq!(range.page_count(), 3);
        assert_eq!(range.iter().collect::<Vec<_>>(), [0x1000, 0x2000, 0x3000]);
    }

    #[test]
    fn range_is_empty_when_end_precedes_begin() {
        assert!(PageRange::new(0x5000, 0x2000).is_empty());
        assert!(PageRange::new(0x5000, 0x5000).is_empty());
    }

    #[test]
    fn range_reaching_top_of_address_space() {
        let range = PageRange::new(0xFFFF_FFFF_FFFF_E000, u64::MAX);
        assert_eq!(range.page_count(), 2);
        assert_eq!(range.iter().last(), Some(0xFFFF_FFFF_FFFF_F000));
    }

    #[test]
    fn rows_for_mapped_and_unmapped_pages() {
        let rows: Vec<_> = mappings(&OnePage, PageRange::new(0x2000, 0x4000))
            .map(|m| m.to_string())
            .collect();
        assert_eq!(rows, ["00002000\tNULL\tNULL", "00003000\t00117000\tP/X/W"]);
    }
}
