//! Kernel image layout as reported by `kerninfo`

/// Addresses of the linker-provided section boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelLayout {
    /// Physical load address of the boot entry (`_start`)
    pub start: u64,
    /// Virtual address of the kernel entry point
    pub entry: u64,
    /// End of text
    pub etext: u64,
    /// End of initialised data
    pub edata: u64,
    /// End of the image (after bss)
    pub end: u64,
    /// Virtual address physical address zero is linked at
    pub kernel_base: u64,
}

impl KernelLayout {
    /// Physical address of a kernel virtual address.
    pub const fn phys(&self, virt: u64) -> u64 {
        virt.wrapping_sub(self.kernel_base)
    }

    /// Image size from `entry` to `end`, rounded up to whole KiB.
    pub const fn footprint_kib(&self) -> u64 {
        self.end.saturating_sub(self.entry).div_ceil(1024)
    }

    /// Layout of the running kernel image.
    ///
    /// The linker script must define `_start`, `entry`, `etext`, `edata`
    /// and `end`.
    #[cfg(target_os = "none")]
    pub fn from_linker_symbols() -> Self {
        #[allow(non_upper_case_globals)]
        extern "C" {
            static _start: u8;
            static entry: u8;
            static etext: u8;
            static edata: u8;
            static end: u8;
        }

        // SAFETY: only the addresses of the symbols are taken.
        unsafe {
            Self {
                start: core::ptr::addr_of!(_start) as u64,
                entry: core::ptr::addr_of!(entry) as u64,
                etext: core::ptr::addr_of!(etext) as u64,
                edata: core::ptr::addr_of!(edata) as u64,
                end: core::ptr::addr_of!(end) as u64,
                kernel_base: kmon_shared::constants::memory::KERNEL_VIRTUAL_BASE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmon_shared::constants::memory::KERNEL_VIRTUAL_BASE;

    fn jos_layout() -> KernelLayout {
        KernelLayout {
            start: 0x0010000c,
            entry: 0xf010000c,
            etext: 0xf0101a75,
            edata: 0xf0112300,
            end: 0xf0112960,
            kernel_base: 0xf0000000,
        }
    }

    #[test]
    fn physical_addresses_subtract_kernel_base() {
        let layout = jos_layout();
        assert_eq!(layout.phys(layout.entry), 0x0010000c);
        assert_eq!(layout.phys(layout.end), 0x00112960);
    }

    #[test]
    fn footprint_rounds_up() {
        assert_eq!(jos_layout().footprint_kib(), 75);

        let exact = KernelLayout {
            entry: 0x1000,
            end: 0x1000 + 2048,
            ..jos_layout()
        };
        assert_eq!(exact.footprint_kib(), 2);
    }

    #[test]
    fn high_half_base_is_the_default_link_address() {
        let layout = KernelLayout {
            start: 0x10_0000,
            entry: KERNEL_VIRTUAL_BASE + 0x10_0000,
            etext: KERNEL_VIRTUAL_BASE + 0x20_0000,
            edata: KERNEL_VIRTUAL_BASE + 0x28_0000,
            end: KERNEL_VIRTUAL_BASE + 0x30_0000,
            kernel_base: KERNEL_VIRTUAL_BASE,
        };
        assert_eq!(layout.phys(layout.etext), 0x20_0000);
        assert_eq!(layout.footprint_kib(), 2048);
    }
}
