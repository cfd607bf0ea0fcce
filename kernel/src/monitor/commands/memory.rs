//! Memory inspection command
//!
//! - `showmappings`: Virtual-to-physical mappings of an address range
//!
//! Read-only: page tables are queried, never modified.

use crate::memory::mapping::mappings;
use crate::memory::PageRange;
use crate::monitor::error::MonitorError;
use crate::monitor::parsing::parse_hex_address;
use crate::monitor::Monitor;
use alloc::format;

const SHOWMAPPINGS_USAGE: &str = "showmappings BEGIN [END]";

/// Page range named by `showmappings BEGIN [END]`.
///
/// BEGIN rounds down to a page. With END absent the range is the single page
/// at BEGIN; otherwise END rounds up. BEGIN is validated before END.
pub fn parse_mapping_range(args: &[&str]) -> Result<PageRange, MonitorError> {
    match args {
        [_, begin] => Ok(PageRange::single(parse_hex_address(begin)?)),
        [_, begin, end] => {
            let begin = parse_hex_address(begin)?;
            let end = parse_hex_address(end)?;
            Ok(PageRange::new(begin, end))
        }
        _ => Err(MonitorError::Usage(SHOWMAPPINGS_USAGE)),
    }
}

impl Monitor<'_> {
    /// Display the mapping of every page in a virtual range
    ///
    /// # Examples
    /// ```text
    /// K> showmappings 0xf0000000 0xf0002000
    /// Virtual	Physical	Permission
    /// f0000000	00000000	P/X/W
    /// f0001000	00001000	P/X/W
    /// ```
    pub(in crate::monitor) fn cmd_showmappings(&mut self, args: &[&str]) -> i32 {
        let range = match parse_mapping_range(args) {
            Ok(range) => range,
            Err(err) => {
                log_warn!("showmappings rejected: {}", err);
                self.writeln(&format!("{}", err));
                return 0;
            }
        };
        log_debug!(
            "showmappings {:#x} + {} pages",
            range.start(),
            range.page_count()
        );

        let page_table = self.view.page_table;
        self.writeln("Virtual\tPhysical\tPermission");
        for mapping in mappings(page_table, range) {
            log_trace!("{:#x} -> {:?}", mapping.virtual_page, mapping.physical_page);
            self.writeln(&format!("{}", mapping));
        }
        0
    }
}
